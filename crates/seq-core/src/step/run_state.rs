//! Estado de ejecución por step.
//!
//! `StepRunState` concentra la contabilidad de una ejecución de un step:
//! cuántos slots de elemento completaron, el latch de estado terminal y el
//! acumulador de resultado propio de cada variante. Vive exactamente lo que
//! dura el step y nunca se comparte entre ejecuciones ni entre steps.
use serde_json::Value;

use super::{StepKind, StepStatus};
use crate::model::{truthy, Sequence};

/// Acumulador de resultado según la variante del step.
#[derive(Debug)]
enum ResultAccum {
    /// for-each: el resultado es la propia entrada, no se escribe nada.
    Passthrough,
    /// map: escritura posicional; el orden final es el de entrada aunque las
    /// completaciones lleguen desordenadas.
    Slots(Vec<Value>),
    /// filter: índices conservados; se materializan recién al finalizar con
    /// éxito.
    Kept(Vec<usize>),
}

#[derive(Debug)]
pub(crate) struct StepRunState {
    status: StepStatus,
    completed: usize,
    accum: ResultAccum,
}

impl StepRunState {
    pub(crate) fn new(kind: StepKind, input_len: usize) -> Self {
        let accum = match kind {
            StepKind::ForEach => ResultAccum::Passthrough,
            StepKind::Map => ResultAccum::Slots(vec![Value::Null; input_len]),
            StepKind::Filter => ResultAccum::Kept(Vec::new()),
        };
        Self { status: StepStatus::Pending,
               completed: 0,
               accum }
    }

    pub(crate) fn start(&mut self) {
        self.status = StepStatus::Running;
    }

    /// Latch terminal alcanzado: toda completación posterior se ignora.
    pub(crate) fn done(&self) -> bool {
        matches!(self.status, StepStatus::FinishedOk | StepStatus::Failed)
    }

    /// Aplica la completación exitosa del slot `index`. Devuelve `true` si
    /// con ella el step quedó completo (latch de éxito).
    pub(crate) fn apply_success(&mut self, index: usize, value: Value, total: usize) -> bool {
        if self.done() {
            return false;
        }
        match &mut self.accum {
            ResultAccum::Passthrough => {}
            ResultAccum::Slots(slots) => {
                if let Some(slot) = slots.get_mut(index) {
                    *slot = value;
                }
            }
            ResultAccum::Kept(kept) => {
                if truthy(&value) {
                    kept.push(index);
                }
            }
        }
        self.completed += 1;
        if self.completed == total {
            self.status = StepStatus::FinishedOk;
        }
        self.done()
    }

    /// Latch de fallo: la primera completación con error observada gana.
    /// Devuelve `false` si el step ya estaba en estado terminal.
    pub(crate) fn latch_failure(&mut self) -> bool {
        if self.done() {
            return false;
        }
        self.status = StepStatus::Failed;
        true
    }

    /// Marca el éxito inmediato de un step sin slots que esperar (secuencia
    /// de entrada vacía).
    pub(crate) fn latch_empty_success(&mut self) {
        if !self.done() {
            self.status = StepStatus::FinishedOk;
        }
    }

    /// Materializa el resultado de un step exitoso. Para filter en modo
    /// paralelo los índices se reordenan ascendentes antes de mapearse a los
    /// elementos de entrada, deshaciendo el desorden de completación.
    pub(crate) fn into_output(self, input: &Sequence, sort_kept: bool) -> Sequence {
        match self.accum {
            ResultAccum::Passthrough => input.clone(),
            ResultAccum::Slots(slots) => Sequence::from(slots),
            ResultAccum::Kept(mut kept) => {
                if sort_kept {
                    kept.sort_unstable();
                }
                kept.into_iter()
                    .filter_map(|i| input.get(i).cloned())
                    .collect()
            }
        }
    }

    /// Snapshot del acumulador tal como está, entregado a los callbacks de un
    /// step fallido (filter expone índices, no elementos).
    pub(crate) fn partial(&self, input: &Sequence) -> Sequence {
        match &self.accum {
            ResultAccum::Passthrough => input.clone(),
            ResultAccum::Slots(slots) => Sequence::from(slots.clone()),
            ResultAccum::Kept(kept) => kept.iter().map(|i| Value::from(*i as u64)).collect(),
        }
    }
}
