//! Core ChainEngine implementation

use serde_json::json;
use uuid::Uuid;

use crate::constants::ENGINE_VERSION;
use crate::errors::ChainError;
use crate::event::{ChainEvent, ChainEventKind, EventStore, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::model::Sequence;
use crate::step::{Step, StepRunResult};

use super::RunState;

/// Motor de ejecución de cadenas sobre una secuencia.
///
/// Mantiene la secuencia fuente, la lista ordenada de steps y el event store.
/// La lista de steps sólo crece vía los métodos de construcción encadenada;
/// cada `execute()` corre la cadena completa desde cero con estado propio.
#[derive(Debug)]
pub struct ChainEngine<E>
    where E: EventStore
{
    source: Sequence,
    steps: Vec<Step>,
    event_store: E,
    last_run_id: Option<Uuid>,
}

impl ChainEngine<InMemoryEventStore> {
    /// Crea un engine con store de eventos en memoria.
    pub fn new(source: Sequence) -> Self {
        Self::with_store(source, InMemoryEventStore::default())
    }
}

impl<E> ChainEngine<E>
    where E: EventStore
{
    /// Crea un engine con el store proporcionado.
    pub fn with_store(source: Sequence, event_store: E) -> Self {
        Self { source,
               steps: Vec::new(),
               event_store,
               last_run_id: None }
    }

    pub(crate) fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub(crate) fn last_step_mut(&mut self) -> Option<&mut Step> {
        self.steps.last_mut()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Hash canónico de la definición de la cadena (variantes y modos de sus
    /// steps más la versión del motor). Estable entre corridas del mismo
    /// engine.
    pub fn definition_hash(&self) -> String {
        let steps: Vec<_> = self.steps
                                .iter()
                                .map(|s| {
                                    json!({
                                        "kind": format!("{:?}", s.kind()),
                                        "mode": format!("{:?}", s.mode()),
                                    })
                                })
                                .collect();
        hash_value(&json!({
                       "engine_version": ENGINE_VERSION,
                       "steps": steps,
                   }))
    }

    /// Ejecuta la cadena completa y devuelve la secuencia final.
    ///
    /// Cada invocación crea un `RunState` nuevo: re-ejecutar el mismo engine
    /// corre la cadena desde cero, sin compartir contadores con corridas
    /// anteriores. El primer fallo de un step detiene la corrida; los steps
    /// posteriores no se ejecutan y sus callbacks no se disparan.
    pub async fn execute(&mut self) -> Result<Sequence, ChainError> {
        if self.steps.is_empty() {
            return Err(ChainError::EmptyChain);
        }

        let mut run = RunState::new();
        self.last_run_id = Some(run.run_id);
        self.event_store.append_kind(run.run_id,
                                     ChainEventKind::ChainInitialized { definition_hash:
                                                                            self.definition_hash(),
                                                                        step_count: self.steps.len(),
                                                                        source_len: self.source.len() });

        let mut input = self.source.clone();
        while run.cursor < self.steps.len() {
            let step = &self.steps[run.cursor];
            self.event_store.append_kind(run.run_id,
                                         ChainEventKind::StepStarted { step_index: run.cursor,
                                                                       kind: step.kind(),
                                                                       mode: step.mode() });

            match step.run(run.cursor, &input).await {
                StepRunResult::Success { output } => {
                    self.event_store.append_kind(run.run_id,
                                                 ChainEventKind::StepFinished { step_index: run.cursor,
                                                                                kind: step.kind(),
                                                                                output_len: output.len() });
                    input = output;
                    run.advance();
                }
                StepRunResult::Failure { error, .. } => {
                    self.event_store.append_kind(run.run_id,
                                                 ChainEventKind::StepFailed { step_index: run.cursor,
                                                                              kind: step.kind(),
                                                                              error: error.clone() });
                    return Err(error);
                }
            }
        }

        self.event_store.append_kind(run.run_id,
                                     ChainEventKind::ChainCompleted { step_count: self.steps.len() });
        Ok(input)
    }

    /// Alias compacto de `execute`.
    pub async fn exec(&mut self) -> Result<Sequence, ChainError> {
        self.execute().await
    }

    /// Id de la última corrida iniciada, si la hubo.
    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run_id
    }

    /// Eventos de la última corrida.
    pub fn events(&self) -> Option<Vec<ChainEvent>> {
        self.last_run_id.map(|rid| self.event_store.list(rid))
    }

    /// Eventos de una corrida específica.
    pub fn events_for(&self, run_id: Uuid) -> Vec<ChainEvent> {
        self.event_store.list(run_id)
    }

    /// Variante compacta de los eventos de la última corrida.
    pub fn event_variants(&self) -> Option<Vec<&'static str>> {
        self.events().map(|events| {
                         events.iter()
                               .map(|e| match e.kind {
                                   ChainEventKind::ChainInitialized { .. } => "I",
                                   ChainEventKind::StepStarted { .. } => "S",
                                   ChainEventKind::StepFinished { .. } => "F",
                                   ChainEventKind::StepFailed { .. } => "X",
                                   ChainEventKind::ChainCompleted { .. } => "C",
                               })
                               .collect()
                     })
    }
}
