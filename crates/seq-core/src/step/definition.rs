//! Definición de Steps y su bucle de ejecución.
//!
//! Las variantes de step forman un conjunto cerrado (`StepKind`) y comparten
//! un único bucle de despacho; lo que cambia entre variantes es cómo
//! `StepRunState` acumula las completaciones. El worker es una closure
//! asíncrona: invocarla equivale a lanzar el trabajo del elemento, y la
//! resolución de su futuro es la continuación con la que reporta éxito o
//! fallo.
use std::future::Future;
use std::pin::Pin;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::run_state::StepRunState;
use super::StepRunResult;
use crate::errors::ChainError;
use crate::model::Sequence;

/// Variantes de step soportadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    /// Recorre los elementos; el resultado es la secuencia de entrada.
    ForEach,
    /// Escribe el valor producido en la posición del elemento de origen.
    Map,
    /// Conserva los elementos cuyo worker completó con un valor veraz.
    Filter,
}

/// Modo de despacho de los workers de un step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchMode {
    /// Todos los workers se invocan antes de observar completación alguna;
    /// el orden de completación es libre.
    Parallel,
    /// Un elemento en vuelo a la vez, en orden estricto de índice.
    Serial,
}

/// Futuro devuelto por un worker. El brazo `Err` transporta el valor opaco de
/// error del llamador.
pub type WorkerFuture = Pin<Box<dyn Future<Output = Result<Value, Value>> + Send>>;

/// Worker por elemento: recibe el elemento y su índice y completa más tarde
/// con éxito (valor) o fallo (valor opaco). Debe completar exactamente una
/// vez por invocación; completaciones posteriores al latch del step se
/// descartan.
pub type Worker = Box<dyn Fn(Value, usize) -> WorkerFuture + Send + Sync>;

/// Callback de finalización de step: `(error, resultado-hasta-ahora)`.
pub type StepCallback = Box<dyn Fn(Option<&ChainError>, &Sequence) + Send + Sync>;

/// Una etapa de la cadena. El worker se invoca una vez por elemento; los
/// callbacks se disparan una única vez al finalizar el step, en orden de
/// registro, con argumentos idénticos.
pub struct Step {
    kind: StepKind,
    mode: DispatchMode,
    worker: Worker,
    callbacks: Vec<StepCallback>,
}

impl Step {
    pub(crate) fn new(kind: StepKind, mode: DispatchMode, worker: Worker) -> Self {
        Self { kind,
               mode,
               worker,
               callbacks: Vec::new() }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Registra un callback de finalización conservando el orden de registro.
    pub(crate) fn on_complete(&mut self, callback: StepCallback) {
        self.callbacks.push(callback);
    }

    /// Lanza el step sobre la secuencia de entrada y lo ejecuta hasta su
    /// estado terminal. Dispara los callbacks registrados antes de devolver
    /// el resultado al engine.
    pub(crate) async fn run(&self, step_index: usize, input: &Sequence) -> StepRunResult {
        let total = input.len();
        let mut state = StepRunState::new(self.kind, total);
        state.start();

        match self.mode {
            DispatchMode::Parallel => {
                // Invariante de despacho: todos los workers se invocan antes
                // de consumir la primera completación.
                let mut inflight = FuturesUnordered::new();
                for (index, element) in input.iter().enumerate() {
                    let fut = (self.worker)(element.clone(), index);
                    inflight.push(async move { (index, fut.await) });
                }

                while let Some((index, outcome)) = inflight.next().await {
                    match outcome {
                        Ok(value) => {
                            if state.apply_success(index, value, total) {
                                break;
                            }
                        }
                        Err(reason) => {
                            if state.latch_failure() {
                                return self.finish_failure(step_index, index, reason, &state, input);
                            }
                        }
                    }
                }
                // Al soltar `inflight` se descartan las completaciones que
                // nunca llegaron a observarse.
            }
            DispatchMode::Serial => {
                for (index, element) in input.iter().enumerate() {
                    match (self.worker)(element.clone(), index).await {
                        Ok(value) => {
                            if state.apply_success(index, value, total) {
                                break;
                            }
                        }
                        Err(reason) => {
                            state.latch_failure();
                            return self.finish_failure(step_index, index, reason, &state, input);
                        }
                    }
                }
            }
        }

        // Secuencia vacía: no hay completaciones que esperar.
        state.latch_empty_success();

        let sort_kept = matches!(self.mode, DispatchMode::Parallel);
        let output = state.into_output(input, sort_kept);
        self.fire_callbacks(None, &output);
        StepRunResult::Success { output }
    }

    fn finish_failure(&self,
                      step_index: usize,
                      element_index: usize,
                      reason: Value,
                      state: &StepRunState,
                      input: &Sequence)
                      -> StepRunResult {
        let error = ChainError::Worker { step_index,
                                         element_index,
                                         reason };
        let partial = state.partial(input);
        self.fire_callbacks(Some(&error), &partial);
        StepRunResult::Failure { error, partial }
    }

    fn fire_callbacks(&self, error: Option<&ChainError>, result: &Sequence) {
        for callback in &self.callbacks {
            callback(error, result);
        }
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
         .field("kind", &self.kind)
         .field("mode", &self.mode)
         .field("callbacks", &self.callbacks.len())
         .finish()
    }
}
