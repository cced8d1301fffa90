//! Construcción encadenada de steps.
//!
//! Los métodos de este módulo consumen el engine y lo devuelven, de modo que
//! una cadena completa se declara en una sola expresión:
//!
//! ```ignore
//! // let mut chain = ChainEngine::new(seq)
//! //     .filter(|el, _| async move { Ok(json!(!el.is_string())) })
//! //     .map(|el, i| async move { Ok(json!(format!("{i}: {el}"))) });
//! // let result = chain.execute().await?;
//! ```
//!
//! Cada método por-variante existe en versión paralela y serial; todos
//! delegan en `add_step`, que empaqueta el worker como objeto dinámico.
use std::future::Future;

use serde_json::Value;

use crate::errors::ChainError;
use crate::event::EventStore;
use crate::model::Sequence;
use crate::step::{DispatchMode, Step, StepCallback, StepKind, Worker, WorkerFuture};

use super::ChainEngine;

impl<E> ChainEngine<E>
    where E: EventStore
{
    /// Agrega un step con un `Worker` ya empaquetado. Los steps conservan su
    /// orden de inserción y nunca se quitan ni reordenan.
    pub fn add_step(mut self, kind: StepKind, mode: DispatchMode, worker: Worker) -> Self {
        self.push_step(Step::new(kind, mode, worker));
        self
    }

    /// for-each con despacho paralelo.
    pub fn for_each<W, Fut>(self, worker: W) -> Self
        where W: Fn(Value, usize) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<Value, Value>> + Send + 'static
    {
        self.add_step(StepKind::ForEach, DispatchMode::Parallel, box_worker(worker))
    }

    /// for-each estricto, un elemento a la vez en orden de índice.
    pub fn for_each_serial<W, Fut>(self, worker: W) -> Self
        where W: Fn(Value, usize) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<Value, Value>> + Send + 'static
    {
        self.add_step(StepKind::ForEach, DispatchMode::Serial, box_worker(worker))
    }

    /// map con despacho paralelo; el resultado respeta el orden de entrada.
    pub fn map<W, Fut>(self, worker: W) -> Self
        where W: Fn(Value, usize) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<Value, Value>> + Send + 'static
    {
        self.add_step(StepKind::Map, DispatchMode::Parallel, box_worker(worker))
    }

    /// map estricto en orden de índice.
    pub fn map_serial<W, Fut>(self, worker: W) -> Self
        where W: Fn(Value, usize) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<Value, Value>> + Send + 'static
    {
        self.add_step(StepKind::Map, DispatchMode::Serial, box_worker(worker))
    }

    /// filter con despacho paralelo; conserva los elementos cuyo worker
    /// completó con valor veraz, en su orden relativo original.
    pub fn filter<W, Fut>(self, worker: W) -> Self
        where W: Fn(Value, usize) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<Value, Value>> + Send + 'static
    {
        self.add_step(StepKind::Filter, DispatchMode::Parallel, box_worker(worker))
    }

    /// filter estricto en orden de índice.
    pub fn filter_serial<W, Fut>(self, worker: W) -> Self
        where W: Fn(Value, usize) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = Result<Value, Value>> + Send + 'static
    {
        self.add_step(StepKind::Filter, DispatchMode::Serial, box_worker(worker))
    }

    /// Registra `callback(error, resultado)` sobre el último step agregado.
    /// Registros múltiples sobre el mismo step se disparan todos, en orden de
    /// registro, con argumentos idénticos. Falla si la cadena aún no tiene
    /// steps.
    pub fn on_step_complete<F>(mut self, callback: F) -> Result<Self, ChainError>
        where F: Fn(Option<&ChainError>, &Sequence) + Send + Sync + 'static
    {
        match self.last_step_mut() {
            Some(step) => {
                step.on_complete(Box::new(callback) as StepCallback);
                Ok(self)
            }
            None => Err(ChainError::NoStepForCallback),
        }
    }
}

/// Empaqueta una closure asíncrona como `Worker` dinámico.
fn box_worker<W, Fut>(worker: W) -> Worker
    where W: Fn(Value, usize) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = Result<Value, Value>> + Send + 'static
{
    Box::new(move |element, index| Box::pin(worker(element, index)) as WorkerFuture)
}
