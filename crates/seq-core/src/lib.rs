//! seq-core: Motor de iteración encadenada sobre secuencias.
//!
//! Orquesta el recorrido, la transformación y el filtrado de una secuencia
//! mediante workers asíncronos por elemento, en despacho paralelo (fan-out
//! total) o serial estricto, componiendo varias etapas en una cadena donde
//! la salida de cada step alimenta al siguiente. El primer fallo observado
//! detiene el step y el resto de la cadena.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod step;

pub use engine::{ChainEngine, RunState};
pub use errors::ChainError;
pub use event::{ChainEvent, ChainEventKind, EventStore, InMemoryEventStore};
pub use model::{truthy, Sequence};
pub use step::{DispatchMode, Step, StepKind, StepRunResult, StepStatus};
