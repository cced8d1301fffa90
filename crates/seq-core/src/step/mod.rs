//! Definiciones relacionadas a Steps.
//!
//! Un Step es una etapa de la cadena: un worker asíncrono aplicado por
//! elemento, un modo de despacho (paralelo o serial) y una lista de callbacks
//! de finalización. Este módulo define:
//! - `Step` y el conjunto cerrado de variantes (`StepKind`), despachadas por
//!   el bucle de ejecución compartido.
//! - `StepRunState`: contabilidad por ejecución de un step (contador de slots
//!   completados, latch terminal, acumulador de resultado).
//! - `StepRunResult`: resultado abstracto entregado al engine.

pub mod definition;
mod run_result;
mod run_state;
mod status;

pub use definition::{DispatchMode, Step, StepCallback, StepKind, Worker, WorkerFuture};
pub use run_result::StepRunResult;
pub use status::StepStatus;
