//! Errores específicos del core (simples por ahora).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone, Serialize, Deserialize)]
pub enum ChainError {
    /// Un worker reportó fallo para un elemento. `reason` es el valor opaco
    /// entregado por el llamador y se propaga sin inspeccionar ni clasificar.
    #[error("worker failed at step {step_index}, element {element_index}: {reason}")]
    Worker { step_index: usize, element_index: usize, reason: Value },
    #[error("chain has no steps")] EmptyChain,
    #[error("no step registered yet for completion callback")] NoStepForCallback,
    #[error("internal: {0}")] Internal(String),
}
