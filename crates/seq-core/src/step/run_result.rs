use crate::{errors::ChainError, model::Sequence};

/// Resultado abstracto de ejecutar un step.
pub enum StepRunResult {
    Success { output: Sequence },
    /// `partial` es el acumulador tal como estaba al observarse el error
    /// (para filter: los índices conservados, aún sin materializar).
    Failure { error: ChainError, partial: Sequence },
}
