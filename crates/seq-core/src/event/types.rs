//! Tipos de evento de ejecución y estructura `ChainEvent`.
//!
//! Rol en el motor:
//! - Cada llamada a `execute()` emite eventos a un `EventStore` append-only
//!   bajo un `run_id` propio.
//! - Los eventos son el registro observable de una corrida: qué step corrió,
//!   con qué resultado y en qué orden.
//! - El enum `ChainEventKind` define el contrato observable y estable del
//!   motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ChainError;
use crate::step::{DispatchMode, StepKind};

/// Tipos de eventos soportados.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChainEventKind {
    /// Emisión inicial de una corrida: fija el `definition_hash`, la cantidad
    /// de steps y la longitud de la secuencia fuente. Invariante: debe ser el
    /// primer evento de un `run_id`.
    ChainInitialized {
        definition_hash: String,
        step_count: usize,
        source_len: usize,
    },
    /// Un step comenzó a despachar workers. No implica éxito.
    StepStarted {
        step_index: usize,
        kind: StepKind,
        mode: DispatchMode,
    },
    /// Un step terminó correctamente con `output_len` elementos de salida.
    StepFinished {
        step_index: usize,
        kind: StepKind,
        output_len: usize,
    },
    /// Un step terminó con error terminal. La cadena no continúa
    /// (stop-on-failure).
    StepFailed {
        step_index: usize,
        kind: StepKind,
        error: ChainError,
    },
    /// Evento de cierre: todos los steps finalizaron con éxito.
    ChainCompleted { step_count: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainEvent {
    pub seq: u64, // asignado por EventStore in-memory (orden append)
    pub run_id: Uuid,
    pub kind: ChainEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en el hash de definición)
}
