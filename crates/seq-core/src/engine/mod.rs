//! Engine module for ChainEngine implementation
//!
//! Provides the core engine, the chained builder methods and the per-run
//! state for chain execution over sequences.

pub mod builder;
pub mod core;
mod run_state;

pub use self::core::ChainEngine;
pub use run_state::RunState;

pub use crate::event::{ChainEvent, ChainEventKind, EventStore, InMemoryEventStore};
pub use crate::step::{StepRunResult, StepStatus};
