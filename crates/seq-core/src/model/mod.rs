//! Modelos neutrales (Sequence y helpers de elementos).

pub mod sequence;

pub use sequence::{truthy, Sequence};
