//! Circuit graph representation and validation.
//!
//! This module provides the [`Circuit`] graph: components keyed by id in
//! insertion order and the connections between their pins. It also owns the
//! structural export/import format used by the browser host.

mod export;
mod graph;
mod types;
mod validate;

pub use export::{CircuitData, ComponentData, ConnectionData};
pub use graph::Circuit;
pub use types::*;
pub use validate::{check_connection, validate_circuit};
