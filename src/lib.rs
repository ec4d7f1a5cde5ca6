//! # Logic Sim Core
//!
//! The simulation core of an in-browser digital logic teaching tool.
//!
//! This library provides:
//! - A closed set of logic components (gates, I/O pegs, adders, a multiplexer)
//!   each with a pure evaluation rule
//! - A circuit graph with referential integrity between components and wires
//! - A deterministic single-pass evaluation engine over a topological order
//! - Truth table generation, both from a boolean function and from a circuit
//! - JSON export/import and a text netlist format
//!
//! ## Architecture
//!
//! - [`components`] - Component kinds, pin layout and the evaluation rule table
//! - [`circuit`] - Circuit graph, validation and export/import
//! - [`engine`] - Evaluation order and evaluation pass
//! - [`truth_table`] - Truth table enumeration
//! - [`dsl`] - Parser for the netlist format
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! logicsim half_adder.lsim --set a=1 --set b=1
//! logicsim half_adder.lsim --truth-table --inputs a,b --outputs sum,carry
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuit } from 'logic_sim_core';
//!
//! const circuit = WasmCircuit.from_netlist(netlist);
//! circuit.toggle_input("a");
//! const state = JSON.parse(circuit.export_json());
//! ```
//!
//! ## Evaluation
//!
//! Every user action (toggling an input, adding or removing a component) or
//! animation tick runs one full evaluation pass:
//!
//! 1. Sort components so each follows everything that feeds it
//! 2. In that order, copy values along incoming wires, then apply the rule
//! 3. Refresh every wire's cached value
//!
//! Cycles are rejected. One pass settles any acyclic circuit.

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod engine;
pub mod error;
pub mod truth_table;

// Re-export main types for convenience
pub use circuit::{Circuit, CircuitData, Connection};
pub use components::{Component, ComponentKind, ComponentOptions, ComponentValue};
pub use engine::{simulate, Renderer, Simulator};
pub use error::{LogicError, Result};
pub use truth_table::{circuit_truth_table, TruthTable};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
