//! Evaluation engine.
//!
//! One evaluation pass:
//!
//! 1. Order components with a depth-first topological sort over the
//!    connection graph, rejecting cycles
//! 2. Walk that order; for each component, drive its input pins low, refresh
//!    its incoming connections (last connection into a pin wins) and apply
//!    its rule
//! 3. Refresh every connection once more so cached values match the final
//!    outputs
//!
//! The engine keeps no state between passes. Repeating a pass with unchanged
//! inputs yields identical outputs.

mod order;
mod simulator;

pub use order::{evaluation_order, plan, EvaluationPlan};
pub use simulator::{simulate, NoRender, Renderer, Simulator};
