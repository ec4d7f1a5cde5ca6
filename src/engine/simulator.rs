//! Evaluation pass and the simulator that owns a circuit.

use log::{debug, warn};

use super::order::plan;
use crate::circuit::Circuit;
use crate::error::Result;

/// Run one evaluation pass over `circuit`.
///
/// Components are evaluated in topological order. Before a component is
/// evaluated its input pins are driven low and its incoming connections are
/// refreshed in insertion order, so an undriven pin reads `false` and the last
/// connection into a pin wins. A final sweep over every connection
/// leaves all cached connection values mirroring the final outputs.
///
/// The order is computed before any state is touched: on
/// [`CycleDetected`](crate::LogicError::CycleDetected) the circuit is
/// unchanged.
pub fn simulate(circuit: &mut Circuit) -> Result<()> {
    let plan = plan(circuit)?;

    for &idx in &plan.order {
        if let Some((_, component)) = circuit.components.get_index_mut(idx) {
            component.clear_inputs();
        }
        for &conn_idx in &plan.incoming[idx] {
            propagate(circuit, conn_idx);
        }
        if let Some((_, component)) = circuit.components.get_index_mut(idx) {
            component.evaluate();
        }
    }

    for conn_idx in 0..circuit.connections.len() {
        propagate(circuit, conn_idx);
    }

    debug!(
        "evaluated {} component(s), {} connection(s)",
        plan.order.len(),
        circuit.connections.len()
    );
    Ok(())
}

/// Copy a connection's source output into its cache and its target pin.
fn propagate(circuit: &mut Circuit, conn_idx: usize) {
    let conn = &circuit.connections[conn_idx];
    let value = match circuit.components.get(&conn.from).map(|c| c.output(conn.from_output)) {
        Some(Some(value)) => value,
        Some(None) => {
            warn!("connection {} reads a missing output pin", conn);
            false
        }
        None => false,
    };

    let conn = &mut circuit.connections[conn_idx];
    conn.value = value;
    if let Some(target) = circuit.components.get_mut(&conn.to) {
        if !target.set_input_pin(conn.to_input, value) {
            warn!("connection {} writes a missing input pin", conn);
        }
    }
}

/// A collaborator that draws the circuit after each pass.
pub trait Renderer {
    fn render(&mut self, circuit: &Circuit);
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl Renderer for NoRender {
    fn render(&mut self, _circuit: &Circuit) {}
}

impl<F: FnMut(&Circuit)> Renderer for F {
    fn render(&mut self, circuit: &Circuit) {
        self(circuit)
    }
}

/// Single owner of a circuit.
///
/// Every mutation and evaluation pass goes through `&mut self`, so no caller
/// can observe a circuit halfway through a pass.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    circuit: Circuit,
}

impl Simulator {
    /// Take ownership of `circuit`. No pass is run.
    pub fn new(circuit: Circuit) -> Self {
        Self { circuit }
    }

    /// Run one evaluation pass.
    pub fn simulate(&mut self) -> Result<()> {
        simulate(&mut self.circuit)
    }

    /// Run one pass and hand the result to `renderer`, once per frame.
    pub fn tick(&mut self, renderer: &mut impl Renderer) -> Result<()> {
        self.simulate()?;
        renderer.render(&self.circuit);
        Ok(())
    }

    /// Flip an INPUT and re-evaluate. Returns the new value.
    ///
    /// A circuit that cannot be evaluated is left unchanged.
    pub fn toggle_input(&mut self, id: &str) -> Result<bool> {
        plan(&self.circuit)?;
        let value = self.circuit.toggle_input(id)?;
        self.simulate()?;
        Ok(value)
    }

    /// Set an INPUT and re-evaluate.
    pub fn set_input(&mut self, id: &str, value: bool) -> Result<()> {
        plan(&self.circuit)?;
        self.circuit.set_input(id, value)?;
        self.simulate()
    }

    /// Apply a structural edit and re-evaluate.
    ///
    /// If `edit` or the pass fails, the circuit is restored to its state
    /// before the call.
    pub fn edit<T>(&mut self, edit: impl FnOnce(&mut Circuit) -> Result<T>) -> Result<T> {
        let snapshot = self.circuit.clone();
        let outcome = edit(&mut self.circuit).and_then(|result| {
            simulate(&mut self.circuit)?;
            Ok(result)
        });
        if outcome.is_err() {
            debug!("edit rejected, restoring previous circuit");
            self.circuit = snapshot;
        }
        outcome
    }

    /// The owned circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Release the owned circuit.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }
}
