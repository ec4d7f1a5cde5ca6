//! WASM bindings for Logic Sim Core.
//!
//! This module provides JavaScript-friendly bindings for the browser host.
//! The host owns drawing; it mutates the circuit through these methods and
//! reads state back with `export_json` or `component_value`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit } from 'logic_sim_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit();
//! circuit.add_component("INPUT", "a", 20, 40);
//! circuit.add_component("NOT", "n1", 120, 40);
//! circuit.add_component("OUTPUT", "led", 220, 40);
//! circuit.connect("a", 0, "n1", 0);
//! circuit.connect("n1", 0, "led", 0);
//!
//! canvas.onclick = () => circuit.toggle_input("a");
//! requestAnimationFrame(function frame() {
//!   circuit.simulate();
//!   draw(JSON.parse(circuit.export_json()));
//!   requestAnimationFrame(frame);
//! });
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{Circuit, CircuitData};
use crate::components::ComponentOptions;
use crate::dsl;
use crate::engine::Simulator;
use crate::error::LogicError;
use crate::truth_table::circuit_truth_table;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_err(e: LogicError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible logic circuit.
///
/// Wraps a [`Simulator`]; every mutating call re-runs the evaluation pass.
#[wasm_bindgen]
pub struct WasmCircuit {
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Create an empty circuit.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuit {
        WasmCircuit {
            simulator: Simulator::new(Circuit::new()),
        }
    }

    /// Build a circuit from netlist text and run one pass.
    #[wasm_bindgen]
    pub fn from_netlist(netlist: &str) -> Result<WasmCircuit, JsValue> {
        let ast = dsl::parse(netlist).map_err(js_err)?;
        let circuit = Circuit::from_ast(ast).map_err(js_err)?;
        let mut simulator = Simulator::new(circuit);
        simulator.simulate().map_err(js_err)?;
        Ok(WasmCircuit { simulator })
    }

    /// Build a circuit from a JSON export.
    #[wasm_bindgen]
    pub fn from_json(json: &str) -> Result<WasmCircuit, JsValue> {
        let circuit = Circuit::from_json(json).map_err(js_err)?;
        Ok(WasmCircuit {
            simulator: Simulator::new(circuit),
        })
    }

    /// Replace the circuit with a JSON export.
    ///
    /// On failure the current circuit is kept.
    #[wasm_bindgen]
    pub fn import_json(&mut self, json: &str) -> Result<(), JsValue> {
        let data: CircuitData = serde_json::from_str(json)
            .map_err(|e| js_err(LogicError::from(e)))?;
        self.simulator
            .edit(|c| c.import_circuit(&data))
            .map_err(js_err)
    }

    /// Current circuit as JSON.
    #[wasm_bindgen]
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.simulator.circuit().to_json().map_err(js_err)
    }

    /// Add a component by type name.
    #[wasm_bindgen]
    pub fn add_component(&mut self, kind: &str, id: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.add_component_with(kind, id, x, y, None)
    }

    /// Add a component with a label.
    #[wasm_bindgen]
    pub fn add_labeled_component(
        &mut self,
        kind: &str,
        id: &str,
        x: f64,
        y: f64,
        label: &str,
    ) -> Result<(), JsValue> {
        self.add_component_with(kind, id, x, y, Some(label))
    }

    /// Remove a component and its wires. Returns whether it existed.
    #[wasm_bindgen]
    pub fn remove_component(&mut self, id: &str) -> Result<bool, JsValue> {
        self.simulator
            .edit(|c| Ok(c.remove_component(id).is_some()))
            .map_err(js_err)
    }

    /// Wire an output pin to an input pin.
    #[wasm_bindgen]
    pub fn connect(
        &mut self,
        from: &str,
        from_output: usize,
        to: &str,
        to_input: usize,
    ) -> Result<(), JsValue> {
        self.simulator
            .edit(|c| c.connect(from, from_output, to, to_input).map(|_| ()))
            .map_err(js_err)
    }

    /// Remove a wire. Returns whether it existed.
    #[wasm_bindgen]
    pub fn disconnect(
        &mut self,
        from: &str,
        from_output: usize,
        to: &str,
        to_input: usize,
    ) -> Result<bool, JsValue> {
        self.simulator
            .edit(|c| Ok(c.disconnect(from, from_output, to, to_input)))
            .map_err(js_err)
    }

    /// Move a component on the canvas.
    #[wasm_bindgen]
    pub fn move_component(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.simulator
            .edit(|c| c.move_component(id, x, y))
            .map_err(js_err)
    }

    /// Flip an INPUT peg. Returns the new value.
    #[wasm_bindgen]
    pub fn toggle_input(&mut self, id: &str) -> Result<bool, JsValue> {
        self.simulator.toggle_input(id).map_err(js_err)
    }

    /// Set an INPUT peg.
    #[wasm_bindgen]
    pub fn set_input(&mut self, id: &str, value: bool) -> Result<(), JsValue> {
        self.simulator.set_input(id, value).map_err(js_err)
    }

    /// Select a component; an empty id clears the selection.
    #[wasm_bindgen]
    pub fn select(&mut self, id: &str) -> Result<(), JsValue> {
        self.simulator
            .edit(|c| {
                if id.is_empty() {
                    c.clear_selection();
                    Ok(())
                } else {
                    c.select(id)
                }
            })
            .map_err(js_err)
    }

    /// The selected component id.
    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<String> {
        self.simulator.circuit().selected().map(str::to_string)
    }

    /// Run one evaluation pass (call once per animation frame).
    #[wasm_bindgen]
    pub fn simulate(&mut self) -> Result<(), JsValue> {
        self.simulator.simulate().map_err(js_err)
    }

    /// Display value of a component, or `undefined` if it doesn't exist.
    #[wasm_bindgen]
    pub fn component_value(&self, id: &str) -> Option<bool> {
        self.simulator
            .circuit()
            .find_component(id)
            .map(|c| c.display_value())
    }

    /// Truth table over comma-separated INPUT ids and display ids, as text.
    #[wasm_bindgen]
    pub fn truth_table(&self, inputs: &str, outputs: &str) -> Result<String, JsValue> {
        let inputs: Vec<&str> = split_ids(inputs);
        let outputs: Vec<&str> = split_ids(outputs);
        let table = circuit_truth_table(self.simulator.circuit(), &inputs, &outputs)
            .map_err(js_err)?;
        Ok(table.to_string())
    }
}

impl WasmCircuit {
    fn add_component_with(
        &mut self,
        kind: &str,
        id: &str,
        x: f64,
        y: f64,
        label: Option<&str>,
    ) -> Result<(), JsValue> {
        let mut options = ComponentOptions::new();
        options.label = label.map(str::to_string);
        self.simulator
            .edit(|c| c.add_component_by_name(kind, id, x, y, options).map(|_| ()))
            .map_err(js_err)
    }
}

impl Default for WasmCircuit {
    fn default() -> Self {
        Self::new()
    }
}

fn split_ids(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Supported component type names.
#[wasm_bindgen]
pub fn component_types() -> Vec<String> {
    crate::components::ComponentKind::ALL
        .iter()
        .map(|k| k.name().to_string())
        .collect()
}
