//! Structural export and import of circuits.
//!
//! The exchange format mirrors what the browser host stores:
//!
//! ```json
//! {
//!   "components": [{ "id": "a", "type": "INPUT", "x": 0, "y": 0, "value": true }],
//!   "connections": [{ "from": "a", "fromOutput": 0, "to": "n1", "toInput": 0 }]
//! }
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use super::validate::check_connection;
use super::Circuit;
use crate::components::{ComponentOptions, ComponentValue};
use crate::engine;
use crate::error::{LogicError, Result};

/// Exported circuit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CircuitData {
    #[serde(default)]
    pub components: Vec<ComponentData>,
    #[serde(default)]
    pub connections: Vec<ConnectionData>,
}

/// Exported component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    pub id: String,
    /// Type name, kept as text so unknown names surface as `UnknownType`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ComponentValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Exported connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionData {
    pub from: String,
    pub from_output: usize,
    pub to: String,
    pub to_input: usize,
}

impl Circuit {
    /// Export every component and connection with its current state.
    pub fn export_circuit(&self) -> CircuitData {
        CircuitData {
            components: self
                .components()
                .map(|c| ComponentData {
                    id: c.id.clone(),
                    kind: c.kind.name().to_string(),
                    x: c.x,
                    y: c.y,
                    value: Some(c.value()),
                    label: c.label.clone(),
                })
                .collect(),
            connections: self
                .connections()
                .iter()
                .map(|c| ConnectionData {
                    from: c.from.clone(),
                    from_output: c.from_output,
                    to: c.to.clone(),
                    to_input: c.to_input,
                })
                .collect(),
        }
    }

    /// Replace this circuit with `data` and run one evaluation pass.
    ///
    /// On failure the circuit is left empty.
    pub fn import_circuit(&mut self, data: &CircuitData) -> Result<()> {
        self.clear();
        let circuit = Self::from_data(data)?;
        info!(
            "imported {} component(s), {} connection(s)",
            circuit.len(),
            circuit.connections().len()
        );
        *self = circuit;
        Ok(())
    }

    /// Build a new circuit from exported data and run one evaluation pass.
    pub fn from_data(data: &CircuitData) -> Result<Self> {
        let mut circuit = Circuit::new();

        for entry in &data.components {
            let mut options = ComponentOptions::new();
            options.label = entry.label.clone();
            circuit.add_component_by_name(
                &entry.kind,
                entry.id.clone(),
                entry.x,
                entry.y,
                options,
            )?;
            if let (Some(value), Some(component)) =
                (&entry.value, circuit.components.get_mut(&entry.id))
            {
                component.restore_value(value)?;
            }
        }

        for entry in &data.connections {
            let connection = circuit
                .connect(&entry.from, entry.from_output, &entry.to, entry.to_input)
                .map_err(|e| LogicError::malformed(e.to_string()))?
                .clone();
            check_connection(&circuit, &connection)
                .map_err(|e| LogicError::malformed(e.to_string()))?;
        }

        engine::simulate(&mut circuit)?;
        Ok(circuit)
    }

    /// Serialize the export to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_circuit())?)
    }

    /// Parse a JSON export into a new circuit.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CircuitData = serde_json::from_str(json)?;
        Self::from_data(&data)
    }
}
