//! Component models for logic simulation.
//!
//! This module provides every supported circuit element:
//! - Gates: AND, OR, XOR, NAND, NOR, XNOR, NOT, BUFFER
//! - I/O pegs: INPUT (externally driven), OUTPUT (display only)
//! - Arithmetic: HALF_ADDER, FULL_ADDER
//! - Routing: MUX_4TO1
//!
//! Each kind maps to a pure evaluation [`Rule`] through a single table in
//! [`ComponentKind::rule`]. Rules never look at connections; the evaluation
//! engine writes input pins before calling them.

mod arithmetic;
mod gates;
mod mux;

pub use arithmetic::{full_adder, half_adder};
pub use gates::{and, buffer, nand, nor, not, or, xnor, xor};
pub use mux::{mux_4to1, SELECT0, SELECT1};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LogicError, Result};

/// Pure evaluation rule: input pin values in, output values out.
pub type Rule = fn(&[bool]) -> Vec<bool>;

/// The closed set of component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    Not,
    Buffer,
    /// Externally driven source peg
    Input,
    /// Display peg; shows the value on its single input
    Output,
    HalfAdder,
    FullAdder,
    /// Four data lines, two select lines
    Mux4To1,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 13] = [
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Nand,
        Self::Nor,
        Self::Xnor,
        Self::Not,
        Self::Buffer,
        Self::Input,
        Self::Output,
        Self::HalfAdder,
        Self::FullAdder,
        Self::Mux4To1,
    ];

    /// Canonical type name as used in exports and netlists.
    pub fn name(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Xnor => "XNOR",
            Self::Not => "NOT",
            Self::Buffer => "BUFFER",
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
            Self::HalfAdder => "HALF_ADDER",
            Self::FullAdder => "FULL_ADDER",
            Self::Mux4To1 => "MUX_4TO1",
        }
    }

    /// Look up a kind by its canonical name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Number of input pins. Fixed for the lifetime of a component.
    pub fn input_count(&self) -> usize {
        match self {
            Self::And | Self::Or | Self::Xor | Self::Nand | Self::Nor | Self::Xnor => 2,
            Self::Not | Self::Buffer => 1,
            Self::Input => 0,
            Self::Output => 1,
            // A, B
            Self::HalfAdder => 2,
            // A, B, Cin
            Self::FullAdder => 3,
            // d0..d3, s0, s1
            Self::Mux4To1 => 6,
        }
    }

    /// Number of output pins. Fixed for the lifetime of a component.
    pub fn output_count(&self) -> usize {
        match self {
            Self::Output => 0,
            // Sum, Carry
            Self::HalfAdder | Self::FullAdder => 2,
            _ => 1,
        }
    }

    /// The evaluation rule table.
    ///
    /// `None` for INPUT, whose value is set from outside.
    pub fn rule(&self) -> Option<Rule> {
        let rule: Rule = match self {
            Self::And => and,
            Self::Or => or,
            Self::Xor => xor,
            Self::Nand => nand,
            Self::Nor => nor,
            Self::Xnor => xnor,
            Self::Not => not,
            Self::Buffer => buffer,
            Self::Input => return None,
            Self::Output => display,
            Self::HalfAdder => half_adder,
            Self::FullAdder => full_adder,
            Self::Mux4To1 => mux_4to1,
        };
        Some(rule)
    }

    /// Evaluate this kind's rule against `inputs`.
    pub fn evaluate(&self, inputs: &[bool]) -> Option<Vec<bool>> {
        debug_assert_eq!(inputs.len(), self.input_count());
        self.rule().map(|rule| rule(inputs))
    }
}

/// OUTPUT drives nothing; its display value is its input pin.
fn display(_inputs: &[bool]) -> Vec<bool> {
    Vec::new()
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| LogicError::UnknownType { kind: s.to_string() })
    }
}

/// Exported state of a component.
///
/// Single-output kinds (and OUTPUT's display) export a bool, multi-output
/// kinds export one bool per output pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Single(bool),
    Multi(Vec<bool>),
}

/// Optional settings for a new component.
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    /// Text shown next to the component
    pub label: Option<String>,
    /// Initial value of an INPUT peg
    pub value: Option<bool>,
}

impl ComponentOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the initial value (INPUT only).
    pub fn with_value(mut self, value: bool) -> Self {
        self.value = Some(value);
        self
    }
}

/// A circuit component.
///
/// Pin vectors are sized from the kind at construction and never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: String,
    pub kind: ComponentKind,
    /// Layout position; not used by evaluation
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    inputs: Vec<bool>,
    outputs: Vec<bool>,
}

impl Component {
    /// Create a new component. Only the circuit graph constructs components.
    pub(crate) fn new(
        id: String,
        kind: ComponentKind,
        x: f64,
        y: f64,
        options: ComponentOptions,
    ) -> Self {
        let mut component = Self {
            id,
            kind,
            x,
            y,
            label: options.label,
            inputs: vec![false; kind.input_count()],
            outputs: vec![false; kind.output_count()],
        };
        if let (ComponentKind::Input, Some(value)) = (kind, options.value) {
            component.outputs[0] = value;
        }
        component
    }

    /// Current input pin values.
    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }

    /// Last computed output values.
    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    /// Value of output pin `index`, if it exists.
    pub fn output(&self, index: usize) -> Option<bool> {
        self.outputs.get(index).copied()
    }

    /// Value of input pin `index`, if it exists.
    pub fn input(&self, index: usize) -> Option<bool> {
        self.inputs.get(index).copied()
    }

    /// Write an input pin. Returns `false` when the pin does not exist.
    pub(crate) fn set_input_pin(&mut self, index: usize, value: bool) -> bool {
        match self.inputs.get_mut(index) {
            Some(pin) => {
                *pin = value;
                true
            }
            None => false,
        }
    }

    /// Drive every input pin low.
    pub(crate) fn clear_inputs(&mut self) {
        self.inputs.fill(false);
    }

    /// Recompute outputs from the current input pins.
    ///
    /// INPUT components are left untouched.
    pub fn evaluate(&mut self) {
        if let Some(outputs) = self.kind.evaluate(&self.inputs) {
            self.outputs = outputs;
        }
    }

    /// Flip an INPUT peg. Returns the new value.
    pub fn toggle(&mut self) -> Result<bool> {
        self.ensure_input()?;
        self.outputs[0] = !self.outputs[0];
        Ok(self.outputs[0])
    }

    /// Set an INPUT peg's value.
    pub fn set_value(&mut self, value: bool) -> Result<()> {
        self.ensure_input()?;
        self.outputs[0] = value;
        Ok(())
    }

    fn ensure_input(&self) -> Result<()> {
        if self.kind == ComponentKind::Input {
            Ok(())
        } else {
            Err(LogicError::NotAnInput {
                id: self.id.clone(),
            })
        }
    }

    /// The value a renderer shows for this component: an OUTPUT's input,
    /// otherwise the first output.
    pub fn display_value(&self) -> bool {
        match self.kind {
            ComponentKind::Output => self.inputs[0],
            _ => self.outputs[0],
        }
    }

    /// Current state in export form.
    pub fn value(&self) -> ComponentValue {
        match self.kind.output_count() {
            0 | 1 => ComponentValue::Single(self.display_value()),
            _ => ComponentValue::Multi(self.outputs.clone()),
        }
    }

    /// Restore state from an exported value.
    pub(crate) fn restore_value(&mut self, value: &ComponentValue) -> Result<()> {
        match (self.kind.output_count(), value) {
            (0, ComponentValue::Single(v)) => self.inputs[0] = *v,
            (1, ComponentValue::Single(v)) => self.outputs[0] = *v,
            (n, ComponentValue::Multi(values)) if n > 1 && values.len() == n => {
                self.outputs.copy_from_slice(values);
            }
            (n, _) => {
                return Err(LogicError::malformed(format!(
                    "value of '{}' ({}) does not match its {} output(s)",
                    self.id, self.kind, n
                )));
            }
        }
        Ok(())
    }
}
