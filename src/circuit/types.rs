//! Core types for circuit representation.

use std::fmt;

/// One end of a connection: a component id and a pin index on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinRef {
    pub component: String,
    pub pin: usize,
}

impl PinRef {
    pub fn new(component: impl Into<String>, pin: usize) -> Self {
        Self {
            component: component.into(),
            pin,
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.pin)
    }
}

/// A directed wire from an output pin to an input pin.
///
/// Identity is the four-tuple of endpoints; `value` caches the source's most
/// recently propagated output.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from: String,
    pub from_output: usize,
    pub to: String,
    pub to_input: usize,
    pub value: bool,
}

impl Connection {
    pub(crate) fn new(
        from: impl Into<String>,
        from_output: usize,
        to: impl Into<String>,
        to_input: usize,
    ) -> Self {
        Self {
            from: from.into(),
            from_output,
            to: to.into(),
            to_input,
            value: false,
        }
    }

    /// Source pin.
    pub fn source(&self) -> PinRef {
        PinRef::new(self.from.clone(), self.from_output)
    }

    /// Destination pin.
    pub fn target(&self) -> PinRef {
        PinRef::new(self.to.clone(), self.to_input)
    }

    /// Check if either endpoint is the given component.
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }

    /// Check if this connection has the given endpoints.
    pub fn matches(&self, from: &str, from_output: usize, to: &str, to_input: usize) -> bool {
        self.from == from
            && self.from_output == from_output
            && self.to == to
            && self.to_input == to_input
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{}",
            self.from, self.from_output, self.to, self.to_input
        )
    }
}
