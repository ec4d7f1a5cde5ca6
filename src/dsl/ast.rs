//! Abstract Syntax Tree types for the netlist format.

use crate::circuit::PinRef;
use crate::components::ComponentKind;

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetlistAst {
    /// Component declarations in source order
    pub components: Vec<ComponentDecl>,
    /// `.wire` directives in source order
    pub wires: Vec<WireDecl>,
    /// Component named by the last `.select` directive
    pub selected: Option<String>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component declaration: `TYPE id [x y] [label=...] [value=...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDecl {
    pub kind: ComponentKind,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    /// Initial value for INPUT pegs
    pub value: Option<bool>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A wire: `.wire from[:output] to[:input]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WireDecl {
    pub from: PinRef,
    pub to: PinRef,
    pub line: usize,
}
