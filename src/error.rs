//! Error types for the logic circuit simulator.
//!
//! This module provides a unified error type [`LogicError`] that covers
//! all error conditions that can occur during netlist parsing, graph mutation,
//! evaluation, and import/export.

use thiserror::Error;

/// Result type alias using [`LogicError`].
pub type Result<T> = std::result::Result<T, LogicError>;

/// Which side of a component a pin index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

impl std::fmt::Display for PinDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinDirection::Input => write!(f, "input"),
            PinDirection::Output => write!(f, "output"),
        }
    }
}

/// Unified error type for all simulator operations.
#[derive(Error, Debug)]
pub enum LogicError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    // ============ Graph Errors ============
    /// A component with this id already exists
    #[error("Duplicate component id '{id}'")]
    DuplicateId { id: String },

    /// Component type name is not in the variant set
    #[error("Unknown component type '{kind}'")]
    UnknownType { kind: String },

    /// Referenced component does not exist
    #[error("Component '{id}' not found in circuit")]
    UnknownComponent { id: String },

    /// Operation only valid for INPUT components
    #[error("Component '{id}' is not an INPUT")]
    NotAnInput { id: String },

    /// Pin index outside the component's fixed pin count
    #[error("Invalid {direction} pin {pin} on '{id}' (component has {count})")]
    InvalidPin {
        id: String,
        direction: PinDirection,
        pin: usize,
        count: usize,
    },

    // ============ Evaluation Errors ============
    /// The connection graph contains a cycle
    #[error("Cycle detected in circuit: {}", cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    /// Truth table arity above the supported maximum
    #[error("Truth table with {count} inputs exceeds the maximum of {max}")]
    TooManyInputs { count: usize, max: usize },

    // ============ Import/Export Errors ============
    /// Import data is structurally invalid
    #[error("Malformed circuit import: {message}")]
    MalformedImport { message: String },

    /// JSON (de)serialization failure
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LogicError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown component error
    pub fn unknown_component(id: impl Into<String>) -> Self {
        Self::UnknownComponent { id: id.into() }
    }

    /// Create a malformed import error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedImport {
            message: message.into(),
        }
    }
}
