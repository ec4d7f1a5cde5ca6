//! Netlist parser for circuit descriptions.
//!
//! A line-oriented, human-editable text format for logic circuits.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".wire" endpoint endpoint | ".select" identifier
//! component   = type identifier [number number] { param }
//! endpoint    = identifier [':' integer]
//! param       = ("label" | "value") '=' (identifier | number | string)
//!
//! type        = "AND" | "OR" | "XOR" | "NAND" | "NOR" | "XNOR" | "NOT"
//!             | "BUFFER" | "INPUT" | "OUTPUT" | "HALF_ADDER"
//!             | "FULL_ADDER" | "MUX_4TO1"
//! identifier  = (letter | '_') { letter | digit | '_' }
//! number      = ['-' | '+'] digit+ ['.' digit+]
//! string      = '"' { any_char except '"' } '"'
//! ```
//!
//! Type names are case-insensitive. Pin indices default to 0. `value` sets an
//! INPUT's initial level (`1`/`0`, `true`/`false`, `high`/`low`).
//!
//! # Example
//!
//! ```text
//! # Half adder
//! INPUT a 0 0 value=1
//! INPUT b 0 40
//! HALF_ADDER ha 80 20
//! OUTPUT sum 160 0 label="Sum"
//! OUTPUT carry 160 40
//!
//! .wire a ha:0
//! .wire b ha:1
//! .wire ha:0 sum
//! .wire ha:1 carry
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_bool, Parser};

use crate::error::{LogicError, Result};

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<NetlistAst> {
    let content = std::fs::read_to_string(path).map_err(|e| LogicError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
