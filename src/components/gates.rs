//! Basic logic gates: AND, OR, XOR, NAND, NOR, XNOR, NOT and BUFFER.
//!
//! Two-input gates read pins 0 and 1; single-input gates read pin 0.
//! Every gate drives a single output.

/// `in0 AND in1`
pub fn and(inputs: &[bool]) -> Vec<bool> {
    vec![inputs[0] && inputs[1]]
}

/// `in0 OR in1`
pub fn or(inputs: &[bool]) -> Vec<bool> {
    vec![inputs[0] || inputs[1]]
}

/// `in0 != in1`
pub fn xor(inputs: &[bool]) -> Vec<bool> {
    vec![inputs[0] != inputs[1]]
}

pub fn nand(inputs: &[bool]) -> Vec<bool> {
    vec![!(inputs[0] && inputs[1])]
}

pub fn nor(inputs: &[bool]) -> Vec<bool> {
    vec![!(inputs[0] || inputs[1])]
}

pub fn xnor(inputs: &[bool]) -> Vec<bool> {
    vec![inputs[0] == inputs[1]]
}

/// Inverter.
pub fn not(inputs: &[bool]) -> Vec<bool> {
    vec![!inputs[0]]
}

/// Non-inverting buffer.
pub fn buffer(inputs: &[bool]) -> Vec<bool> {
    vec![inputs[0]]
}
