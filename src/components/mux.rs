//! 4-to-1 multiplexer.

/// Index of the low select line.
pub const SELECT0: usize = 4;
/// Index of the high select line.
pub const SELECT1: usize = 5;

/// Select one of four data lines.
///
/// Inputs: `[d0, d1, d2, d3, s0, s1]`. Output: `d[s1 * 2 + s0]`.
pub fn mux_4to1(inputs: &[bool]) -> Vec<bool> {
    let select = (inputs[SELECT1] as usize) * 2 + inputs[SELECT0] as usize;
    vec![inputs[select]]
}
