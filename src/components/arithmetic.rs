//! Arithmetic blocks: half adder and full adder.

/// Half adder.
///
/// Inputs: `[A, B]`. Outputs: `[Sum, Carry]`.
pub fn half_adder(inputs: &[bool]) -> Vec<bool> {
    let (a, b) = (inputs[0], inputs[1]);
    vec![a != b, a && b]
}

/// Full adder.
///
/// Inputs: `[A, B, Cin]`. Outputs: `[Sum, Cout]` where
/// `Cout = (A & B) | (Cin & (A ^ B))`.
pub fn full_adder(inputs: &[bool]) -> Vec<bool> {
    let (a, b, cin) = (inputs[0], inputs[1], inputs[2]);
    let partial = a != b;
    vec![partial != cin, (a && b) || (cin && partial)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_adder() {
        assert_eq!(half_adder(&[false, false]), vec![false, false]);
        assert_eq!(half_adder(&[false, true]), vec![true, false]);
        assert_eq!(half_adder(&[true, false]), vec![true, false]);
        assert_eq!(half_adder(&[true, true]), vec![false, true]);
    }

    #[test]
    fn test_full_adder_matches_integer_addition() {
        for bits in 0u8..8 {
            let a = bits & 0b100 != 0;
            let b = bits & 0b010 != 0;
            let cin = bits & 0b001 != 0;
            let total = a as u8 + b as u8 + cin as u8;

            let out = full_adder(&[a, b, cin]);
            assert_eq!(out[0], total & 1 == 1, "sum for {a} {b} {cin}");
            assert_eq!(out[1], total >= 2, "carry for {a} {b} {cin}");
        }
    }

    #[test]
    fn test_full_adder_all_ones() {
        assert_eq!(full_adder(&[true, true, true]), vec![true, true]);
    }
}
