//! Truth table generation.
//!
//! [`TruthTable::generate`] is a pure enumeration over named inputs and a
//! caller-supplied function. [`circuit_truth_table`] drives a copy of a live
//! circuit through every input combination instead.

use std::fmt;

use crate::circuit::Circuit;
use crate::components::ComponentKind;
use crate::engine::simulate;
use crate::error::{LogicError, Result};

/// Largest supported number of inputs (65536 rows).
pub const MAX_INPUTS: usize = 16;

/// One row of a truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthRow<T> {
    /// Input values in input-name order
    pub inputs: Vec<bool>,
    pub output: Option<T>,
}

/// A complete truth table: `2^N` rows for `N` inputs.
///
/// Row `i` assigns bit `N - 1 - k` of `i` to input `k`, so the first input is
/// the most significant bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable<T = bool> {
    pub input_names: Vec<String>,
    pub output_names: Vec<String>,
    pub rows: Vec<TruthRow<T>>,
}

impl<T> TruthTable<T> {
    /// Enumerate every input combination without computing outputs.
    pub fn enumerate<S: AsRef<str>>(input_names: &[S]) -> Result<Self> {
        Self::build(input_names, Vec::new(), None::<fn(&[bool]) -> Result<T>>)
    }

    /// Enumerate every input combination and record `output_fn` for each.
    pub fn generate<S, F>(input_names: &[S], mut output_fn: F) -> Result<Self>
    where
        S: AsRef<str>,
        F: FnMut(&[bool]) -> T,
    {
        Self::build(
            input_names,
            vec!["output".to_string()],
            Some(|inputs: &[bool]| Ok(output_fn(inputs))),
        )
    }

    fn build<S, F>(
        input_names: &[S],
        output_names: Vec<String>,
        mut output_fn: Option<F>,
    ) -> Result<Self>
    where
        S: AsRef<str>,
        F: FnMut(&[bool]) -> Result<T>,
    {
        let n = input_names.len();
        if n > MAX_INPUTS {
            return Err(LogicError::TooManyInputs {
                count: n,
                max: MAX_INPUTS,
            });
        }

        let mut rows = Vec::with_capacity(1 << n);
        for i in 0..(1usize << n) {
            let inputs: Vec<bool> = (0..n).map(|k| (i >> (n - 1 - k)) & 1 == 1).collect();
            let output = match output_fn.as_mut() {
                Some(f) => Some(f(&inputs)?),
                None => None,
            };
            rows.push(TruthRow { inputs, output });
        }

        Ok(Self {
            input_names: input_names.iter().map(|s| s.as_ref().to_string()).collect(),
            output_names,
            rows,
        })
    }

    /// Value of input `name` in row `row`.
    pub fn input(&self, row: usize, name: &str) -> Option<bool> {
        let k = self.input_names.iter().position(|n| n == name)?;
        self.rows.get(row).map(|r| r.inputs[k])
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Truth table of a live circuit.
///
/// `inputs` must name INPUT components. For every combination a copy of
/// `circuit` has those inputs set and one evaluation pass run; the display
/// value of each component in `outputs` is recorded. `circuit` itself is not
/// modified.
pub fn circuit_truth_table(
    circuit: &Circuit,
    inputs: &[&str],
    outputs: &[&str],
) -> Result<TruthTable<Vec<bool>>> {
    for &id in inputs {
        let component = circuit
            .find_component(id)
            .ok_or_else(|| LogicError::unknown_component(id))?;
        if component.kind != ComponentKind::Input {
            return Err(LogicError::NotAnInput { id: id.to_string() });
        }
    }
    for &id in outputs {
        if circuit.find_component(id).is_none() {
            return Err(LogicError::unknown_component(id));
        }
    }

    let mut scratch = circuit.clone();
    TruthTable::build(
        inputs,
        outputs.iter().map(|s| s.to_string()).collect(),
        Some(|values: &[bool]| -> Result<Vec<bool>> {
            for (&id, &value) in inputs.iter().zip(values) {
                scratch.set_input(id, value)?;
            }
            simulate(&mut scratch)?;
            Ok(outputs
                .iter()
                .filter_map(|&id| scratch.find_component(id))
                .map(|c| c.display_value())
                .collect())
        }),
    )
}

fn bit(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, inputs: &[String], outputs: &[String]) -> fmt::Result {
    let header: Vec<&str> = inputs.iter().chain(outputs).map(String::as_str).collect();
    writeln!(f, "{}", header.join(" "))
}

impl fmt::Display for TruthTable<bool> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.input_names, &self.output_names)?;
        for row in &self.rows {
            let mut cells: Vec<&str> = row.inputs.iter().map(|&v| bit(v)).collect();
            cells.extend(row.output.map(bit));
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for TruthTable<Vec<bool>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.input_names, &self.output_names)?;
        for row in &self.rows {
            let cells: Vec<&str> = row
                .inputs
                .iter()
                .chain(row.output.iter().flatten())
                .map(|&v| bit(v))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::components::ComponentOptions;

    #[test]
    fn test_and_table() {
        let table = TruthTable::generate(&["A", "B"], |v| v[0] && v[1]).unwrap();
        assert_eq!(table.len(), 4);
        let rows: Vec<(bool, bool, Option<bool>)> = (0..4)
            .map(|i| {
                (
                    table.input(i, "A").unwrap(),
                    table.input(i, "B").unwrap(),
                    table.rows[i].output,
                )
            })
            .collect();
        assert_eq!(
            rows,
            vec![
                (false, false, Some(false)),
                (false, true, Some(false)),
                (true, false, Some(false)),
                (true, true, Some(true)),
            ]
        );
    }

    #[test]
    fn test_first_name_is_msb() {
        let table = TruthTable::<bool>::enumerate(&["S1", "S0", "X"]).unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.rows[4].inputs, vec![true, false, false]);
        assert_eq!(table.rows[3].inputs, vec![false, true, true]);
        assert!(table.rows.iter().all(|r| r.output.is_none()));
    }

    #[test]
    fn test_zero_inputs_single_row() {
        let table = TruthTable::generate::<&str, _>(&[], |_| true).unwrap();
        assert_eq!(table.rows, vec![TruthRow { inputs: vec![], output: Some(true) }]);
    }

    #[test]
    fn test_mux_reference_table() {
        let names = ["D0", "D1", "D2", "D3", "S0", "S1"];
        let table = TruthTable::generate(&names, |v| {
            crate::components::mux_4to1(v)[0]
        })
        .unwrap();
        assert_eq!(table.len(), 64);
        // D2 = 1, S0 = 0, S1 = 1
        let row = 0b001001;
        assert_eq!(table.rows[row].inputs, vec![false, false, true, false, false, true]);
        assert_eq!(table.rows[row].output, Some(true));
    }

    #[test]
    fn test_too_many_inputs() {
        let names: Vec<String> = (0..17).map(|i| format!("i{i}")).collect();
        assert!(matches!(
            TruthTable::<bool>::enumerate(&names),
            Err(LogicError::TooManyInputs { count: 17, max: 16 })
        ));
    }

    #[test]
    fn test_display() {
        let table = TruthTable::generate(&["A", "B"], |v| v[0] != v[1]).unwrap();
        assert_eq!(table.to_string(), "A B output\n0 0 0\n0 1 1\n1 0 1\n1 1 0\n");
    }

    fn half_adder_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        let o = ComponentOptions::new;
        circuit.add_component(ComponentKind::Input, "a", 0.0, 0.0, o()).unwrap();
        circuit.add_component(ComponentKind::Input, "b", 0.0, 0.0, o()).unwrap();
        circuit.add_component(ComponentKind::HalfAdder, "ha", 0.0, 0.0, o()).unwrap();
        circuit.add_component(ComponentKind::Output, "sum", 0.0, 0.0, o()).unwrap();
        circuit.add_component(ComponentKind::Output, "carry", 0.0, 0.0, o()).unwrap();
        circuit.connect("a", 0, "ha", 0).unwrap();
        circuit.connect("b", 0, "ha", 1).unwrap();
        circuit.connect("ha", 0, "sum", 0).unwrap();
        circuit.connect("ha", 1, "carry", 0).unwrap();
        circuit
    }

    #[test]
    fn test_circuit_truth_table() {
        let circuit = half_adder_circuit();
        let table = circuit_truth_table(&circuit, &["a", "b"], &["sum", "carry"]).unwrap();
        let outputs: Vec<Vec<bool>> = table.rows.iter().filter_map(|r| r.output.clone()).collect();
        assert_eq!(
            outputs,
            vec![
                vec![false, false],
                vec![true, false],
                vec![true, false],
                vec![false, true],
            ]
        );
        assert_eq!(
            table.to_string(),
            "a b sum carry\n0 0 0 0\n0 1 1 0\n1 0 1 0\n1 1 0 1\n"
        );
        // The live circuit is untouched
        assert!(!circuit.find_component("a").unwrap().display_value());
    }

    #[test]
    fn test_circuit_truth_table_rejects_non_input() {
        let circuit = half_adder_circuit();
        assert!(matches!(
            circuit_truth_table(&circuit, &["ha"], &["sum"]),
            Err(LogicError::NotAnInput { .. })
        ));
        assert!(matches!(
            circuit_truth_table(&circuit, &["a"], &["nope"]),
            Err(LogicError::UnknownComponent { .. })
        ));
    }
}
