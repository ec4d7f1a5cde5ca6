//! Evaluation order: depth-first topological sort with cycle detection.

use crate::circuit::Circuit;
use crate::error::{LogicError, Result};

/// DFS marking state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// A dependency-respecting evaluation plan for one pass.
#[derive(Debug, Clone)]
pub struct EvaluationPlan {
    /// Component indices (insertion positions); every component appears after
    /// all components feeding it
    pub order: Vec<usize>,
    /// For each component index, the indices of connections targeting it, in
    /// connection insertion order
    pub incoming: Vec<Vec<usize>>,
}

/// Compute the evaluation plan for `circuit`.
///
/// Roots are taken in component insertion order and feeders in connection
/// insertion order, so the result is deterministic. Fails with
/// [`LogicError::CycleDetected`] if any component transitively feeds itself.
pub fn plan(circuit: &Circuit) -> Result<EvaluationPlan> {
    let n = circuit.components.len();
    let mut incoming = vec![Vec::new(); n];
    let mut feeders: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (conn_idx, conn) in circuit.connections.iter().enumerate() {
        let from = index_of(circuit, &conn.from)?;
        let to = index_of(circuit, &conn.to)?;
        incoming[to].push(conn_idx);
        feeders[to].push(from);
    }

    let mut marks = vec![Mark::Unvisited; n];
    let mut order = Vec::with_capacity(n);
    // (component, next feeder position)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            if let Some(&feeder) = feeders[node].get(frame.1) {
                frame.1 += 1;
                match marks[feeder] {
                    Mark::Unvisited => {
                        marks[feeder] = Mark::InProgress;
                        stack.push((feeder, 0));
                    }
                    Mark::InProgress => {
                        return Err(cycle_error(circuit, &stack, feeder));
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                order.push(node);
                stack.pop();
            }
        }
    }

    Ok(EvaluationPlan { order, incoming })
}

/// Evaluation order as component ids.
pub fn evaluation_order(circuit: &Circuit) -> Result<Vec<String>> {
    let plan = plan(circuit)?;
    Ok(plan
        .order
        .iter()
        .filter_map(|&idx| circuit.components.get_index(idx))
        .map(|(id, _)| id.clone())
        .collect())
}

fn index_of(circuit: &Circuit, id: &str) -> Result<usize> {
    circuit
        .components
        .get_index_of(id)
        .ok_or_else(|| LogicError::unknown_component(id))
}

/// Build the cycle path in signal-flow order, starting and ending at `feeder`.
fn cycle_error(circuit: &Circuit, stack: &[(usize, usize)], feeder: usize) -> LogicError {
    // The stack walks against the signal direction: each entry is fed by the
    // entry above it.
    let start = stack
        .iter()
        .position(|&(node, _)| node == feeder)
        .unwrap_or(0);
    let path = std::iter::once(feeder)
        .chain(stack[start + 1..].iter().rev().map(|&(node, _)| node))
        .chain(std::iter::once(feeder));
    let cycle = path
        .filter_map(|node| circuit.components.get_index(node))
        .map(|(id, _)| id.clone())
        .collect();
    LogicError::CycleDetected { cycle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentKind, ComponentOptions};

    fn circuit_with(ids: &[(&str, ComponentKind)]) -> Circuit {
        let mut circuit = Circuit::new();
        for &(id, kind) in ids {
            circuit
                .add_component(kind, id, 0.0, 0.0, ComponentOptions::new())
                .unwrap();
        }
        circuit
    }

    #[test]
    fn test_upstream_first_even_when_added_last() {
        use ComponentKind::*;
        let mut circuit = circuit_with(&[("n2", Not), ("n1", Not), ("a", Input)]);
        circuit.connect("n1", 0, "n2", 0).unwrap();
        circuit.connect("a", 0, "n1", 0).unwrap();

        assert_eq!(evaluation_order(&circuit).unwrap(), vec!["a", "n1", "n2"]);
    }

    #[test]
    fn test_feeders_follow_connection_order() {
        use ComponentKind::*;
        let mut circuit = circuit_with(&[("g", And), ("x", Input), ("y", Input)]);
        circuit.connect("y", 0, "g", 1).unwrap();
        circuit.connect("x", 0, "g", 0).unwrap();

        assert_eq!(evaluation_order(&circuit).unwrap(), vec!["y", "x", "g"]);
    }

    #[test]
    fn test_unconnected_components_keep_insertion_order() {
        use ComponentKind::*;
        let circuit = circuit_with(&[("c", Or), ("a", Input), ("b", Output)]);
        assert_eq!(evaluation_order(&circuit).unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_diamond_visits_shared_feeder_once() {
        use ComponentKind::*;
        let mut circuit = circuit_with(&[("a", Input), ("l", Not), ("r", Not), ("j", And)]);
        circuit.connect("a", 0, "l", 0).unwrap();
        circuit.connect("a", 0, "r", 0).unwrap();
        circuit.connect("l", 0, "j", 0).unwrap();
        circuit.connect("r", 0, "j", 1).unwrap();

        let plan = plan(&circuit).unwrap();
        assert_eq!(plan.order, vec![0, 1, 2, 3]);
        assert_eq!(plan.incoming[3], vec![2, 3]);
    }

    #[test]
    fn test_cycle_detected_with_path() {
        use ComponentKind::*;
        let mut circuit = circuit_with(&[("a", Not), ("b", Not), ("c", Not)]);
        circuit.connect("a", 0, "b", 0).unwrap();
        circuit.connect("b", 0, "c", 0).unwrap();
        circuit.connect("c", 0, "a", 0).unwrap();

        match evaluation_order(&circuit) {
            Err(LogicError::CycleDetected { cycle }) => {
                assert_eq!(cycle, vec!["a", "b", "c", "a"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_loop_detected() {
        use ComponentKind::*;
        let mut circuit = circuit_with(&[("x", Or)]);
        circuit.connect("x", 0, "x", 1).unwrap();
        match evaluation_order(&circuit) {
            Err(LogicError::CycleDetected { cycle }) => assert_eq!(cycle, vec!["x", "x"]),
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        const LEN: usize = 50_000;
        let mut circuit = Circuit::new();
        // Far end first so the DFS walks the whole chain from its first root
        for i in (0..LEN).rev() {
            let kind = if i == 0 { ComponentKind::Input } else { ComponentKind::Not };
            circuit
                .add_component(kind, format!("n{i}"), 0.0, 0.0, ComponentOptions::new())
                .unwrap();
        }
        for i in 1..LEN {
            circuit
                .connect(&format!("n{}", i - 1), 0, &format!("n{i}"), 0)
                .unwrap();
        }
        let plan = plan(&circuit).unwrap();
        assert_eq!(plan.order.len(), LEN);
        assert_eq!(plan.order[0], LEN - 1);
        assert_eq!(plan.order[LEN - 1], 0);
    }
}
