//! Circuit validation.

use crate::error::{LogicError, PinDirection, Result};

use super::{Circuit, Connection};

/// Validate a circuit for simulation.
///
/// Checks:
/// - Every connection references components in the circuit
/// - Every connection's pin indices are within the endpoints' pin counts
/// - The connection graph is acyclic
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    for connection in circuit.connections() {
        check_connection(circuit, connection)?;
    }
    crate::engine::evaluation_order(circuit)?;
    Ok(())
}

/// Check one connection's endpoints and pin bounds.
pub fn check_connection(circuit: &Circuit, connection: &Connection) -> Result<()> {
    let from = circuit
        .find_component(&connection.from)
        .ok_or_else(|| LogicError::unknown_component(&connection.from))?;
    let to = circuit
        .find_component(&connection.to)
        .ok_or_else(|| LogicError::unknown_component(&connection.to))?;

    let outputs = from.kind.output_count();
    if connection.from_output >= outputs {
        return Err(LogicError::InvalidPin {
            id: from.id.clone(),
            direction: PinDirection::Output,
            pin: connection.from_output,
            count: outputs,
        });
    }

    let inputs = to.kind.input_count();
    if connection.to_input >= inputs {
        return Err(LogicError::InvalidPin {
            id: to.id.clone(),
            direction: PinDirection::Input,
            pin: connection.to_input,
            count: inputs,
        });
    }

    Ok(())
}
