use crate::error::EvalError;
use crate::gates::{Gate, HADAMARD, PAULI_X, rx_matrix, ry_matrix, rz_matrix};
use crate::state::StateVector;

/// An ordered list of gates over a fixed number of wires. Rotation angles
/// may reference slots of the parameter vector passed to [`Circuit::run`],
/// so one circuit value serves every shifted evaluation.
#[derive(Debug, Clone)]
pub struct Circuit {
    pub num_qubits: usize,
    pub gates: Vec<Gate>,
}

impl Circuit {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.add_gate(gate);
        self
    }

    fn check_wire(&self, wire: usize) -> Result<(), EvalError> {
        if wire >= self.num_qubits {
            return Err(EvalError::Qubit(wire));
        }
        Ok(())
    }

    /// Runs the circuit from |0…0⟩ with the given parameter vector and
    /// returns the final state.
    pub fn run(&self, params: &[f64]) -> Result<StateVector, EvalError> {
        let mut state = StateVector::new(self.num_qubits);
        for gate in &self.gates {
            self.apply(&mut state, gate, params)?;
        }
        Ok(state)
    }

    fn apply(&self, state: &mut StateVector, gate: &Gate, params: &[f64]) -> Result<(), EvalError> {
        match *gate {
            Gate::H { qubit } => {
                self.check_wire(qubit)?;
                state.apply_single_qubit_gate(&HADAMARD, qubit);
            }
            Gate::X { qubit } => {
                self.check_wire(qubit)?;
                state.apply_single_qubit_gate(&PAULI_X, qubit);
            }
            Gate::RX { qubit, theta } => {
                self.check_wire(qubit)?;
                state.apply_single_qubit_gate(&rx_matrix(theta.resolve(params)?), qubit);
            }
            Gate::RY { qubit, theta } => {
                self.check_wire(qubit)?;
                state.apply_single_qubit_gate(&ry_matrix(theta.resolve(params)?), qubit);
            }
            Gate::RZ { qubit, theta } => {
                self.check_wire(qubit)?;
                state.apply_single_qubit_gate(&rz_matrix(theta.resolve(params)?), qubit);
            }
            Gate::CX { control, target } => {
                self.check_wire(control)?;
                self.check_wire(target)?;
                state.apply_cx(control, target);
            }
            Gate::CRX {
                control,
                target,
                theta,
            } => {
                self.check_wire(control)?;
                self.check_wire(target)?;
                state.apply_controlled_gate(&rx_matrix(theta.resolve(params)?), control, target);
            }
            Gate::CRY {
                control,
                target,
                theta,
            } => {
                self.check_wire(control)?;
                self.check_wire(target)?;
                state.apply_controlled_gate(&ry_matrix(theta.resolve(params)?), control, target);
            }
            Gate::CRZ {
                control,
                target,
                theta,
            } => {
                self.check_wire(control)?;
                self.check_wire(target)?;
                state.apply_controlled_gate(&rz_matrix(theta.resolve(params)?), control, target);
            }
        }
        Ok(())
    }
}
