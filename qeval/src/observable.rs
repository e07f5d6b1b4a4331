use crate::error::EvalError;
use crate::gates::{PAULI_X, PAULI_Y, PAULI_Z};
use crate::state::{GateMatrix, StateVector};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    fn matrix(self) -> Option<GateMatrix> {
        match self {
            Pauli::I => None,
            Pauli::X => Some(PAULI_X),
            Pauli::Y => Some(PAULI_Y),
            Pauli::Z => Some(PAULI_Z),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One weighted Pauli string, e.g. `0.5 * X0 Z1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    pub coefficient: f64,
    pub operators: Vec<(Pauli, usize)>, // Vec of (Pauli type, wire index)
}

impl PauliTerm {
    pub fn new() -> Self {
        PauliTerm {
            coefficient: 1.0,
            operators: Vec::new(),
        }
    }

    pub fn with_pauli(mut self, wire: usize, pauli: Pauli) -> Self {
        if pauli != Pauli::I {
            self.operators.push((pauli, wire));
            self.operators.sort_by_key(|&(_, w)| w);
        }
        self
    }

    pub fn with_coefficient(mut self, coefficient: f64) -> Self {
        self.coefficient = coefficient;
        self
    }

    /// Non-destructive ⟨ψ|P|ψ⟩ for this Pauli string, without the
    /// coefficient. The string is applied to a copy of the state and the
    /// overlap with the original is taken.
    fn expectation(&self, state: &StateVector) -> Result<f64, EvalError> {
        let mut phi = state.clone();
        for &(pauli, wire) in &self.operators {
            if wire >= state.num_qubits {
                return Err(EvalError::Qubit(wire));
            }
            if let Some(matrix) = pauli.matrix() {
                phi.apply_single_qubit_gate(&matrix, wire);
            }
        }
        Ok(state.inner_product(&phi).re)
    }
}

impl Default for PauliTerm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("malformed Pauli term")]
pub struct PauliTermParseError;

impl FromStr for PauliTerm {
    type Err = PauliTermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('*').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err(PauliTermParseError);
        }

        let coefficient = parts[0].parse::<f64>().map_err(|_| PauliTermParseError)?;
        let operator_str = parts[1];

        let mut term = PauliTerm::new().with_coefficient(coefficient);

        for op in operator_str.split_whitespace() {
            if op.len() < 2 {
                return Err(PauliTermParseError);
            }
            let (pauli_char, wire_str) = op.split_at(1);
            let wire = wire_str.parse::<usize>().map_err(|_| PauliTermParseError)?;

            let pauli = match pauli_char {
                "X" | "x" => Pauli::X,
                "Y" | "y" => Pauli::Y,
                "Z" | "z" => Pauli::Z,
                "I" | "i" => Pauli::I,
                _ => return Err(PauliTermParseError),
            };
            term = term.with_pauli(wire, pauli);
        }

        Ok(term)
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", self.coefficient)?;
        if !self.operators.is_empty() {
            write!(f, " *")?;
            for (pauli, wire) in &self.operators {
                write!(f, " {}{}", pauli, wire)?;
            }
        }
        Ok(())
    }
}

/// A sum of weighted Pauli strings, the observables the exercises measure.
#[derive(Debug, Clone, Default)]
pub struct PauliSum {
    pub terms: Vec<PauliTerm>,
}

impl PauliSum {
    pub fn new() -> Self {
        PauliSum { terms: Vec::new() }
    }

    pub fn add_term(&mut self, term: PauliTerm) {
        self.terms.push(term);
    }

    pub fn with_term(mut self, term: PauliTerm) -> Self {
        self.add_term(term);
        self
    }

    /// ⟨ψ|O|ψ⟩ summed over all terms, coefficients applied.
    pub fn expectation(&self, state: &StateVector) -> Result<f64, EvalError> {
        let mut total = 0.0;
        for term in &self.terms {
            total += term.coefficient * term.expectation(state)?;
        }
        Ok(total)
    }
}

impl fmt::Display for PauliSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "\n+ ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}
