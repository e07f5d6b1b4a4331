pub mod circuit;
pub mod error;
pub mod evaluator;
pub mod gates;
pub mod observable;
pub mod state;

// Re-export key components for easier access from the binary or other libraries.
pub use circuit::Circuit;
pub use error::EvalError;
pub use evaluator::ExpectationEvaluator;
pub use gates::{Angle, Gate};
pub use observable::{Pauli, PauliSum, PauliTerm};
pub use state::StateVector;
