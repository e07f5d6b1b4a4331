/// A lightweight error enum so callers don't rely on simulator internals.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum EvalError {
    #[error("Invalid qubit index: {0}")]
    Qubit(usize),
    #[error("Parameter index {index} out of range for {len} parameters")]
    Param { index: usize, len: usize },
}
