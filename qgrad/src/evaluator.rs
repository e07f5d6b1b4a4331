use crate::observable::Observable;

/// A circuit evaluator: an opaque map from a parameter vector to an
/// observable value, standing in for a quantum-circuit simulation.
///
/// Implementations must be deterministic and side-effect free over the
/// shifted parameter vectors they are called with. The gradient routines
/// never construct or own an evaluator; the caller supplies one.
pub trait Evaluator {
    type Output: Observable;

    fn evaluate(&self, params: &[f64]) -> anyhow::Result<Self::Output>;
}

impl<O, F> Evaluator for F
where
    O: Observable,
    F: Fn(&[f64]) -> anyhow::Result<O>,
{
    type Output = O;

    fn evaluate(&self, params: &[f64]) -> anyhow::Result<O> {
        self(params)
    }
}
