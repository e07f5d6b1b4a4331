use crate::evaluator::Evaluator;
use crate::gradient::{GradError, raw_gradient};
use crate::rule::ShiftRule;

/// Fixed-step gradient descent driven by parameter-shift gradients.
///
/// Each iteration recomputes the full gradient and moves every parameter
/// against it. The unrounded gradient is used; rounding is a reporting
/// convention, not part of the optimization.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    pub step_size: f64,
    pub iterations: usize,
}

impl GradientDescent {
    pub fn new(step_size: f64, iterations: usize) -> Self {
        GradientDescent {
            step_size,
            iterations,
        }
    }

    /// Minimizes a scalar evaluator in place, returning the final value.
    pub fn run<E>(
        &self,
        evaluator: &E,
        params: &mut [f64],
        rule: &ShiftRule,
    ) -> Result<f64, GradError>
    where
        E: Evaluator<Output = f64>,
    {
        for _ in 0..self.iterations {
            let grad = raw_gradient(evaluator, params, rule)?;
            for (p, g) in params.iter_mut().zip(grad.iter()) {
                *p -= self.step_size * g;
            }
        }
        evaluator.evaluate(params).map_err(GradError::from)
    }
}
