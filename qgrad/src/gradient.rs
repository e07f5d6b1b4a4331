use crate::evaluator::Evaluator;
use crate::observable::Observable;
use crate::rule::{ShiftRule, ShiftTerm};

/// Decimal places used when reporting gradients to the exercise harness.
pub const REPORT_DECIMALS: u32 = 5;

/// Below this, `2·sin(shift)` is treated as a degenerate normalization.
const NORMALIZATION_EPS: f64 = 1e-12;

#[derive(thiserror::Error, Debug)]
pub enum GradError {
    #[error("shift rule has no terms")]
    EmptyRule,
    #[error("shift {shift} gives a degenerate 2*sin(shift) normalization")]
    DegenerateShift { shift: f64 },
    #[error("circuit evaluation failed: {0}")]
    Evaluation(#[from] anyhow::Error),
}

/// Copy of `params` with component `index` moved by `delta`. The input is
/// never mutated, so the plus and minus evaluations cannot alias.
fn shifted(params: &[f64], index: usize, delta: f64) -> Vec<f64> {
    let mut out = params.to_vec();
    out[index] += delta;
    out
}

/// The parameter-shift gradient of `evaluator` at `params` under `rule`,
/// without the reporting precision applied.
///
/// Component `i` is `Σ_k c_k · (f(params + s_k·e_i) - f(params - s_k·e_i))`,
/// divided by `2·sin(s)` for the centered single-shift form. Every shifted
/// evaluation gets its own freshly copied parameter vector, and the cost is
/// exactly `2·n·|terms|` evaluator calls. Evaluator failures propagate
/// unchanged; nothing is retried.
pub fn raw_gradient<E>(
    evaluator: &E,
    params: &[f64],
    rule: &ShiftRule,
) -> Result<Vec<E::Output>, GradError>
where
    E: Evaluator,
{
    let (terms, normalization) = match rule {
        ShiftRule::Centered { shift } => {
            let norm = 2.0 * shift.sin();
            if norm.abs() < NORMALIZATION_EPS {
                return Err(GradError::DegenerateShift { shift: *shift });
            }
            (
                vec![ShiftTerm {
                    shift: *shift,
                    coefficient: 1.0,
                }],
                Some(norm),
            )
        }
        ShiftRule::Terms(terms) => {
            if terms.is_empty() {
                return Err(GradError::EmptyRule);
            }
            (terms.clone(), None)
        }
    };

    let mut gradient = Vec::with_capacity(params.len());
    for i in 0..params.len() {
        let mut component: Option<E::Output> = None;
        for term in &terms {
            let plus = evaluator.evaluate(&shifted(params, i, term.shift))?;
            let minus = evaluator.evaluate(&shifted(params, i, -term.shift))?;
            let acc = component.get_or_insert_with(|| plus.zeros_like());
            acc.add_scaled_diff(term.coefficient, &plus, &minus);
        }
        let mut component = component.ok_or(GradError::EmptyRule)?;
        if let Some(norm) = normalization {
            component.scale(1.0 / norm);
        }
        gradient.push(component);
    }
    Ok(gradient)
}

/// [`raw_gradient`] with every component rounded to [`REPORT_DECIMALS`]
/// decimal places, the fixed-precision convention the exercise harness
/// compares against.
pub fn gradient<E>(
    evaluator: &E,
    params: &[f64],
    rule: &ShiftRule,
) -> Result<Vec<E::Output>, GradError>
where
    E: Evaluator,
{
    let raw = raw_gradient(evaluator, params, rule)?;
    Ok(raw.iter().map(|g| g.rounded(REPORT_DECIMALS)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use rand::Rng;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-4;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn sine_of_first(params: &[f64]) -> anyhow::Result<f64> {
        Ok(params[0].sin())
    }

    fn sum_of_sines(params: &[f64]) -> anyhow::Result<f64> {
        Ok(params.iter().map(|p| p.sin()).sum())
    }

    fn constant(_params: &[f64]) -> anyhow::Result<f64> {
        Ok(4.2)
    }

    #[test]
    fn sine_derivative_is_cosine() {
        let rule = ShiftRule::centered(FRAC_PI_2);
        for p in [0.0, 0.75, -1.1, 2.9] {
            let grad = gradient(&sine_of_first, &[p], &rule).unwrap();
            assert!(approx_eq(grad[0], p.cos(), TOL), "at {p}: {}", grad[0]);
        }
        // 0.75 is the harness value: cos(0.75) ≈ 0.7317
        let grad = gradient(&sine_of_first, &[0.75], &rule).unwrap();
        assert!(approx_eq(grad[0], 0.7317, TOL));
    }

    #[test]
    fn constant_evaluator_has_zero_gradient() {
        let rule = ShiftRule::centered(1.23);
        let grad = raw_gradient(&constant, &[0.4, -2.0, 7.7], &rule).unwrap();
        for g in grad {
            assert!(approx_eq(g, 0.0, 1e-12));
        }
    }

    #[test]
    fn gradient_has_parameter_shape() {
        let rule = ShiftRule::centered(0.7);
        let mut rng = rand::thread_rng();
        for n in 0..6 {
            let params: Vec<f64> = (0..n).map(|_| rng.gen_range(-3.0..3.0)).collect();
            let grad = gradient(&sum_of_sines, &params, &rule).unwrap();
            assert_eq!(grad.len(), n);
        }
    }

    #[test]
    fn empty_parameters_need_no_evaluations() {
        fn unreachable_eval(_params: &[f64]) -> anyhow::Result<f64> {
            anyhow::bail!("must not be called")
        }
        let rule = ShiftRule::centered(FRAC_PI_2);
        let grad = raw_gradient(&unreachable_eval, &[], &rule).unwrap();
        assert!(grad.is_empty());
    }

    #[test]
    fn estimator_is_linear_in_the_evaluator() {
        fn f(params: &[f64]) -> anyhow::Result<f64> {
            Ok(params[0].sin() + params[1].cos())
        }
        fn g(params: &[f64]) -> anyhow::Result<f64> {
            Ok(params[0].cos() * params[1].sin())
        }
        const C: f64 = 1.75;
        fn combined(params: &[f64]) -> anyhow::Result<f64> {
            Ok(f(params)? + C * g(params)?)
        }

        let rule = ShiftRule::centered(0.9);
        let params = [0.31, -1.2];
        let grad_f = raw_gradient(&f, &params, &rule).unwrap();
        let grad_g = raw_gradient(&g, &params, &rule).unwrap();
        let grad_fg = raw_gradient(&combined, &params, &rule).unwrap();
        for i in 0..params.len() {
            assert!(approx_eq(grad_fg[i], grad_f[i] + C * grad_g[i], 1e-9));
        }
    }

    #[test]
    fn params_are_not_mutated() {
        let rule = ShiftRule::centered(1.23);
        let params = vec![0.75, 1.0];
        let _ = gradient(&sum_of_sines, &params, &rule).unwrap();
        assert_eq!(params, vec![0.75, 1.0]);
    }

    #[test]
    fn two_single_qubit_expectations() {
        // RY(θ0) on one wire and RX(θ1) on another, measuring Z on each:
        // the expectation is cos(θ0) + cos(θ1).
        fn expectation(params: &[f64]) -> anyhow::Result<f64> {
            Ok(params[0].cos() + params[1].cos())
        }
        let rule = ShiftRule::centered(1.23);
        let grad = gradient(&expectation, &[0.75, 1.0], &rule).unwrap();
        assert!(approx_eq(grad[0], -0.68164, TOL));
        assert!(approx_eq(grad[1], -0.84147, TOL));
    }

    #[test]
    fn vector_observables_differentiate_componentwise() {
        fn per_parameter_sines(params: &[f64]) -> anyhow::Result<DVector<f64>> {
            Ok(DVector::from_vec(vec![params[0].sin(), params[1].sin()]))
        }
        let rule = ShiftRule::centered(FRAC_PI_2);
        let params = [0.4, -0.9];
        let grad = raw_gradient(&per_parameter_sines, &params, &rule).unwrap();
        assert_eq!(grad.len(), 2);
        // d out_j / d θ_i is cos(θ_i) on the diagonal and zero elsewhere.
        assert!(approx_eq(grad[0][0], params[0].cos(), 1e-9));
        assert!(approx_eq(grad[0][1], 0.0, 1e-9));
        assert!(approx_eq(grad[1][0], 0.0, 1e-9));
        assert!(approx_eq(grad[1][1], params[1].cos(), 1e-9));
    }

    #[test]
    fn degenerate_centered_shift_is_rejected() {
        let rule = ShiftRule::centered(0.0);
        let err = raw_gradient(&sine_of_first, &[0.5], &rule).unwrap_err();
        assert!(matches!(err, GradError::DegenerateShift { .. }));

        let pi_rule = ShiftRule::centered(std::f64::consts::PI);
        let err = raw_gradient(&sine_of_first, &[0.5], &pi_rule).unwrap_err();
        assert!(matches!(err, GradError::DegenerateShift { .. }));
    }

    #[test]
    fn empty_rule_is_rejected() {
        let rule = ShiftRule::terms(Vec::new());
        let err = raw_gradient(&sine_of_first, &[0.5], &rule).unwrap_err();
        assert!(matches!(err, GradError::EmptyRule));
    }

    #[test]
    fn evaluator_failures_propagate() {
        fn failing(params: &[f64]) -> anyhow::Result<f64> {
            if params[0] > 1.0 {
                anyhow::bail!("amplitude overflow at {}", params[0]);
            }
            Ok(params[0])
        }
        let rule = ShiftRule::centered(FRAC_PI_2);
        let err = raw_gradient(&failing, &[0.9], &rule).unwrap_err();
        assert!(matches!(err, GradError::Evaluation(_)));
        assert!(err.to_string().contains("amplitude overflow"));
    }

    #[test]
    fn reported_gradient_is_rounding_stable() {
        let rule = ShiftRule::centered(1.23);
        let grad = gradient(&sum_of_sines, &[0.75, 1.0], &rule).unwrap();
        let re_rounded: Vec<f64> = grad.iter().map(|g| g.rounded(REPORT_DECIMALS)).collect();
        assert_eq!(grad, re_rounded);
    }
}
