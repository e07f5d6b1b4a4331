use anyhow::Context;
use clap::ValueEnum;
use qeval::{Angle, Circuit, ExpectationEvaluator, Gate, PauliSum, PauliTerm};
use qgrad::{ShiftRule, gradient};
use tracing::debug;

// The allclose convention the exercises grade with.
const RTOL: f64 = 1e-4;
const ATOL: f64 = 1e-8;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Exercise {
    /// Single-shift rule on two independent single-qubit rotations.
    ParameterShift,
    /// Two-term rule on a three-qubit controlled-rotation circuit.
    ParameterShiftCrx,
}

impl Exercise {
    /// The hard-coded (input, expected) pairs graded for this exercise.
    pub fn built_in_cases(&self) -> Vec<(String, String)> {
        let pairs: &[(&str, &str)] = match self {
            Exercise::ParameterShift => &[("[[0.75, 1.0], 1.23]", "[-0.68164, -0.84147]")],
            Exercise::ParameterShiftCrx => {
                &[("[1.23, 0.6, 4.56]", "[0.08144, -0.33706, -0.37944]")]
            }
        };
        pairs
            .iter()
            .map(|&(input, expected)| (input.to_string(), expected.to_string()))
            .collect()
    }

    /// Decodes one test-case input, computes the gradient and serializes it.
    pub fn run(&self, input: &str) -> anyhow::Result<String> {
        let grad = match self {
            Exercise::ParameterShift => {
                let (params, shift): (Vec<f64>, f64) =
                    serde_json::from_str(input).context("expected input '[[params...], shift]'")?;
                debug!(?params, shift, "decoded test input");
                gradient(
                    &two_rotation_evaluator()?,
                    &params,
                    &ShiftRule::centered(shift),
                )?
            }
            Exercise::ParameterShiftCrx => {
                let params: Vec<f64> =
                    serde_json::from_str(input).context("expected input '[params...]'")?;
                debug!(?params, "decoded test input");
                gradient(
                    &controlled_rotation_evaluator()?,
                    &params,
                    &ShiftRule::controlled_rotation(),
                )?
            }
        };
        Ok(serde_json::to_string(&grad)?)
    }
}

/// RY(θ0) on wire 0 and RX(θ1) on wire 1, measuring Z0 + Z1.
fn two_rotation_evaluator() -> anyhow::Result<ExpectationEvaluator> {
    let circuit = Circuit::new(2)
        .with_gate(Gate::RY {
            qubit: 0,
            theta: Angle::Param(0),
        })
        .with_gate(Gate::RX {
            qubit: 1,
            theta: Angle::Param(1),
        });
    let observable = PauliSum::new()
        .with_term("1.0 * Z0".parse::<PauliTerm>()?)
        .with_term("1.0 * Z1".parse::<PauliTerm>()?);
    Ok(ExpectationEvaluator::new(circuit, observable))
}

/// Hadamards on all wires, then CRX(θ0, 1→2), CRY(θ1, 0→1), CRZ(θ2, 2→0),
/// measuring Z0 + Z1 + X2.
fn controlled_rotation_evaluator() -> anyhow::Result<ExpectationEvaluator> {
    let circuit = Circuit::new(3)
        .with_gate(Gate::H { qubit: 0 })
        .with_gate(Gate::H { qubit: 1 })
        .with_gate(Gate::H { qubit: 2 })
        .with_gate(Gate::CRX {
            control: 1,
            target: 2,
            theta: Angle::Param(0),
        })
        .with_gate(Gate::CRY {
            control: 0,
            target: 1,
            theta: Angle::Param(1),
        })
        .with_gate(Gate::CRZ {
            control: 2,
            target: 0,
            theta: Angle::Param(2),
        });
    let observable = PauliSum::new()
        .with_term("1.0 * Z0".parse::<PauliTerm>()?)
        .with_term("1.0 * Z1".parse::<PauliTerm>()?)
        .with_term("1.0 * X2".parse::<PauliTerm>()?);
    Ok(ExpectationEvaluator::new(circuit, observable))
}

/// Componentwise `|a - b| <= atol + rtol·|b|`, both sides decoded from JSON.
pub fn check(have: &str, want: &str) -> anyhow::Result<bool> {
    let have: Vec<f64> =
        serde_json::from_str(have).context("solution output is not a JSON number array")?;
    let want: Vec<f64> =
        serde_json::from_str(want).context("expected output is not a JSON number array")?;
    Ok(allclose(&have, &want))
}

fn allclose(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(x, y)| (x - y).abs() <= ATOL + RTOL * y.abs())
}
