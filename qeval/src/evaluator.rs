use crate::circuit::Circuit;
use crate::observable::PauliSum;
use qgrad::Evaluator;

/// Evaluates ⟨ψ(params)|O|ψ(params)⟩ for a fixed circuit and observable.
///
/// This is the concrete circuit-evaluator collaborator the gradient
/// estimator is generic over: the circuit and observable are construction
/// parameters, and evaluation is pure with respect to the parameter vector.
pub struct ExpectationEvaluator {
    circuit: Circuit,
    observable: PauliSum,
}

impl ExpectationEvaluator {
    pub fn new(circuit: Circuit, observable: PauliSum) -> Self {
        Self {
            circuit,
            observable,
        }
    }
}

impl Evaluator for ExpectationEvaluator {
    type Output = f64;

    fn evaluate(&self, params: &[f64]) -> anyhow::Result<f64> {
        let state = self.circuit.run(params)?;
        Ok(self.observable.expectation(&state)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::{Angle, Gate};
    use crate::observable::{Pauli, PauliSum, PauliTerm};
    use qgrad::{GradientDescent, ShiftRule, gradient};

    const TOL: f64 = 1e-4;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    /// RY(θ0) on wire 0 and RX(θ1) on wire 1, measuring Z0 + Z1.
    fn two_rotation_evaluator() -> ExpectationEvaluator {
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
            .with_term(PauliTerm::new().with_pauli(0, Pauli::Z))
            .with_term(PauliTerm::new().with_pauli(1, Pauli::Z));
        ExpectationEvaluator::new(circuit, observable)
    }

    /// Hadamards on all three wires, then CRX, CRY and CRZ with one
    /// parameter each, measuring Z0 + Z1 + X2.
    fn controlled_rotation_evaluator() -> ExpectationEvaluator {
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
            .with_term(PauliTerm::new().with_pauli(0, Pauli::Z))
            .with_term(PauliTerm::new().with_pauli(1, Pauli::Z))
            .with_term(PauliTerm::new().with_pauli(2, Pauli::X));
        ExpectationEvaluator::new(circuit, observable)
    }

    #[test]
    fn independent_rotations_match_the_closed_form() {
        let evaluator = two_rotation_evaluator();
        let value = evaluator.evaluate(&[0.75, 1.0]).unwrap();
        assert!(approx_eq(value, 0.75f64.cos() + 1.0f64.cos(), 1e-9));
    }

    #[test]
    fn single_shift_gradient_of_the_two_rotation_circuit() {
        let evaluator = two_rotation_evaluator();
        let rule = ShiftRule::centered(1.23);
        let grad = gradient(&evaluator, &[0.75, 1.0], &rule).unwrap();
        assert!(approx_eq(grad[0], -0.68164, TOL));
        assert!(approx_eq(grad[1], -0.84147, TOL));
    }

    #[test]
    fn two_term_gradient_of_the_controlled_rotation_circuit() {
        let evaluator = controlled_rotation_evaluator();
        let rule = ShiftRule::controlled_rotation();
        let grad = gradient(&evaluator, &[1.23, 0.6, 4.56], &rule).unwrap();
        assert!(approx_eq(grad[0], 0.08144, TOL));
        assert!(approx_eq(grad[1], -0.33706, TOL));
        assert!(approx_eq(grad[2], -0.37944, TOL));
    }

    #[test]
    fn descent_aligns_a_rotation_with_the_observable() {
        // Minimizing ⟨Z⟩ after RY(θ) drives θ to π, where ⟨Z⟩ = -1.
        let circuit = Circuit::new(1).with_gate(Gate::RY {
            qubit: 0,
            theta: Angle::Param(0),
        });
        let observable = PauliSum::new().with_term(PauliTerm::new().with_pauli(0, Pauli::Z));
        let evaluator = ExpectationEvaluator::new(circuit, observable);

        let opt = GradientDescent::new(0.4, 60);
        let mut params = vec![0.5];
        let energy = opt
            .run(
                &evaluator,
                &mut params,
                &ShiftRule::centered(std::f64::consts::FRAC_PI_2),
            )
            .unwrap();
        assert!(approx_eq(energy, -1.0, 1e-3), "energy {energy}");
    }
}
