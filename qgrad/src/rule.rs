use std::f64::consts::{FRAC_PI_2, SQRT_2};

/// One (shift, coefficient) pair of a finite-difference formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftTerm {
    pub shift: f64,
    pub coefficient: f64,
}

/// A parameter-shift rule: the evaluation points and weights used to
/// reconstruct one partial derivative from shifted circuit evaluations.
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftRule {
    /// Single-shift rule. The difference `f(θ + s) - f(θ - s)` is divided
    /// by `2·sin(s)`, so the same rule works for any non-degenerate shift.
    Centered { shift: f64 },
    /// Multi-term rule. Normalization is already folded into the signed
    /// coefficients and no further division is applied.
    Terms(Vec<ShiftTerm>),
}

impl ShiftRule {
    /// The single-shift rule for Pauli-rotation gates, valid for any shift
    /// with `sin(shift) != 0`.
    pub fn centered(shift: f64) -> Self {
        ShiftRule::Centered { shift }
    }

    /// A rule from explicit (shift, coefficient) terms.
    pub fn terms(terms: Vec<ShiftTerm>) -> Self {
        ShiftRule::Terms(terms)
    }

    /// The two-shift rule for controlled rotations (CRX, CRY, CRZ).
    ///
    /// The generator of a controlled rotation has eigenvalue gaps at both
    /// 1/2 and 1, so a single centered shift is not enough. The second
    /// coefficient carries its sign, making the combination a plain sum of
    /// `coefficient · (f(θ + s) - f(θ - s))` terms.
    pub fn controlled_rotation() -> Self {
        let c_wide = (SQRT_2 + 1.0) / (4.0 * SQRT_2);
        let c_narrow = (SQRT_2 - 1.0) / (4.0 * SQRT_2);
        ShiftRule::Terms(vec![
            ShiftTerm {
                shift: FRAC_PI_2,
                coefficient: c_wide,
            },
            ShiftTerm {
                shift: 3.0 * FRAC_PI_2,
                coefficient: -c_narrow,
            },
        ])
    }
}
