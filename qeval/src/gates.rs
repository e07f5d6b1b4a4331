use crate::error::EvalError;
use crate::state::GateMatrix;
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

/// A rotation angle: either a literal value or a slot in the parameter
/// vector the circuit is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
    Fixed(f64),
    Param(usize),
}

impl Angle {
    pub fn resolve(&self, params: &[f64]) -> Result<f64, EvalError> {
        match *self {
            Angle::Fixed(theta) => Ok(theta),
            Angle::Param(index) => params.get(index).copied().ok_or(EvalError::Param {
                index,
                len: params.len(),
            }),
        }
    }
}

/// The gate set of the parametrized circuits we differentiate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    H { qubit: usize },
    X { qubit: usize },
    RX { qubit: usize, theta: Angle },
    RY { qubit: usize, theta: Angle },
    RZ { qubit: usize, theta: Angle },
    CX { control: usize, target: usize },
    CRX { control: usize, target: usize, theta: Angle },
    CRY { control: usize, target: usize, theta: Angle },
    CRZ { control: usize, target: usize, theta: Angle },
}

pub const HADAMARD: GateMatrix = [
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

pub const PAULI_X: GateMatrix = [
    [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
];

pub const PAULI_Y: GateMatrix = [
    [Complex::new(0.0, 0.0), Complex::new(0.0, -1.0)],
    [Complex::new(0.0, 1.0), Complex::new(0.0, 0.0)],
];

pub const PAULI_Z: GateMatrix = [
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
    [Complex::new(0.0, 0.0), Complex::new(-1.0, 0.0)],
];

/// Rx(θ) = cos(θ/2) I - i sin(θ/2) X
pub fn rx_matrix(theta: f64) -> GateMatrix {
    let c = theta * 0.5;
    let (ct, st) = (c.cos(), c.sin());
    [
        [Complex::new(ct, 0.0), Complex::new(0.0, -st)],
        [Complex::new(0.0, -st), Complex::new(ct, 0.0)],
    ]
}

/// Ry(θ) = cos(θ/2) I - i sin(θ/2) Y  -> matrix is real
pub fn ry_matrix(theta: f64) -> GateMatrix {
    let c = theta * 0.5;
    let (ct, st) = (c.cos(), c.sin());
    [
        [Complex::new(ct, 0.0), Complex::new(-st, 0.0)],
        [Complex::new(st, 0.0), Complex::new(ct, 0.0)],
    ]
}

/// Rz(θ) = diag(e^{-iθ/2}, e^{+iθ/2})
pub fn rz_matrix(theta: f64) -> GateMatrix {
    let c = theta * 0.5;
    let (ct, st) = (c.cos(), c.sin());
    [
        [Complex::new(ct, -st), Complex::new(0.0, 0.0)],
        [Complex::new(0.0, 0.0), Complex::new(ct, st)],
    ]
}
