use nalgebra::DVector;

/// Rounds a value to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// The value a circuit evaluator returns: a scalar expectation value or a
/// small fixed-shape tensor. Gradient components have the same shape as the
/// evaluations they are combined from.
pub trait Observable: Clone {
    /// The additive identity with the same shape as `self`.
    fn zeros_like(&self) -> Self;

    /// Accumulates `coefficient · (plus - minus)` into `self`, componentwise.
    fn add_scaled_diff(&mut self, coefficient: f64, plus: &Self, minus: &Self);

    /// Multiplies every component by `factor`.
    fn scale(&mut self, factor: f64);

    /// Componentwise rounding to `decimals` decimal places.
    fn rounded(&self, decimals: u32) -> Self;
}

impl Observable for f64 {
    fn zeros_like(&self) -> Self {
        0.0
    }

    fn add_scaled_diff(&mut self, coefficient: f64, plus: &Self, minus: &Self) {
        *self += coefficient * (plus - minus);
    }

    fn scale(&mut self, factor: f64) {
        *self *= factor;
    }

    fn rounded(&self, decimals: u32) -> Self {
        round_to(*self, decimals)
    }
}

impl Observable for DVector<f64> {
    fn zeros_like(&self) -> Self {
        DVector::zeros(self.len())
    }

    fn add_scaled_diff(&mut self, coefficient: f64, plus: &Self, minus: &Self) {
        for (acc, (p, m)) in self.iter_mut().zip(plus.iter().zip(minus.iter())) {
            *acc += coefficient * (p - m);
        }
    }

    fn scale(&mut self, factor: f64) {
        *self *= factor;
    }

    fn rounded(&self, decimals: u32) -> Self {
        self.map(|x| round_to(x, decimals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_idempotent() {
        for x in [0.123456789, -0.987654321, 1.000004999, -3.5e-6, 0.0] {
            let once = round_to(x, 5);
            let twice = round_to(once, 5);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn rounds_to_five_decimals() {
        assert_eq!(round_to(-0.681640246, 5), -0.68164);
        assert_eq!(round_to(0.9999999, 5), 1.0);
    }

    #[test]
    fn scalar_accumulation() {
        let mut acc = 0.0f64.zeros_like();
        acc.add_scaled_diff(0.5, &3.0, &1.0);
        acc.add_scaled_diff(-0.25, &2.0, &4.0);
        assert_eq!(acc, 1.5);
        acc.scale(2.0);
        assert_eq!(acc, 3.0);
    }

    #[test]
    fn vector_accumulation_keeps_shape() {
        let plus = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let minus = DVector::from_vec(vec![0.5, 1.0, 1.5]);
        let mut acc = plus.zeros_like();
        acc.add_scaled_diff(2.0, &plus, &minus);
        assert_eq!(acc.len(), 3);
        assert_eq!(acc[0], 1.0);
        assert_eq!(acc[2], 3.0);
    }
}
