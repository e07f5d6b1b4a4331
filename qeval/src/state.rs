use num_complex::Complex;

// custom type for gate matrices
pub type GateMatrix = [[Complex<f64>; 2]; 2];

/// Dense statevector over `num_qubits` wires. Wire 0 is the most
/// significant bit of the basis index, so |q0 q1 q2⟩ reads left to right.
#[derive(Debug, Clone)]
pub struct StateVector {
    pub num_qubits: usize,
    pub amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits; // 2^num_qubits
        let mut amplitudes = vec![Complex::new(0.0, 0.0); size];
        if !amplitudes.is_empty() {
            amplitudes[0] = Complex::new(1.0, 0.0);
        }
        Self {
            num_qubits,
            amplitudes,
        }
    }

    fn wire_mask(&self, wire: usize) -> usize {
        1 << (self.num_qubits - 1 - wire)
    }

    pub fn apply_single_qubit_gate(&mut self, gate_matrix: &GateMatrix, wire: usize) {
        let mut new_amplitudes = self.amplitudes.clone();
        let k = self.wire_mask(wire);

        for i in 0..self.amplitudes.len() {
            if (i & k) == 0 {
                let j = i | k;
                let amp_i = self.amplitudes[i];
                let amp_j = self.amplitudes[j];

                new_amplitudes[i] = gate_matrix[0][0] * amp_i + gate_matrix[0][1] * amp_j;
                new_amplitudes[j] = gate_matrix[1][0] * amp_i + gate_matrix[1][1] * amp_j;
            }
        }
        self.amplitudes = new_amplitudes;
    }

    /// Applies `gate_matrix` to `target` on the subspace where `control`
    /// is |1⟩, leaving the control-|0⟩ subspace untouched.
    pub fn apply_controlled_gate(
        &mut self,
        gate_matrix: &GateMatrix,
        control: usize,
        target: usize,
    ) {
        let mut new_amplitudes = self.amplitudes.clone();
        let control_mask = self.wire_mask(control);
        let target_mask = self.wire_mask(target);

        for i in 0..self.amplitudes.len() {
            if (i & control_mask) != 0 && (i & target_mask) == 0 {
                let j = i | target_mask;
                let amp_i = self.amplitudes[i];
                let amp_j = self.amplitudes[j];

                new_amplitudes[i] = gate_matrix[0][0] * amp_i + gate_matrix[0][1] * amp_j;
                new_amplitudes[j] = gate_matrix[1][0] * amp_i + gate_matrix[1][1] * amp_j;
            }
        }
        self.amplitudes = new_amplitudes;
    }

    pub fn apply_cx(&mut self, control_qubit: usize, target_qubit: usize) {
        let mut new_amplitudes = self.amplitudes.clone();
        let control_mask = self.wire_mask(control_qubit);
        let target_mask = self.wire_mask(target_qubit);

        for i in 0..self.amplitudes.len() {
            if (i & control_mask) != 0 && (i & target_mask) == 0 {
                let j = i | target_mask;
                new_amplitudes.swap(i, j);
            }
        }
        self.amplitudes = new_amplitudes;
    }

    /// ⟨self|other⟩.
    pub fn inner_product(&self, other: &StateVector) -> Complex<f64> {
        let mut acc = Complex::new(0.0, 0.0);
        for (a, b) in self.amplitudes.iter().zip(other.amplitudes.iter()) {
            acc += a.conj() * b;
        }
        acc
    }

    pub fn reset(&mut self) {
        for amp in &mut self.amplitudes {
            *amp = Complex::new(0.0, 0.0);
        }
        if !self.amplitudes.is_empty() {
            self.amplitudes[0] = Complex::new(1.0, 0.0);
        }
    }
}
