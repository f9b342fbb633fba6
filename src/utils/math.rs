//! Vector helpers shared by the memory operations
//!
//! Everything here works on explicit ndarray values; no broadcasting tricks.

use ndarray::{Array1, Array2, ArrayView1};

/// Euclidean norm of a vector
pub fn l2_norm(v: ArrayView1<f64>) -> f64 {
    v.iter().map(|x| x.powi(2)).sum::<f64>().sqrt()
}

/// Outer product `a ⊗ b`, shape (a.len(), b.len())
///
/// out[[i, j]] = a[i] * b[j]
pub fn outer(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j])
}

/// Normalized exponential of `scale * x`
///
/// Shifts by the maximum before exponentiating; the result is the same
/// distribution as `exp(scale * x_i) / Σ exp(scale * x_j)`.
pub fn scaled_softmax(values: ArrayView1<f64>, scale: f64) -> Array1<f64> {
    if values.is_empty() {
        return Array1::zeros(0);
    }

    let scaled = values.mapv(|x| x * scale);
    let max_val = scaled.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp_vals = scaled.mapv(|x| (x - max_val).exp());
    let sum = exp_vals.sum();

    exp_vals / sum
}

/// Normalize a non-negative vector so it sums to one
pub fn normalize_sum(values: Array1<f64>) -> Array1<f64> {
    let sum = values.sum();
    values / sum
}
