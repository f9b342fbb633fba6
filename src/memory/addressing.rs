//! Addressing primitives
//!
//! Content addressing, gated interpolation, circular shift and sharpening.
//! Each step maps weightings over the N memory locations to new weightings;
//! chained together they form one NTM addressing cycle:
//!
//! ```text
//! w_c = content(β, k)  ->  w_g = g·w_c + (1-g)·w_prev  ->  w_s = w_g ⊛ s  ->  w = sharpen(w_s, γ)
//! ```

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::error::{MemoryResult, ValidationError};
use crate::utils::math::{l2_norm, normalize_sum, scaled_softmax};

/// What content addressing does with an all-zero key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroKeyPolicy {
    /// Fail with [`ValidationError::ZeroKey`]
    #[default]
    Reject,
    /// Treat every similarity as zero, giving the uniform weighting
    Uniform,
}

/// Content-based weighting over the rows of `memory`
///
/// Cosine similarity between `key` and each row, sharpened by `key_strength`
/// and normalized with a softmax. A row with zero norm uses 1 in place of its
/// norm, so its similarity comes out as 0 rather than NaN.
pub fn content_weights(
    memory: &Array2<f64>,
    key_strength: f64,
    key: &Array1<f64>,
    zero_key: ZeroKeyPolicy,
) -> MemoryResult<Array1<f64>> {
    let (n, m) = memory.dim();
    if key.len() != m {
        return Err(ValidationError::DimensionMismatch {
            expected: m,
            got: key.len(),
        });
    }

    let key_norm = l2_norm(key.view());
    let similarities: Array1<f64> = if key_norm == 0.0 {
        match zero_key {
            ZeroKeyPolicy::Reject => {
                tracing::debug!("content addressing rejected a zero key");
                return Err(ValidationError::ZeroKey);
            }
            ZeroKeyPolicy::Uniform => Array1::zeros(n),
        }
    } else {
        let mut similarities = Array1::zeros(n);
        for (i, row) in memory.axis_iter(Axis(0)).enumerate() {
            let row_norm = match l2_norm(row) {
                norm if norm == 0.0 => 1.0,
                norm => norm,
            };
            similarities[i] = row.dot(key) / (row_norm * key_norm);
        }
        similarities
    };

    Ok(scaled_softmax(similarities.view(), key_strength))
}

/// Interpolate between the content weighting and the previous weighting
///
/// `w[i] = g * w_content[i] + (1 - g) * w_previous[i]`. Neither the gate nor
/// the simplex property of the inputs is checked.
pub fn gated_weighting(
    gate: f64,
    w_content: &Array1<f64>,
    w_previous: &Array1<f64>,
) -> MemoryResult<Array1<f64>> {
    if w_content.len() != w_previous.len() {
        return Err(ValidationError::DimensionMismatch {
            expected: w_content.len(),
            got: w_previous.len(),
        });
    }

    Ok(w_content.mapv(|x| gate * x) + w_previous.mapv(|x| (1.0 - gate) * x))
}

/// Circular convolution of `w` with the shift kernel `s`
///
/// `result[i] = Σ_j w[j] * s[(N + i - j) mod N]`. A kernel one-hot at index
/// `k` rotates the weighting forward by `k` positions.
pub fn rotate_weights(w: &Array1<f64>, s: &Array1<f64>) -> MemoryResult<Array1<f64>> {
    let n = w.len();
    if s.len() != n {
        return Err(ValidationError::DimensionMismatch {
            expected: n,
            got: s.len(),
        });
    }

    let mut result = Array1::<f64>::zeros(n);
    for i in 0..n {
        result[i] = (0..n).map(|j| w[j] * s[(n + i - j) % n]).sum::<f64>();
    }

    Ok(result)
}

/// Raise each weight to `gamma` and renormalize
///
/// Weights are scaled by their maximum before exponentiating so the peak
/// stays at 1 and large `gamma` cannot underflow every entry to zero.
/// Negative weights combined with a fractional `gamma` produce NaN; callers
/// must pass non-negative weightings.
pub fn sharpen_weights(w: &Array1<f64>, gamma: f64) -> Array1<f64> {
    let max_val = w.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max_val > 0.0 && max_val.is_finite() {
        normalize_sum(w.mapv(|x| (x / max_val).powf(gamma)))
    } else {
        normalize_sum(w.mapv(|x| x.powf(gamma)))
    }
}

/// Spread a compact shift distribution onto a length-`n` circular kernel
///
/// `dist` covers offsets `-r..=r` (length `2r + 1`); offset `o` lands at
/// index `o mod n`. Offsets that wrap onto the same index add up.
pub fn expand_shift(n: usize, dist: &Array1<f64>) -> MemoryResult<Array1<f64>> {
    if dist.len() % 2 == 0 {
        return Err(ValidationError::DimensionMismatch {
            expected: dist.len() + 1,
            got: dist.len(),
        });
    }
    if n == 0 {
        return Ok(Array1::zeros(0));
    }

    let radius = (dist.len() / 2) as isize;
    let mut kernel = Array1::<f64>::zeros(n);
    for (j, &p) in dist.iter().enumerate() {
        let offset = j as isize - radius;
        kernel[offset.rem_euclid(n as isize) as usize] += p;
    }

    Ok(kernel)
}
