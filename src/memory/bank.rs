//! NTM memory bank
//!
//! An N x M matrix of locations read and written through weightings over
//! the N rows ("Neural Turing Machines", Graves et al., 2014).

use ndarray::{Array1, Array2};

use super::addressing::{self, ZeroKeyPolicy};
use super::error::{MemoryResult, ValidationError};
use crate::utils::math::outer;
use crate::utils::MemoryConfig;

/// Default tolerance on `|Σw - 1|` for weighting vectors
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Memory matrix with content and location addressing
#[derive(Debug, Clone)]
pub struct MemoryBank {
    /// Number of locations (rows)
    n: usize,
    /// Width of each location (columns)
    m: usize,
    /// Stored content (n x m)
    memory: Array2<f64>,
    /// Allowed deviation of a weighting's sum from one
    tolerance: f64,
    /// Handling of all-zero keys in content addressing
    zero_key: ZeroKeyPolicy,
}

impl MemoryBank {
    /// Create a zeroed memory of `n` locations, each `m` wide
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            n,
            m,
            memory: Array2::zeros((n, m)),
            tolerance: WEIGHT_TOLERANCE,
            zero_key: ZeroKeyPolicy::default(),
        }
    }

    /// Create a zeroed memory sized and tuned from configuration
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self {
            tolerance: config.weight_tolerance,
            zero_key: config.zero_key,
            ..Self::new(config.locations, config.width)
        }
    }

    /// Adopt an existing matrix; its shape gives `n` and `m`
    pub fn from_matrix(memory: Array2<f64>) -> Self {
        let (n, m) = memory.dim();
        Self {
            n,
            m,
            memory,
            tolerance: WEIGHT_TOLERANCE,
            zero_key: ZeroKeyPolicy::default(),
        }
    }

    /// Replace the zero-key policy
    pub fn with_zero_key_policy(mut self, policy: ZeroKeyPolicy) -> Self {
        self.zero_key = policy;
        self
    }

    /// Number of locations
    pub fn n(&self) -> usize {
        self.n
    }

    /// Width of each location
    pub fn m(&self) -> usize {
        self.m
    }

    /// Current memory contents
    pub fn memory(&self) -> &Array2<f64> {
        &self.memory
    }

    /// Tolerance used when checking weightings
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Zero every location
    pub fn reset(&mut self) {
        self.memory.fill(0.0);
    }

    /// Read the weighted sum of all locations
    ///
    /// Returns `Σ_i w[i] * memory[i, :]`, a vector of length M.
    pub fn read(&self, w: &Array1<f64>) -> MemoryResult<Array1<f64>> {
        self.validate_weights(w)?;

        Ok(w.dot(&self.memory))
    }

    /// Erase then add content at the locations selected by `w`
    ///
    /// The erase pass covers the whole matrix before the add pass starts:
    /// `memory *= 1 - w ⊗ e`, then `memory += w ⊗ a`. All three vectors are
    /// checked first, so an error leaves memory unchanged.
    pub fn write(&mut self, w: &Array1<f64>, e: &Array1<f64>, a: &Array1<f64>) -> MemoryResult<()> {
        self.validate_weights(w)?;
        self.validate_bounded(e, "erase")?;
        self.validate_bounded(a, "add")?;

        let retain = outer(w.view(), e.view()).mapv(|x| 1.0 - x);
        self.memory *= &retain;

        let add = outer(w.view(), a.view());
        self.memory += &add;

        tracing::debug!(n = self.n, m = self.m, "wrote memory");
        Ok(())
    }

    /// Content-based weighting for key `k` with strength `b`
    pub fn content_weights(&self, b: f64, k: &Array1<f64>) -> MemoryResult<Array1<f64>> {
        addressing::content_weights(&self.memory, b, k, self.zero_key)
    }

    /// Interpolate content and previous weightings with gate `g`
    pub fn gated_weighting(
        &self,
        g: f64,
        w_content: &Array1<f64>,
        w_previous: &Array1<f64>,
    ) -> MemoryResult<Array1<f64>> {
        self.check_locations(w_content)?;
        addressing::gated_weighting(g, w_content, w_previous)
    }

    /// Circularly convolve `w` with the shift kernel `s`
    pub fn rotate_weights(&self, w: &Array1<f64>, s: &Array1<f64>) -> MemoryResult<Array1<f64>> {
        self.check_locations(w)?;
        addressing::rotate_weights(w, s)
    }

    /// Sharpen `w` with exponent `gamma`
    pub fn sharpen_weights(&self, w: &Array1<f64>, gamma: f64) -> MemoryResult<Array1<f64>> {
        self.check_locations(w)?;
        Ok(addressing::sharpen_weights(w, gamma))
    }

    /// Check that `w` has N entries summing to one
    pub fn validate_weights(&self, w: &Array1<f64>) -> MemoryResult<()> {
        if w.len() != self.n {
            tracing::debug!(expected = self.n, got = w.len(), "weighting has wrong length");
            return Err(ValidationError::WeightLength {
                expected: self.n,
                got: w.len(),
                weights: w.to_vec(),
            });
        }

        let sum = w.sum();
        // negated so a NaN sum is rejected too
        if !((sum - 1.0).abs() <= self.tolerance) {
            tracing::debug!(sum, "weighting does not sum to one");
            return Err(ValidationError::WeightSum {
                expected: 1.0,
                actual: sum,
            });
        }

        Ok(())
    }

    /// Check that `v` has M entries, each of magnitude at most one
    pub fn validate_bounded(&self, v: &Array1<f64>, name: &'static str) -> MemoryResult<()> {
        if v.len() != self.m {
            tracing::debug!(name, expected = self.m, got = v.len(), "vector has wrong length");
            return Err(ValidationError::VectorLength {
                name,
                expected: self.m,
                got: v.len(),
                vector: v.to_vec(),
            });
        }

        if !v.iter().all(|x| x.abs() <= 1.0) {
            tracing::debug!(name, "vector element out of range");
            return Err(ValidationError::VectorOutOfRange {
                name,
                vector: v.to_vec(),
            });
        }

        Ok(())
    }

    fn check_locations(&self, w: &Array1<f64>) -> MemoryResult<()> {
        if w.len() != self.n {
            return Err(ValidationError::DimensionMismatch {
                expected: self.n,
                got: w.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_new_memory_is_zero() {
        let bank = MemoryBank::new(3, 5);
        assert_eq!(bank.n(), 3);
        assert_eq!(bank.m(), 5);
        assert_eq!(bank.memory().dim(), (3, 5));
        assert!(bank.memory().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_read_wrong_number_weights() {
        let bank = MemoryBank::new(2, 4);
        let err = bank.read(&array![1.0]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WeightLength {
                expected: 2,
                got: 1,
                weights: vec![1.0],
            }
        );
    }

    #[test]
    fn test_read_weights_not_summing_to_one() {
        let bank = MemoryBank::new(2, 4);
        let err = bank.read(&array![0.5, 0.4]).unwrap_err();
        assert!(matches!(err, ValidationError::WeightSum { actual, .. } if (actual - 0.9).abs() < 1e-12));

        assert!(bank.read(&array![f64::NAN, 1.0]).is_err());
        // within tolerance
        assert!(bank.read(&array![0.5, 0.5 + 5e-7]).is_ok());
    }

    #[test]
    fn test_read_empty_memory() {
        let bank = MemoryBank::new(2, 4);
        let value = bank.read(&array![1.0, 0.0]).unwrap();
        assert_eq!(value.len(), 4);
        assert_eq!(value, array![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_read_weighted_row_sum() {
        let bank = MemoryBank::from_matrix(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let value = bank.read(&array![0.2, 0.3, 0.5]).unwrap();
        assert_abs_diff_eq!(value[0], 0.2 + 0.9 + 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(value[1], 0.4 + 1.2 + 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_write_onto_empty_memory() {
        let mut bank = MemoryBank::new(2, 4);
        bank.write(
            &array![1.0, 0.0],
            &array![0.0, 0.0, 0.0, 0.0],
            &array![1.0, 0.0, 1.0, 0.0],
        )
        .unwrap();

        assert_eq!(
            *bank.memory(),
            array![[1.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn test_write_erases_before_adding() {
        let mut bank = MemoryBank::from_matrix(array![[1.0, 1.0], [1.0, 1.0]]);
        bank.write(&array![0.5, 0.5], &array![1.0, 0.0], &array![0.2, 0.2])
            .unwrap();

        // column 0: 1 * (1 - 0.5) + 0.1, column 1: 1 * 1 + 0.1
        let expected = array![[0.6, 1.1], [0.6, 1.1]];
        for (a, e) in bank.memory().iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_write_rejects_invalid_vectors() {
        let mut bank = MemoryBank::new(2, 3);
        let w = array![1.0, 0.0];

        let err = bank
            .write(&w, &array![0.0, 0.0], &array![0.0, 0.0, 0.0])
            .unwrap_err();
        assert!(matches!(err, ValidationError::VectorLength { name: "erase", expected: 3, got: 2, .. }));

        let err = bank
            .write(&w, &array![0.0, 0.0, 0.0], &array![0.0, 1.5, 0.0])
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::VectorOutOfRange {
                name: "add",
                vector: vec![0.0, 1.5, 0.0],
            }
        );

        // negative values inside the unit interval are accepted
        assert!(bank.write(&w, &array![-1.0, 0.0, 0.0], &array![-0.5, 1.0, 0.0]).is_ok());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let mut bank = MemoryBank::from_matrix(array![[0.3, 0.4], [0.5, 0.6]]);
        let before = bank.memory().clone();

        assert!(bank.write(&array![0.7, 0.7], &array![1.0, 1.0], &array![1.0, 1.0]).is_err());
        assert!(bank.write(&array![1.0, 0.0], &array![1.0, 1.0], &array![2.0, 1.0]).is_err());
        assert_eq!(*bank.memory(), before);
    }

    #[test]
    fn test_reset() {
        let mut bank = MemoryBank::from_matrix(array![[1.0, 2.0]]);
        bank.reset();
        assert_eq!(*bank.memory(), array![[0.0, 0.0]]);
    }

    #[test]
    fn test_from_config() {
        let config = MemoryConfig {
            locations: 8,
            width: 3,
            weight_tolerance: 1e-3,
            zero_key: ZeroKeyPolicy::Uniform,
            ..MemoryConfig::default()
        };
        let bank = MemoryBank::from_config(&config);
        assert_eq!(bank.memory().dim(), (8, 3));
        assert_eq!(bank.tolerance(), 1e-3);

        let w = bank.content_weights(1.0, &array![0.0, 0.0, 0.0]).unwrap();
        assert_abs_diff_eq!(w[0], 0.125, epsilon = 1e-12);
    }

    #[test]
    fn test_addressing_methods_check_location_count() {
        let bank = MemoryBank::new(3, 2);
        let w3 = array![0.2, 0.3, 0.5];
        let w2 = array![0.5, 0.5];

        assert!(bank.gated_weighting(0.5, &w2, &w2).is_err());
        assert!(bank.gated_weighting(0.5, &w3, &w2).is_err());
        assert!(bank.rotate_weights(&w2, &w2).is_err());
        assert!(bank.rotate_weights(&w3, &array![1.0, 0.0, 0.0]).is_ok());
        assert_eq!(
            bank.sharpen_weights(&w2, 2.0).unwrap_err(),
            ValidationError::DimensionMismatch { expected: 3, got: 2 }
        );
        assert!(bank.sharpen_weights(&w3, 2.0).is_ok());
    }

    #[test]
    fn test_zero_key_policy_on_bank() {
        let bank = MemoryBank::new(4, 2);
        assert_eq!(
            bank.content_weights(1.0, &array![0.0, 0.0]).unwrap_err(),
            ValidationError::ZeroKey
        );

        let bank = bank.with_zero_key_policy(ZeroKeyPolicy::Uniform);
        let w = bank.content_weights(1.0, &array![0.0, 0.0]).unwrap();
        assert!(bank.read(&w).is_ok());
    }
}
