//! Read/write head driving the addressing cycle
//!
//! A head carries the weighting it produced on the previous timestep and
//! turns one set of controller parameters into the next weighting.

use ndarray::Array1;

use super::bank::MemoryBank;
use super::error::MemoryResult;

/// Addressing parameters emitted by a controller for one timestep
#[derive(Debug, Clone)]
pub struct HeadParams {
    /// Key vector compared against every location (length M)
    pub key: Array1<f64>,
    /// Key strength β
    pub key_strength: f64,
    /// Interpolation gate g, conventionally in [0, 1]
    pub gate: f64,
    /// Circular shift kernel (length N)
    pub shift: Array1<f64>,
    /// Sharpening exponent γ, conventionally ≥ 1
    pub gamma: f64,
}

/// Stateful addressing head
#[derive(Debug, Clone)]
pub struct AddressingHead {
    previous: Array1<f64>,
}

impl AddressingHead {
    /// Create a head over `n` locations, starting from the uniform weighting
    pub fn new(n: usize) -> Self {
        Self {
            previous: Self::uniform(n),
        }
    }

    /// Create a head whose previous weighting is `w`
    pub fn from_weighting(w: Array1<f64>) -> Self {
        Self { previous: w }
    }

    fn uniform(n: usize) -> Array1<f64> {
        Array1::from_elem(n, 1.0 / n as f64)
    }

    /// Weighting produced by the last call to [`address`](Self::address)
    pub fn previous(&self) -> &Array1<f64> {
        &self.previous
    }

    /// Forget the previous weighting
    pub fn reset(&mut self) {
        self.previous = Self::uniform(self.previous.len());
    }

    /// Run content → gate → shift → sharpen and remember the result
    ///
    /// The result is only kept when it is a valid weighting for `bank`.
    pub fn address(&mut self, bank: &MemoryBank, params: &HeadParams) -> MemoryResult<Array1<f64>> {
        let w_content = bank.content_weights(params.key_strength, &params.key)?;
        let w_gated = bank.gated_weighting(params.gate, &w_content, &self.previous)?;
        let w_shifted = bank.rotate_weights(&w_gated, &params.shift)?;
        let w = bank.sharpen_weights(&w_shifted, params.gamma)?;

        tracing::trace!(content = ?w_content, weighting = ?w, "addressed memory");
        bank.validate_weights(&w)?;

        self.previous = w.clone();
        Ok(w)
    }

    /// Address the bank and read with the resulting weighting
    pub fn read(&mut self, bank: &MemoryBank, params: &HeadParams) -> MemoryResult<Array1<f64>> {
        let w = self.address(bank, params)?;
        bank.read(&w)
    }

    /// Address the bank and write `erase`/`add` with the resulting weighting
    ///
    /// The weighting is only kept when the write succeeds.
    pub fn write(
        &mut self,
        bank: &mut MemoryBank,
        params: &HeadParams,
        erase: &Array1<f64>,
        add: &Array1<f64>,
    ) -> MemoryResult<Array1<f64>> {
        let previous = self.previous.clone();
        let w = self.address(bank, params)?;
        if let Err(err) = bank.write(&w, erase, add) {
            self.previous = previous;
            return Err(err);
        }
        Ok(w)
    }
}
