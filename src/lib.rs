//! # NTM Memory
//!
//! The external memory of a Neural Turing Machine: an N x M matrix read and
//! written through soft weightings over its locations.
//!
//! ## Features
//!
//! - **Weighted read / erase-add write** with input validation
//! - **Content addressing**: cosine similarity sharpened by a key strength
//! - **Location addressing**: gated interpolation, circular shift, sharpening
//! - **Addressing head** that chains the steps and keeps the previous weighting
//!
//! ## Example
//!
//! ```rust
//! use ndarray::array;
//! use ntm_memory::MemoryBank;
//!
//! let mut bank = MemoryBank::new(2, 4);
//! bank.write(
//!     &array![1.0, 0.0],
//!     &array![0.0, 0.0, 0.0, 0.0],
//!     &array![1.0, 0.0, 1.0, 0.0],
//! )?;
//!
//! let w = bank.content_weights(1.0, &array![0.5, 0.0, 1.0, 0.0])?;
//! let w = bank.sharpen_weights(&w, 2.0)?;
//! let value = bank.read(&w)?;
//! assert_eq!(value.len(), 4);
//! # Ok::<(), ntm_memory::ValidationError>(())
//! ```

pub mod memory;
pub mod utils;

// Re-export main types
pub use memory::{
    AddressingHead, HeadParams, MemoryBank, MemoryResult, ValidationError, ZeroKeyPolicy,
};
pub use utils::{setup_logging, MemoryConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
