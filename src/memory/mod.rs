//! NTM memory and its addressing mechanisms
//!
//! Provides:
//! - The memory bank with weighted read and erase/add write
//! - Content, gated, shift and sharpening addressing primitives
//! - A stateful head chaining those primitives per timestep

pub mod addressing;
pub mod bank;
pub mod error;
pub mod head;

pub use addressing::{
    content_weights, expand_shift, gated_weighting, rotate_weights, sharpen_weights,
    ZeroKeyPolicy,
};
pub use bank::{MemoryBank, WEIGHT_TOLERANCE};
pub use error::{MemoryResult, ValidationError};
pub use head::{AddressingHead, HeadParams};
