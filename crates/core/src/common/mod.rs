//! Common building blocks used throughout the crate.
//!
//! This module provides the pieces shared by the instruction and ABI layers:
//! 1. **Bits:** Named single-bit constants and `(shift, width)` field descriptors.
//! 2. **Error Handling:** Error types for encoding, code buffer access, ABI
//!    contract validation and configuration loading.

/// Single-bit constants and field descriptors.
pub mod bits;

/// Error types.
pub mod error;

pub use bits::Field;
pub use error::{AbiError, ConfigError, EncodingError};
