//! Utilities: small, reusable helpers used across the crate.
//!
//! Hex formatting for log output, fixed-width bit and integer packing for
//! the binary file layouts, and exchange timeout defaults.

pub mod bits;
pub mod hex;
pub mod timeout;

pub use bits::*;
pub use hex::*;
pub use timeout::*;
