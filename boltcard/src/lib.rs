// boltcard/src/lib.rs

//! boltcard
//!
//! Pure Rust host-side command stack for NTAG 424 DNA / DESFire EV2-class
//! Bolt cards: EV2First authentication, Plain/MAC/Full secure messaging,
//! file and SDM settings, NDEF templates, and card emulation of a read-only
//! NDEF tag. The NFC link itself is abstracted behind [`transport::Transport`].
#![warn(missing_docs)]

pub mod constants;
pub mod crypto;
pub mod emulation;
/// Crate error type.
pub mod error;
pub mod file;
pub mod ndef;
/// Common re-exports.
pub mod prelude;
/// Native command framing and parsing.
pub mod protocol;
pub mod session;
pub mod tag;
pub mod test_support;
/// The exchange seam to the NFC link.
pub mod transport;
/// Small value types.
pub mod types;
pub mod utils;
pub mod workflow;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the value types in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
