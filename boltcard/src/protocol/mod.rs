// boltcard/src/protocol/mod.rs

/// Native command payload builders.
pub mod commands;
/// APDU envelopes.
pub mod frame;
/// Bounds-checked readers.
pub mod parser;
/// Response splitting and status checks.
pub mod response;

pub use commands::*;
pub use frame::{encode_apdu, encode_native};
pub use response::NxpCommandResult;
