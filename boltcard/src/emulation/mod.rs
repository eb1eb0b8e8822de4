// boltcard/src/emulation/mod.rs
//! Reader-side view of the ISO 7816-4 exchange, used when the host itself
//! plays the tag (card emulation) and has to answer a reader's commands.

/// Reader-side command APDU parsing.
pub mod command_apdu;
/// Read-only NDEF tag responder.
pub mod emulator;

pub use command_apdu::{CommandApdu, ReadBinaryCommand, SelectFileCommand};
pub use emulator::NdefEmulator;
