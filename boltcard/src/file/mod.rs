// boltcard/src/file/mod.rs
//! Binary layouts of the tag's file system: per-file settings (with the
//! Secure Dynamic Messaging block) and the NFC Forum capability container.
//!
//! Everything here is a pure encode/decode over byte slices and does not
//! touch the transport.

/// Capability container (file 1).
pub mod capabilities;
/// File and SDM settings.
pub mod settings;

pub use capabilities::{CapabilitiesContainer, CtrlTlv};
pub use settings::{EncodingMode, FileSettings, FileSettingsEncodingError, SdmSettings};
