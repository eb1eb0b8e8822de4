// boltcard/src/prelude.rs

pub use crate::emulation::{CommandApdu, NdefEmulator};
pub use crate::file::{CapabilitiesContainer, EncodingMode, FileSettings, SdmSettings};
pub use crate::ndef::{Template, TemplateValue};
pub use crate::session::{AuthState, Authenticator, Session};
pub use crate::tag::Tag;
pub use crate::transport::Transport;
pub use crate::workflow::{Inspection, ProvisionInput, ResetInput};
pub use crate::{
    ChipUid, CommunicationMode, Error, FileSpecifier, KeyNumber, Permission, Result, TransactionId,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_exchange_timeout, ms, parse_hex};
