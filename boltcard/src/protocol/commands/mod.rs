// boltcard/src/protocol/commands/mod.rs

/// File data and settings commands.
pub mod file;
/// ISO 7816-4 commands.
pub mod iso;
/// Key management commands.
pub mod key;

pub use file::encode_file_window;
pub use iso::encode_select_ndef_application;
pub use key::encode_change_key_data;

use crate::constants::*;
use crate::types::{CommunicationMode, FileSpecifier, KeyNumber};
use crate::Result;

/// Native commands issued through the secure channel. Per-command encoders
/// live in `protocol::commands::<name>.rs`.
///
/// `header` is always sent in plain; `data` is wrapped according to the
/// command's communication mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCommand {
    /// EV2First stage 1 for a key slot.
    AuthenticateEv2First {
        key: KeyNumber,
    },
    /// Second handshake frame carrying `E(RndA || RndB')`.
    AuthenticatePart2 {
        challenge: Vec<u8>,
    },
    /// GetKeyVersion (MAC).
    GetKeyVersion {
        key: KeyNumber,
    },
    /// `key_data` is the already assembled (unencrypted) key cryptogram.
    ChangeKey {
        key: KeyNumber,
        key_data: Vec<u8>,
    },
    /// GetCardUID (Full).
    GetCardUid,
    /// ReadData in the file's mode.
    ReadData {
        file: FileSpecifier,
        offset: u32,
        length: u32,
        mode: CommunicationMode,
    },
    /// WriteData in the file's mode.
    WriteData {
        file: FileSpecifier,
        offset: u32,
        data: Vec<u8>,
        mode: CommunicationMode,
    },
    /// GetFileSettings (MAC).
    GetFileSettings {
        file: FileSpecifier,
    },
    /// ChangeFileSettings (Full) with an encoded payload.
    ChangeFileSettings {
        file: FileSpecifier,
        settings: Vec<u8>,
    },
}

impl NativeCommand {
    /// Native command code (INS byte of the envelope).
    pub fn code(&self) -> u8 {
        match self {
            Self::AuthenticateEv2First { .. } => CMD_AUTHENTICATE_EV2_FIRST,
            Self::AuthenticatePart2 { .. } => CMD_ADDITIONAL_FRAME,
            Self::GetKeyVersion { .. } => CMD_GET_KEY_VERSION,
            Self::ChangeKey { .. } => CMD_CHANGE_KEY,
            Self::GetCardUid => CMD_GET_CARD_UID,
            Self::ReadData { .. } => CMD_READ_DATA,
            Self::WriteData { .. } => CMD_WRITE_DATA,
            Self::GetFileSettings { .. } => CMD_GET_FILE_SETTINGS,
            Self::ChangeFileSettings { .. } => CMD_CHANGE_FILE_SETTINGS,
        }
    }

    /// Communication mode the tag expects for this command.
    pub fn mode(&self) -> CommunicationMode {
        match self {
            Self::AuthenticateEv2First { .. } | Self::AuthenticatePart2 { .. } => {
                CommunicationMode::Plain
            }
            Self::GetKeyVersion { .. } | Self::GetFileSettings { .. } => CommunicationMode::Mac,
            Self::ChangeKey { .. } | Self::GetCardUid | Self::ChangeFileSettings { .. } => {
                CommunicationMode::Full
            }
            Self::ReadData { mode, .. } | Self::WriteData { mode, .. } => *mode,
        }
    }

    /// Plain command header.
    pub fn header(&self) -> Result<Vec<u8>> {
        Ok(match self {
            Self::AuthenticateEv2First { key } => vec![key.as_u8(), 0x00],
            Self::AuthenticatePart2 { challenge } => challenge.clone(),
            Self::GetKeyVersion { key } | Self::ChangeKey { key, .. } => vec![key.as_u8()],
            Self::GetCardUid => Vec::new(),
            Self::ReadData {
                file,
                offset,
                length,
                ..
            } => encode_file_window(*file, *offset, *length)?.to_vec(),
            Self::WriteData {
                file, offset, data, ..
            } => encode_file_window(*file, *offset, data.len() as u32)?.to_vec(),
            Self::GetFileSettings { file } | Self::ChangeFileSettings { file, .. } => {
                vec![file.file_number()]
            }
        })
    }

    /// Command data before mode wrapping.
    pub fn data(&self) -> &[u8] {
        match self {
            Self::ChangeKey { key_data, .. } => key_data,
            Self::WriteData { data, .. } => data,
            Self::ChangeFileSettings { settings, .. } => settings,
            _ => &[],
        }
    }
}
