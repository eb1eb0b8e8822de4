// boltcard/src/file/settings.rs

use thiserror::Error;

use crate::protocol::parser::Cursor;
use crate::types::{CommunicationMode, FileSpecifier, Permission};
use crate::utils::bits::{bit_lsb, flag_bit, left_nibble, nibbles, right_nibble, u24_le};
use crate::Result;

/// Fixed part of a GetFileSettings response.
pub const MIN_SETTINGS_LEN: usize = 7;

const OPTION_SDM_ENABLED: u8 = 6;
const SDM_OPTION_UID: u8 = 7;
const SDM_OPTION_READ_COUNTER: u8 = 6;
const SDM_OPTION_READ_COUNTER_LIMIT: u8 = 5;
const SDM_OPTION_ENCRYPT_FILE_DATA: u8 = 4;
const SDM_OPTION_ASCII: u8 = 0;

/// A field the SDM flags call for is unset, or a value does not fit its
/// 3-byte slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileSettingsEncodingError {
    /// UID mirroring without a UID offset.
    #[error("sdm uid offset required")]
    SdmUidOffsetRequired,
    /// Counter mirroring without a counter offset.
    #[error("sdm read counter offset required")]
    SdmReadCounterOffsetRequired,
    /// Keyed meta read without a PICC data offset.
    #[error("sdm picc data offset required")]
    SdmPiccDataOffsetRequired,
    /// File read key without a MAC input offset.
    #[error("sdm mac input offset required")]
    SdmMacInputOffsetRequired,
    /// Encrypted file data without an offset.
    #[error("sdm enc offset required")]
    SdmEncOffsetRequired,
    /// Encrypted file data without a length.
    #[error("sdm enc length required")]
    SdmEncLengthRequired,
    /// File read key without a MAC offset.
    #[error("sdm mac offset required")]
    SdmMacOffsetRequired,
    /// Counter limit enabled without a value.
    #[error("sdm read counter limit required")]
    SdmReadCounterLimitRequired,
    /// A field is set that the SDM options never write.
    #[error("sdm field {0} is set but not used by the current sdm options")]
    UnusedSdmField(&'static str),
    /// A value needs more than 3 bytes.
    #[error("{field} value {value} does not fit in 24 bits")]
    ValueOutOfRange { field: &'static str, value: u32 },
    /// A key index above [`Permission::MAX_KEY`].
    #[error("{field} {permission:?} is not an encodable access condition")]
    PermissionOutOfRange {
        field: &'static str,
        permission: Permission,
    },
}

/// Result of [`FileSettings::encode`].
pub type EncodeResult<T> = std::result::Result<T, FileSettingsEncodingError>;

/// Which command the settings buffer is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// Layout returned by GetFileSettings (with file type and size).
    GetFileSettings,
    /// Layout accepted by ChangeFileSettings.
    ChangeFileSettings,
}

/// Secure Dynamic Messaging configuration of a file.
///
/// Offsets are present exactly when the flags and permissions select them;
/// see [`FileSettings::encode`] for the decision tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SdmSettings {
    /// Mirror the UID.
    pub uid: bool,
    /// Mirror the read counter.
    pub read_counter: bool,
    /// Enforce a read counter limit.
    pub read_counter_limit_enabled: bool,
    /// Encrypt part of the file data.
    pub encrypt_file_data: bool,
    /// Mirror as ASCII hex.
    pub use_ascii: bool,
    /// Access to UID and counter; a key selects encrypted PICC data.
    pub meta_read_permission: Permission,
    /// Key for the SDM MAC.
    pub file_read_permission: Permission,
    /// Access to the counter via GetFileCounters.
    pub read_counter_retrieval_permission: Permission,
    /// Plain UID mirror offset.
    pub uid_offset: Option<u32>,
    /// Plain counter mirror offset.
    pub read_counter_offset: Option<u32>,
    /// Encrypted PICC data offset.
    pub picc_data_offset: Option<u32>,
    /// Start of the MAC input.
    pub mac_input_offset: Option<u32>,
    /// Start of encrypted file data.
    pub enc_offset: Option<u32>,
    /// Length of encrypted file data.
    pub enc_length: Option<u32>,
    /// SDM MAC offset.
    pub mac_offset: Option<u32>,
    /// Read counter limit.
    pub read_counter_limit: Option<u32>,
}

/// Settings of one standard data file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileSettings {
    /// File type (0 for standard data).
    pub file_type: u8,
    /// Wrapping of file data commands.
    pub communication_mode: CommunicationMode,
    /// Read access.
    pub read_permission: Permission,
    /// Write access.
    pub write_permission: Permission,
    /// Read and write access.
    pub read_write_permission: Permission,
    /// Access to ChangeFileSettings.
    pub change_permission: Permission,
    /// File size in bytes.
    pub file_size: u32,
    /// SDM block, present when SDM is enabled.
    pub sdm: Option<SdmSettings>,
}

impl FileSettings {
    /// Factory settings of the capability container file.
    pub fn default_file1() -> Self {
        Self {
            read_permission: Permission::All,
            write_permission: Permission::Key(0),
            read_write_permission: Permission::Key(0),
            change_permission: Permission::Key(0),
            file_size: FileSpecifier::Cc.max_size() as u32,
            ..Self::default()
        }
    }

    /// Factory settings of the NDEF file.
    pub fn default_file2() -> Self {
        Self {
            read_permission: Permission::All,
            write_permission: Permission::All,
            read_write_permission: Permission::All,
            change_permission: Permission::Key(0),
            file_size: FileSpecifier::Ndef.max_size() as u32,
            ..Self::default()
        }
    }

    /// Factory settings of the proprietary file.
    pub fn default_file3() -> Self {
        Self {
            communication_mode: CommunicationMode::Full,
            read_permission: Permission::Key(2),
            write_permission: Permission::Key(3),
            read_write_permission: Permission::Key(3),
            change_permission: Permission::Key(0),
            file_size: FileSpecifier::Proprietary.max_size() as u32,
            ..Self::default()
        }
    }

    /// Factory settings for the given file.
    pub fn factory_default(file: FileSpecifier) -> Self {
        match file {
            FileSpecifier::Cc => Self::default_file1(),
            FileSpecifier::Ndef => Self::default_file2(),
            FileSpecifier::Proprietary => Self::default_file3(),
        }
    }

    /// Whether Secure Dynamic Messaging is on.
    pub fn sdm_enabled(&self) -> bool {
        self.sdm.is_some()
    }

    /// Parse a GetFileSettings response (without status bytes or MAC).
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(data);
        let file_type = c.u8()?;
        let options = c.u8()?;
        let rights_a = c.u8()?;
        let rights_b = c.u8()?;
        let file_size = c.le_u24()?;

        let communication_mode = match (bit_lsb(options, 0), bit_lsb(options, 1)) {
            (true, true) => CommunicationMode::Full,
            (true, false) => CommunicationMode::Mac,
            _ => CommunicationMode::Plain,
        };

        let sdm = if bit_lsb(options, OPTION_SDM_ENABLED) {
            Some(decode_sdm(&mut c)?)
        } else {
            None
        };

        Ok(Self {
            file_type,
            communication_mode,
            read_permission: Permission::from_nibble(left_nibble(rights_b)),
            write_permission: Permission::from_nibble(right_nibble(rights_b)),
            read_write_permission: Permission::from_nibble(left_nibble(rights_a)),
            change_permission: Permission::from_nibble(right_nibble(rights_a)),
            file_size,
            sdm,
        })
    }

    /// Parse a ChangeFileSettings payload, re-supplying the two fields that
    /// layout leaves out.
    pub fn decode_change_payload(file_type: u8, file_size: u32, data: &[u8]) -> Result<Self> {
        if data.len() < 3 {
            return Err(crate::Error::InvalidLength {
                expected: 3,
                actual: data.len(),
            });
        }
        let (head, rest) = data.split_at(3);
        let mut full = Vec::with_capacity(data.len() + 4);
        full.push(file_type);
        full.extend_from_slice(head);
        full.extend_from_slice(&u24("file_size", file_size)?);
        full.extend_from_slice(rest);
        Self::decode(&full)
    }

    /// Serialize for the given command. Fails without producing a buffer
    /// when the SDM flags and offsets disagree.
    pub fn encode(&self, mode: EncodingMode) -> EncodeResult<Vec<u8>> {
        let mut out = Vec::with_capacity(32);
        if mode == EncodingMode::GetFileSettings {
            out.push(self.file_type);
        }

        let comm = match self.communication_mode {
            CommunicationMode::Plain => 0b00,
            CommunicationMode::Mac => 0b01,
            CommunicationMode::Full => 0b11,
        };
        out.push(flag_bit(self.sdm.is_some(), OPTION_SDM_ENABLED) | comm);
        out.push(nibbles(
            nibble("read_write_permission", self.read_write_permission)?,
            nibble("change_permission", self.change_permission)?,
        ));
        out.push(nibbles(
            nibble("read_permission", self.read_permission)?,
            nibble("write_permission", self.write_permission)?,
        ));

        if mode == EncodingMode::GetFileSettings {
            out.extend_from_slice(&u24("file_size", self.file_size)?);
        }

        if let Some(sdm) = &self.sdm {
            encode_sdm(sdm, &mut out)?;
        }
        Ok(out)
    }
}

fn u24(field: &'static str, value: u32) -> EncodeResult<[u8; 3]> {
    u24_le(value).ok_or(FileSettingsEncodingError::ValueOutOfRange { field, value })
}

fn nibble(field: &'static str, permission: Permission) -> EncodeResult<u8> {
    permission
        .to_nibble()
        .ok_or(FileSettingsEncodingError::PermissionOutOfRange { field, permission })
}

fn decode_sdm(c: &mut Cursor<'_>) -> Result<SdmSettings> {
    let options = c.u8()?;
    let rights_1 = c.u8()?;
    let rights_2 = c.u8()?;

    let mut sdm = SdmSettings {
        uid: bit_lsb(options, SDM_OPTION_UID),
        read_counter: bit_lsb(options, SDM_OPTION_READ_COUNTER),
        read_counter_limit_enabled: bit_lsb(options, SDM_OPTION_READ_COUNTER_LIMIT),
        encrypt_file_data: bit_lsb(options, SDM_OPTION_ENCRYPT_FILE_DATA),
        use_ascii: bit_lsb(options, SDM_OPTION_ASCII),
        meta_read_permission: Permission::from_nibble(left_nibble(rights_2)),
        file_read_permission: Permission::from_nibble(right_nibble(rights_2)),
        read_counter_retrieval_permission: Permission::from_nibble(right_nibble(rights_1)),
        ..SdmSettings::default()
    };

    match sdm.meta_read_permission {
        Permission::All => {
            if sdm.uid {
                sdm.uid_offset = Some(c.le_u24()?);
            }
            if sdm.read_counter {
                sdm.read_counter_offset = Some(c.le_u24()?);
            }
        }
        Permission::None => {}
        Permission::Key(_) => sdm.picc_data_offset = Some(c.le_u24()?),
    }

    if sdm.file_read_permission != Permission::None {
        sdm.mac_input_offset = Some(c.le_u24()?);
        if sdm.encrypt_file_data {
            sdm.enc_offset = Some(c.le_u24()?);
            sdm.enc_length = Some(c.le_u24()?);
        }
        sdm.mac_offset = Some(c.le_u24()?);
    }

    if sdm.read_counter_limit_enabled {
        sdm.read_counter_limit = Some(c.le_u24()?);
    }
    Ok(sdm)
}

fn encode_sdm(sdm: &SdmSettings, out: &mut Vec<u8>) -> EncodeResult<()> {
    use FileSettingsEncodingError::*;

    out.push(
        flag_bit(sdm.uid, SDM_OPTION_UID)
            | flag_bit(sdm.read_counter, SDM_OPTION_READ_COUNTER)
            | flag_bit(sdm.read_counter_limit_enabled, SDM_OPTION_READ_COUNTER_LIMIT)
            | flag_bit(sdm.encrypt_file_data, SDM_OPTION_ENCRYPT_FILE_DATA)
            | flag_bit(sdm.use_ascii, SDM_OPTION_ASCII),
    );
    // left nibble of the first rights byte is RFU
    out.push(nibbles(
        0x0f,
        nibble(
            "sdm_read_counter_retrieval_permission",
            sdm.read_counter_retrieval_permission,
        )?,
    ));
    out.push(nibbles(
        nibble("sdm_meta_read_permission", sdm.meta_read_permission)?,
        nibble("sdm_file_read_permission", sdm.file_read_permission)?,
    ));

    let mut used = [false; 8];
    let mut put = |slot: usize,
                   field: &'static str,
                   value: Option<u32>,
                   missing: FileSettingsEncodingError|
     -> EncodeResult<()> {
        let value = value.ok_or(missing)?;
        out.extend_from_slice(&u24(field, value)?);
        used[slot] = true;
        Ok(())
    };

    match sdm.meta_read_permission {
        Permission::All => {
            if sdm.uid {
                put(0, "sdm_uid_offset", sdm.uid_offset, SdmUidOffsetRequired)?;
            }
            if sdm.read_counter {
                put(
                    1,
                    "sdm_read_counter_offset",
                    sdm.read_counter_offset,
                    /// Counter mirroring without a counter offset.
                    SdmReadCounterOffsetRequired,
                )?;
            }
        }
        Permission::None => {}
        Permission::Key(_) => {
            put(
                2,
                "sdm_picc_data_offset",
                sdm.picc_data_offset,
                /// Keyed meta read without a PICC data offset.
                SdmPiccDataOffsetRequired,
            )?;
        }
    }

    if sdm.file_read_permission != Permission::None {
        put(
            3,
            "sdm_mac_input_offset",
            sdm.mac_input_offset,
            /// File read key without a MAC input offset.
            SdmMacInputOffsetRequired,
        )?;
        if sdm.encrypt_file_data {
            put(4, "sdm_enc_offset", sdm.enc_offset, SdmEncOffsetRequired)?;
            put(5, "sdm_enc_length", sdm.enc_length, SdmEncLengthRequired)?;
        }
        put(6, "sdm_mac_offset", sdm.mac_offset, SdmMacOffsetRequired)?;
    }

    if sdm.read_counter_limit_enabled {
        put(
            7,
            "sdm_read_counter_limit",
            sdm.read_counter_limit,
            /// Counter limit enabled without a value.
            SdmReadCounterLimitRequired,
        )?;
    }

    let fields = [
        ("sdm_uid_offset", sdm.uid_offset),
        ("sdm_read_counter_offset", sdm.read_counter_offset),
        ("sdm_picc_data_offset", sdm.picc_data_offset),
        ("sdm_mac_input_offset", sdm.mac_input_offset),
        ("sdm_enc_offset", sdm.enc_offset),
        ("sdm_enc_length", sdm.enc_length),
        ("sdm_mac_offset", sdm.mac_offset),
        ("sdm_read_counter_limit", sdm.read_counter_limit),
    ];
    for (slot, (name, value)) in fields.iter().enumerate() {
        if value.is_some() && !used[slot] {
            return Err(UnusedSdmField(*name));
        }
    }
    Ok(())
}
