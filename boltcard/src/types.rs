// boltcard/src/types.rs

use derive_more::Display;
use std::convert::TryFrom;

use crate::Error;

/// Key slot on the tag (an application holds five AES keys).
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyNumber {
    /// Application master key.
    #[display(fmt = "key0")]
    Key0 = 0,
    /// Key 1.
    #[display(fmt = "key1")]
    Key1 = 1,
    /// Key 2.
    #[display(fmt = "key2")]
    Key2 = 2,
    /// Key 3.
    #[display(fmt = "key3")]
    Key3 = 3,
    /// Key 4.
    #[display(fmt = "key4")]
    Key4 = 4,
}

impl KeyNumber {
    /// Slot index as sent on the wire.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// The following slot, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Key0 => Some(Self::Key1),
            Self::Key1 => Some(Self::Key2),
            Self::Key2 => Some(Self::Key3),
            Self::Key3 => Some(Self::Key4),
            Self::Key4 => None,
        }
    }

    /// Access right granted to holders of this key.
    pub fn to_permission(&self) -> Permission {
        Permission::Key(self.as_u8())
    }
}

impl TryFrom<u8> for KeyNumber {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Key0),
            1 => Ok(Self::Key1),
            2 => Ok(Self::Key2),
            3 => Ok(Self::Key3),
            4 => Ok(Self::Key4),
            other => Err(Error::Decoding(format!("invalid key number {other}"))),
        }
    }
}

/// 4-bit access condition.
///
/// Values 0x0..=0xD name a key slot, 0xE grants free access and 0xF denies
/// access. Decoding a nibble always succeeds; a `Key` above
/// [`Permission::MAX_KEY`] has no nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Permission {
    /// Holders of this key index.
    Key(u8),
    /// Free access.
    All,
    /// No access.
    None,
}

impl Permission {
    /// Highest key index an access condition can name.
    pub const MAX_KEY: u8 = 0x0d;

    /// Decode the low nibble of `nibble`.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0f {
            0x0e => Self::All,
            0x0f => Self::None,
            n => Self::Key(n),
        }
    }

    /// Encoded nibble, or `None` for a key index above [`Self::MAX_KEY`].
    pub fn to_nibble(&self) -> Option<u8> {
        match self {
            Self::Key(n) if *n <= Self::MAX_KEY => Some(*n),
            Self::Key(_) => None,
            Self::All => Some(0x0e),
            Self::None => Some(0x0f),
        }
    }
}

impl Default for Permission {
    fn default() -> Self {
        Permission::None
    }
}

/// Wrapping applied to a logical command.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommunicationMode {
    /// No protection.
    #[default]
    #[display(fmt = "plain")]
    Plain,
    /// Truncated CMAC on command and response.
    #[display(fmt = "mac")]
    Mac,
    /// Encrypted and MACed.
    #[display(fmt = "full")]
    Full,
}

/// Standard data files of the NDEF application.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileSpecifier {
    /// Capability container.
    #[display(fmt = "CC file (#1)")]
    Cc,
    /// NDEF message.
    #[display(fmt = "NDEF file (#2)")]
    Ndef,
    /// Proprietary data.
    #[display(fmt = "proprietary file (#3)")]
    Proprietary,
}

impl FileSpecifier {
    /// Native file number.
    pub fn file_number(&self) -> u8 {
        match self {
            Self::Cc => 0x01,
            Self::Ndef => 0x02,
            Self::Proprietary => 0x03,
        }
    }

    /// ISO 7816-4 file identifier.
    pub fn iso_file_id(&self) -> [u8; 2] {
        match self {
            Self::Cc => [0xE1, 0x03],
            Self::Ndef => [0xE1, 0x04],
            Self::Proprietary => [0xE1, 0x05],
        }
    }

    /// Built-in file size in bytes.
    pub fn max_size(&self) -> usize {
        match self {
            Self::Cc => 32,
            Self::Ndef => 256,
            Self::Proprietary => 128,
        }
    }

    /// Look up a file by its ISO identifier.
    pub fn from_iso_file_id(id: [u8; 2]) -> Option<Self> {
        [Self::Cc, Self::Ndef, Self::Proprietary]
            .into_iter()
            .find(|f| f.iso_file_id() == id)
    }
}

/// Transaction identifier returned by the tag at authentication (4 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId([u8; 4]);

impl TransactionId {
    /// Wrap raw TI bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw TI bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for TransactionId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 4] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 4,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

/// 7-byte chip UID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChipUid([u8; 7]);

impl ChipUid {
    /// Wrap raw UID bytes.
    pub fn from_bytes(bytes: [u8; 7]) -> Self {
        Self(bytes)
    }

    /// Raw UID bytes.
    pub fn as_bytes(&self) -> &[u8; 7] {
        &self.0
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for ChipUid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 7] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 7,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}
