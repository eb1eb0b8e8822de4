// boltcard/src/file/capabilities.rs

use crate::protocol::parser::{be_u16_at, ensure_len, Cursor};
use crate::Result;

/// Size of the fixed capability container header.
pub const CC_HEADER_LEN: usize = 7;
/// Size of one file control TLV.
pub const CTRL_TLV_LEN: usize = 8;

/// File control TLV of the capability container (NDEF file: T=4,
/// proprietary file: T=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtrlTlv {
    /// Block type, [`NDEF_FILE`] or [`PROPRIETARY_FILE`].
    pub t: u8,
    /// Block length, always 6.
    pub l: u8,
    /// ISO file identifier.
    pub file_id: [u8; 2],
    /// Maximum file size.
    pub file_size: u16,
    /// Read access condition.
    pub read_access: u8,
    /// Write access condition.
    pub write_access: u8,
}

impl CtrlTlv {
    /// TLV type of an NDEF file control block.
    pub const NDEF_FILE: u8 = 0x04;
    /// TLV type of a proprietary file control block.
    pub const PROPRIETARY_FILE: u8 = 0x05;

    /// NDEF file control TLV of the emulated tag.
    pub fn emulated_ndef_file() -> Self {
        Self {
            t: Self::NDEF_FILE,
            l: 6,
            file_id: [0xE1, 0x04],
            file_size: 512,
            read_access: 0x00,
            write_access: 0xFF,
        }
    }

    fn decode(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            t: c.u8()?,
            l: c.u8()?,
            file_id: [c.u8()?, c.u8()?],
            file_size: c.be_u16()?,
            read_access: c.u8()?,
            write_access: c.u8()?,
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.t);
        out.push(self.l);
        out.extend_from_slice(&self.file_id);
        out.extend_from_slice(&self.file_size.to_be_bytes());
        out.push(self.read_access);
        out.push(self.write_access);
    }
}

/// NFC Forum Type 4 capability container (file E103).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilitiesContainer {
    /// CCLEN.
    pub len: u16,
    /// Mapping version.
    pub version: u8,
    /// Maximum R-APDU data size.
    pub m_le: u16,
    /// Maximum C-APDU data size.
    pub m_lc: u16,
    /// One control block per file.
    pub files: Vec<CtrlTlv>,
}

impl CapabilitiesContainer {
    /// Container served by the card emulator: one 512-byte NDEF file,
    /// readable by anyone and never writable.
    pub fn emulated_default() -> Self {
        Self {
            len: 15,
            version: 0x20,
            m_le: 256,
            m_lc: 255,
            files: vec![CtrlTlv::emulated_ndef_file()],
        }
    }

    /// Parse a container. TLVs are read in 8-byte blocks until fewer than
    /// 8 bytes remain, so the count is `(len - 7) / 8`.
    pub fn decode(data: &[u8]) -> Result<Self> {
        ensure_len(data, CC_HEADER_LEN)?;
        let mut c = Cursor::new(data);
        let len = c.be_u16()?;
        let version = c.u8()?;
        let m_le = c.be_u16()?;
        let m_lc = c.be_u16()?;

        let count = (data.len() - CC_HEADER_LEN) / CTRL_TLV_LEN;
        let files = (0..count)
            .map(|_| CtrlTlv::decode(&mut c))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            len,
            version,
            m_le,
            m_lc,
            files,
        })
    }

    /// Decode a raw file-1 image, ignoring bytes past its CCLEN.
    pub fn decode_file(image: &[u8]) -> Result<Self> {
        let cc_len = be_u16_at(image, 0)? as usize;
        Self::decode(&image[..cc_len.min(image.len())])
    }

    /// Serialize header and TLV blocks.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(CC_HEADER_LEN + self.files.len() * CTRL_TLV_LEN);
        out.extend_from_slice(&self.len.to_be_bytes());
        out.push(self.version);
        out.extend_from_slice(&self.m_le.to_be_bytes());
        out.extend_from_slice(&self.m_lc.to_be_bytes());
        for tlv in &self.files {
            tlv.encode_into(&mut out);
        }
        out
    }

    /// TLV describing the given ISO file identifier, if any.
    pub fn file(&self, file_id: [u8; 2]) -> Option<&CtrlTlv> {
        self.files.iter().find(|f| f.file_id == file_id)
    }
}
