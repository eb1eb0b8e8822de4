// boltcard/src/emulation/command_apdu.rs

use crate::constants::{CC_SELECT_PREFIX, INS_READ_BINARY, INS_SELECT, NDEF_APPLICATION_SELECT_PREFIX};
use crate::protocol::parser::{byte_at, ensure_len};
use crate::{Error, Result};

/// Short-form command APDU received from a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandApdu {
    /// Class byte.
    pub cla: u8,
    /// Instruction byte.
    pub ins: u8,
    /// First parameter.
    pub p1: u8,
    /// Second parameter.
    pub p2: u8,
    /// Command data (Lc bytes).
    pub data: Vec<u8>,
    /// Expected response length, if present.
    pub le: Option<u8>,
    raw: Vec<u8>,
}

/// SELECT by file identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectFileCommand {
    /// ISO file identifier.
    pub file_id: [u8; 2],
}

/// READ BINARY of the currently selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBinaryCommand {
    /// Start offset in the selected file.
    pub offset: u16,
    /// Bytes requested; Le 0 means 256.
    pub length: usize,
}

impl CommandApdu {
    /// Parse `CLA INS P1 P2 [Lc data] [Le]`. The declared Lc must account
    /// for every byte after it, with at most one trailing Le.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        ensure_len(raw, 4)?;
        let (data, le) = match raw.len() {
            4 => (Vec::new(), None),
            5 => (Vec::new(), Some(raw[4])),
            len => {
                let lc = byte_at(raw, 4)? as usize;
                if lc == 0 {
                    return Err(Error::Decoding("extended length APDUs are not supported".into()));
                }
                let le = if len == 5 + lc {
                    None
                } else if len == 6 + lc {
                    Some(raw[len - 1])
                } else {
                    return Err(Error::Decoding(format!(
                        "Lc {} does not match APDU length {}",
                        lc, len
                    )));
                };
                (raw[5..5 + lc].to_vec(), le)
            }
        };
        Ok(Self {
            cla: raw[0],
            ins: raw[1],
            p1: raw[2],
            p2: raw[3],
            data,
            le,
            raw: raw.to_vec(),
        })
    }

    /// The APDU exactly as received.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// SELECT of the NFC Forum NDEF tag application (D2760000850101).
    pub fn is_ndef_tag_application_select(&self) -> bool {
        self.raw.starts_with(&NDEF_APPLICATION_SELECT_PREFIX)
    }

    /// SELECT of the capability container file (E103).
    pub fn is_capability_container_select(&self) -> bool {
        self.raw.starts_with(&CC_SELECT_PREFIX)
    }

    /// SELECT by file identifier (P1 = 00) with a 2-byte identifier.
    pub fn as_select_file(&self) -> Option<SelectFileCommand> {
        if self.cla != 0x00 || self.ins != INS_SELECT || self.p1 != 0x00 {
            return None;
        }
        match self.data.as_slice() {
            [hi, lo] => Some(SelectFileCommand {
                file_id: [*hi, *lo],
            }),
            _ => None,
        }
    }

    /// READ BINARY with a 15-bit offset. An Le of 00 asks for 256 bytes, a
    /// missing Le for none.
    pub fn as_read_binary(&self) -> Option<ReadBinaryCommand> {
        if self.cla != 0x00 || self.ins != INS_READ_BINARY || self.p1 & 0x80 != 0 {
            return None;
        }
        let length = match self.le {
            Some(0) => 256,
            Some(n) => n as usize,
            None => 0,
        };
        Some(ReadBinaryCommand {
            offset: u16::from_be_bytes([self.p1, self.p2]),
            length,
        })
    }
}
