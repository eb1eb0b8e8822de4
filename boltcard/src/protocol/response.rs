// boltcard/src/protocol/response.rs

use crate::constants::{STATUS_ADDITIONAL_FRAME, STATUS_NATIVE, STATUS_OK};
use crate::{Error, Result};

/// A tag response split into data and the two status bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NxpCommandResult {
    /// Response body without status bytes.
    pub data: Vec<u8>,
    /// SW1.
    pub status_major: u8,
    /// SW2.
    pub status_minor: u8,
}

impl NxpCommandResult {
    /// Split a raw response; at least the two status bytes are required.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        if raw.len() < 2 {
            return Err(Error::InvalidLength {
                expected: 2,
                actual: raw.len(),
            });
        }
        let (data, status) = raw.split_at(raw.len() - 2);
        Ok(Self {
            data: data.to_vec(),
            status_major: status[0],
            status_minor: status[1],
        })
    }

    /// Status byte 1 signals a well-formed native envelope.
    pub fn is_native(&self) -> bool {
        self.status_major == STATUS_NATIVE
    }

    /// `91 00`
    pub fn is_success(&self) -> bool {
        self.is_native() && self.status_minor == STATUS_OK
    }

    /// `91 AF`
    pub fn is_additional_frame(&self) -> bool {
        self.is_native() && self.status_minor == STATUS_ADDITIONAL_FRAME
    }

    /// Fail with `Error::Status` unless the status bytes equal the expected pair.
    pub fn expect_status(&self, status_major: u8, status_minor: u8) -> Result<()> {
        if self.status_major != status_major || self.status_minor != status_minor {
            return Err(Error::status(self.status_major, self.status_minor));
        }
        Ok(())
    }
}
