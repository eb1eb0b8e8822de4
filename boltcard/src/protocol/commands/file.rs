// boltcard/src/protocol/commands/file.rs

use crate::types::FileSpecifier;
use crate::utils::bits::{U24_MAX, u24_le};
use crate::{Error, Result};

/// Encode the ReadData/WriteData header: `file || offset(3 LE) || length(3 LE)`.
pub fn encode_file_window(file: FileSpecifier, offset: u32, length: u32) -> Result<[u8; 7]> {
    let too_large = |actual: u32| Error::InvalidLength {
        expected: U24_MAX as usize,
        actual: actual as usize,
    };
    let off = u24_le(offset).ok_or_else(|| too_large(offset))?;
    let len = u24_le(length).ok_or_else(|| too_large(length))?;

    let mut out = [0u8; 7];
    out[0] = file.file_number();
    out[1..4].copy_from_slice(&off);
    out[4..7].copy_from_slice(&len);
    Ok(out)
}
