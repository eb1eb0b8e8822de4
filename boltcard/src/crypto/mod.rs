// boltcard/src/crypto/mod.rs
//! Cryptographic building blocks of EV2 secure messaging.
//!
//! Everything here is AES-128 based: CBC with caller-provided IV and no
//! implicit padding, CMAC truncated to the odd-indexed bytes, and the
//! session key derivation from AN12196.

/// Raw AES-128 CBC/ECB and CMAC.
pub mod aes;
pub mod kdf;
/// Session encryption modes.
pub mod mode;

pub use self::aes::{cbc_decrypt, cbc_encrypt, cmac, ecb_encrypt_block, truncate_mac};
pub use kdf::{SessionKeys, derive_session_keys};
pub use mode::{AesMode, EncryptionMode};

use crate::constants::BLOCK_SIZE;
use crate::{Error, Result};

/// Rotate a byte string left by one byte.
pub fn rotate_left(value: &[u8]) -> Vec<u8> {
    let mut out = value.to_vec();
    if !out.is_empty() {
        out.rotate_left(1);
    }
    out
}

/// Rotate a byte string right by one byte.
pub fn rotate_right(value: &[u8]) -> Vec<u8> {
    let mut out = value.to_vec();
    if !out.is_empty() {
        out.rotate_right(1);
    }
    out
}

/// ISO/IEC 9797-1 padding method 2: always append 0x80, then zeros up to a
/// block boundary. A block-aligned message gains a full padding block.
pub fn pad_m2(message: &[u8]) -> Vec<u8> {
    let padded_len = (message.len() / BLOCK_SIZE + 1) * BLOCK_SIZE;
    let mut out = Vec::with_capacity(padded_len);
    out.extend_from_slice(message);
    out.push(0x80);
    out.resize(padded_len, 0x00);
    out
}

/// Strip ISO/IEC 9797-1 method 2 padding.
pub fn unpad_m2(padded: &[u8]) -> Result<&[u8]> {
    let marker = padded
        .iter()
        .rposition(|&b| b != 0x00)
        .ok_or_else(|| Error::Crypto("padding marker missing".into()))?;
    if padded[marker] != 0x80 || padded.len() - marker > BLOCK_SIZE {
        return Err(Error::Crypto("invalid padding".into()));
    }
    Ok(&padded[..marker])
}

/// Byte-wise XOR of two equally long slices.
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        return Err(Error::InvalidLength {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// CRC32 without the final inversion (JAMCRC), little-endian, as the tag
/// expects it in ChangeKey.
pub fn jamcrc32(data: &[u8]) -> [u8; 4] {
    (!crc32fast::hash(data)).to_le_bytes()
}
