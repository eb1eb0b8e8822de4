// boltcard/src/crypto/aes.rs

use aes::Aes128;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::NoPadding};
use cmac::{Cmac, Mac};

use crate::constants::{BLOCK_SIZE, MAC_LEN};
use crate::{Error, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

/// AES-128-CBC encrypt a block-aligned buffer. No padding is applied.
pub fn cbc_encrypt(key: &[u8; 16], iv: &[u8; 16], data: &[u8]) -> Result<Vec<u8>> {
    let mut buf = data.to_vec();
    let len = buf.len();
    Aes128CbcEnc::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .encrypt_padded_mut::<NoPadding>(&mut buf, len)
        .map_err(|e| Error::Crypto(format!("cbc encrypt: {:?}", e)))?;
    Ok(buf)
}

/// AES-128-CBC decrypt a block-aligned buffer. Padding is left in place.
pub fn cbc_decrypt(key: &[u8; 16], iv: &[u8; 16], data: &[u8]) -> Result<Vec<u8>> {
    let mut buf = data.to_vec();
    let len = Aes128CbcDec::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|e| Error::Crypto(format!("cbc decrypt: {:?}", e)))?
        .len();
    buf.truncate(len);
    Ok(buf)
}

/// Encrypt a single block (CBC with zero IV degenerates to ECB).
pub fn ecb_encrypt_block(key: &[u8; 16], block: &[u8; 16]) -> Result<[u8; 16]> {
    let out = cbc_encrypt(key, &ZERO_IV, block)?;
    out.as_slice().try_into().map_err(|_| Error::InvalidLength {
        expected: BLOCK_SIZE,
        actual: out.len(),
    })
}

/// Full 16-byte AES-CMAC.
pub fn cmac(key: &[u8; 16], data: &[u8]) -> [u8; 16] {
    let mut mac = <Cmac<Aes128> as Mac>::new(GenericArray::from_slice(key));
    mac.update(data);
    let mut out = [0u8; 16];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Truncate a CMAC to the 8 bytes at odd positions (1, 3, .., 15).
pub fn truncate_mac(full: &[u8; 16]) -> [u8; MAC_LEN] {
    let mut out = [0u8; MAC_LEN];
    for (i, b) in out.iter_mut().enumerate() {
        *b = full[i * 2 + 1];
    }
    out
}
