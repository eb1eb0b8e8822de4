// boltcard/src/crypto/mode.rs

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::aes::{cbc_decrypt, cbc_encrypt, cmac, ecb_encrypt_block, truncate_mac};
use super::kdf::{SessionKeys, derive_session_keys};
use super::{pad_m2, unpad_m2};
use crate::constants::{BLOCK_SIZE, MAC_LEN};
use crate::types::TransactionId;
use crate::{Error, Result};

const COMMAND_IV_LABEL: [u8; 2] = [0xA5, 0x5A];
const RESPONSE_IV_LABEL: [u8; 2] = [0x5A, 0xA5];

/// Session cryptography used by the secure channel.
///
/// `counter` is always the value that belongs in the IV: the current
/// command counter when encrypting a command, the incremented one when
/// decrypting the response.
pub trait EncryptionMode: Send + Sync + fmt::Debug {
    /// Pad (ISO/IEC 9797-1 M2) and encrypt a command payload.
    fn encrypt(&self, message: &[u8], counter: u16, ti: &TransactionId) -> Result<Vec<u8>>;

    /// Decrypt and unpad a response payload.
    fn decrypt(&self, message: &[u8], counter: u16, ti: &TransactionId) -> Result<Vec<u8>>;

    /// Truncated CMAC under the session MAC key.
    fn cmac(&self, message: &[u8]) -> [u8; MAC_LEN];
}

/// AES-128 EV2 secure messaging.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AesMode {
    keys: SessionKeys,
    challenge_a: [u8; 16],
    challenge_b: [u8; 16],
}

impl AesMode {
    /// Derive session keys from the static key and both challenges.
    pub fn new(key: &[u8; 16], challenge_a: &[u8; 16], challenge_b: &[u8; 16]) -> Result<Self> {
        Ok(Self {
            keys: derive_session_keys(key, challenge_a, challenge_b)?,
            challenge_a: *challenge_a,
            challenge_b: *challenge_b,
        })
    }

    /// ChallengeA (RndA) of the handshake.
    pub fn challenge_a(&self) -> &[u8; 16] {
        &self.challenge_a
    }

    /// ChallengeB (RndB) of the handshake.
    pub fn challenge_b(&self) -> &[u8; 16] {
        &self.challenge_b
    }

    fn iv(&self, label: [u8; 2], counter: u16, ti: &TransactionId) -> Result<[u8; 16]> {
        let mut block = [0u8; BLOCK_SIZE];
        block[0..2].copy_from_slice(&label);
        block[2..6].copy_from_slice(ti.as_bytes());
        block[6..8].copy_from_slice(&counter.to_le_bytes());
        ecb_encrypt_block(&self.keys.enc, &block)
    }
}

impl fmt::Debug for AesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesMode").finish_non_exhaustive()
    }
}

impl EncryptionMode for AesMode {
    fn encrypt(&self, message: &[u8], counter: u16, ti: &TransactionId) -> Result<Vec<u8>> {
        if message.is_empty() {
            return Ok(Vec::new());
        }
        let iv = self.iv(COMMAND_IV_LABEL, counter, ti)?;
        cbc_encrypt(&self.keys.enc, &iv, &pad_m2(message))
    }

    fn decrypt(&self, message: &[u8], counter: u16, ti: &TransactionId) -> Result<Vec<u8>> {
        if message.is_empty() {
            return Ok(Vec::new());
        }
        if message.len() % BLOCK_SIZE != 0 {
            return Err(Error::Decoding(format!(
                "encrypted response of {} bytes is not block aligned",
                message.len()
            )));
        }
        let iv = self.iv(RESPONSE_IV_LABEL, counter, ti)?;
        let plain = cbc_decrypt(&self.keys.enc, &iv, message)?;
        Ok(unpad_m2(&plain)?.to_vec())
    }

    fn cmac(&self, message: &[u8]) -> [u8; MAC_LEN] {
        truncate_mac(&cmac(&self.keys.mac, message))
    }
}
