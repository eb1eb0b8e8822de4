// boltcard/src/crypto/kdf.rs
//! EV2 session key derivation (AN12196, section 9.1.7).

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::aes::cmac;
use crate::constants::CHALLENGE_LEN;
use crate::{Error, Result};

const SV1_LABEL: [u8; 6] = [0xA5, 0x5A, 0x00, 0x01, 0x00, 0x80];
const SV2_LABEL: [u8; 6] = [0x5A, 0xA5, 0x00, 0x01, 0x00, 0x80];

/// Encryption and MAC keys of one authenticated session.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionKeys {
    /// SesAuthENCKey.
    pub enc: [u8; 16],
    /// SesAuthMACKey.
    pub mac: [u8; 16],
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKeys { .. }")
    }
}

/// 26-byte context shared by both session vectors:
/// `RndA[0..2] || (RndA[2..8] ^ RndB[0..6]) || RndB[6..16] || RndA[8..16]`.
pub fn session_vector_context(rnd_a: &[u8], rnd_b: &[u8]) -> Result<[u8; 26]> {
    for r in [rnd_a, rnd_b] {
        if r.len() != CHALLENGE_LEN {
            return Err(Error::InvalidLength {
                expected: CHALLENGE_LEN,
                actual: r.len(),
            });
        }
    }
    let mut ctx = [0u8; 26];
    ctx[0..2].copy_from_slice(&rnd_a[0..2]);
    for i in 0..6 {
        ctx[2 + i] = rnd_a[2 + i] ^ rnd_b[i];
    }
    ctx[8..18].copy_from_slice(&rnd_b[6..16]);
    ctx[18..26].copy_from_slice(&rnd_a[8..16]);
    Ok(ctx)
}

/// Build SV1 (encryption) or SV2 (MAC) from a label and the shared context.
fn session_vector(label: &[u8; 6], ctx: &[u8; 26]) -> [u8; 32] {
    let mut sv = [0u8; 32];
    sv[..6].copy_from_slice(label);
    sv[6..].copy_from_slice(ctx);
    sv
}

/// Derive `K_enc = CMAC(K, SV1)` and `K_mac = CMAC(K, SV2)`.
pub fn derive_session_keys(key: &[u8; 16], rnd_a: &[u8], rnd_b: &[u8]) -> Result<SessionKeys> {
    let ctx = session_vector_context(rnd_a, rnd_b)?;
    Ok(SessionKeys {
        enc: cmac(key, &session_vector(&SV1_LABEL, &ctx)),
        mac: cmac(key, &session_vector(&SV2_LABEL, &ctx)),
    })
}
