//! Test support helpers intended for use by unit and integration tests.
//!
//! The fixtures reproduce one recorded EV2First exchange with the factory
//! key (16 zero bytes), so tests across the crate and the tests/ directory
//! can drive the secure channel against known-good frames.
#![allow(dead_code)]

use crate::crypto::aes::{cbc_encrypt, cmac, ecb_encrypt_block, truncate_mac};
use crate::crypto::kdf::{derive_session_keys, SessionKeys};
use crate::crypto::{pad_m2, AesMode};
use crate::session::Session;
use crate::transport::MockTransport;
use crate::types::{KeyNumber, TransactionId};

/// ChallengeA used by the recorded handshake.
#[doc(hidden)]
pub const GOLDEN_CHALLENGE_A: [u8; 16] = [
    0x13, 0xC5, 0xDB, 0x8A, 0x59, 0x30, 0x43, 0x9F, 0xC3, 0xDE, 0xF9, 0xA4, 0xC6, 0x75, 0x36, 0x0F,
];

/// ChallengeB chosen by the tag in the recorded handshake.
#[doc(hidden)]
pub const GOLDEN_CHALLENGE_B: [u8; 16] = [
    0xB9, 0xE2, 0xFC, 0x78, 0x9B, 0x64, 0xBF, 0x23, 0x7C, 0xCC, 0xAA, 0x20, 0xEC, 0x7E, 0x6E, 0x48,
];

/// Transaction identifier returned in the recorded handshake.
#[doc(hidden)]
pub const GOLDEN_TI: [u8; 4] = [0x9D, 0x00, 0xC4, 0xDF];

/// Stage 1 answer: E(K, ChallengeB) followed by `91 AF`.
#[doc(hidden)]
pub const GOLDEN_STAGE1_RESPONSE: &str = "a04c124213c186f22399d33ac2a30215 91af";

/// Stage 2 answer: E(K, TI || rotl(ChallengeA) || caps) followed by `91 00`.
#[doc(hidden)]
pub const GOLDEN_STAGE2_RESPONSE: &str =
    "3fa64db5446d1f34cd6ea311167f5e4985b89690c04a05f17fa7ab2f08120663 9100";

/// Decode a hex fixture, panicking on malformed input.
#[doc(hidden)]
pub fn h(s: &str) -> Vec<u8> {
    crate::utils::parse_hex(s).unwrap_or_else(|e| panic!("bad hex fixture {s:?}: {e}"))
}

/// Session equivalent to the recorded handshake, at the given counter.
#[doc(hidden)]
pub fn golden_session_at(command_counter: u16) -> Session {
    let mode = AesMode::new(&[0u8; 16], &GOLDEN_CHALLENGE_A, &GOLDEN_CHALLENGE_B)
        .unwrap_or_else(|e| panic!("golden session keys: {e}"));
    Session::from_parts(
        KeyNumber::Key0,
        command_counter,
        TransactionId::from_bytes(GOLDEN_TI),
        Box::new(mode),
    )
}

/// Freshly authenticated golden session.
#[doc(hidden)]
pub fn golden_session() -> Session {
    golden_session_at(0)
}

/// Queue both handshake answers, then the given raw responses.
#[doc(hidden)]
pub fn seed_handshake_and_responses(mock: &mut MockTransport, responses: Vec<Vec<u8>>) {
    mock.push_response(h(GOLDEN_STAGE1_RESPONSE));
    mock.push_response(h(GOLDEN_STAGE2_RESPONSE));
    for r in responses {
        mock.push_response(r);
    }
}

fn golden_keys() -> SessionKeys {
    derive_session_keys(&[0u8; 16], &GOLDEN_CHALLENGE_A, &GOLDEN_CHALLENGE_B)
        .unwrap_or_else(|e| panic!("golden session keys: {e}"))
}

/// MAC-mode answer `body || MAC || 91 00` as the tag computes it. `counter`
/// is the session counter after the command was counted.
#[doc(hidden)]
pub fn mac_response(counter: u16, body: &[u8]) -> Vec<u8> {
    let keys = golden_keys();
    let mut input = vec![0x00];
    input.extend_from_slice(&counter.to_le_bytes());
    input.extend_from_slice(&GOLDEN_TI);
    input.extend_from_slice(body);
    let mac = truncate_mac(&cmac(&keys.mac, &input));

    let mut out = body.to_vec();
    out.extend_from_slice(&mac);
    out.extend_from_slice(&[0x91, 0x00]);
    out
}

/// Full-mode answer: `plain` padded and encrypted under the response IV,
/// then sealed like [`mac_response`].
#[doc(hidden)]
pub fn full_response(counter: u16, plain: &[u8]) -> Vec<u8> {
    if plain.is_empty() {
        return mac_response(counter, &[]);
    }
    let keys = golden_keys();
    let mut iv_input = [0u8; 16];
    iv_input[..2].copy_from_slice(&[0x5A, 0xA5]);
    iv_input[2..6].copy_from_slice(&GOLDEN_TI);
    iv_input[6..8].copy_from_slice(&counter.to_le_bytes());
    let iv = ecb_encrypt_block(&keys.enc, &iv_input)
        .unwrap_or_else(|e| panic!("response iv: {e}"));
    let ciphertext = cbc_encrypt(&keys.enc, &iv, &pad_m2(plain))
        .unwrap_or_else(|e| panic!("response ciphertext: {e}"));
    mac_response(counter, &ciphertext)
}
