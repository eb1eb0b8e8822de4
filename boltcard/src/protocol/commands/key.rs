// boltcard/src/protocol/commands/key.rs

use crate::crypto::{jamcrc32, xor};
use crate::types::KeyNumber;
use crate::Result;

/// Build the unencrypted ChangeKey cryptogram.
///
/// Changing the key used to authenticate the session sends `new || version`.
/// Any other slot sends `(new ^ old) || version || JAMCRC32(new)` so the tag
/// can check knowledge of the old key.
pub fn encode_change_key_data(
    active: KeyNumber,
    target: KeyNumber,
    old_key: &[u8; 16],
    new_key: &[u8; 16],
    version: u8,
) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(21);
    if active == target {
        out.extend_from_slice(new_key);
        out.push(version);
    } else {
        out.extend_from_slice(&xor(new_key, old_key)?);
        out.push(version);
        out.extend_from_slice(&jamcrc32(new_key));
    }
    Ok(out)
}
