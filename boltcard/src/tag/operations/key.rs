use crate::protocol::commands::encode_change_key_data;
use crate::protocol::NativeCommand;
use crate::session::{SecureChannel, Session};
use crate::transport::Transport;
use crate::types::KeyNumber;
use crate::{Error, Result};

/// GetKeyVersion (MAC). Returns the version byte stored with the key.
pub async fn get_key_version<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
    key: KeyNumber,
) -> Result<u8> {
    let data = SecureChannel::new(transport, session)
        .send(&NativeCommand::GetKeyVersion { key })
        .await?;
    let version = data.first().copied().ok_or(Error::InvalidLength {
        expected: 1,
        actual: 0,
    })?;
    log::debug!("{} version {}", key, version);
    Ok(version)
}

/// ChangeKey (Full).
///
/// Changing the session's own key ends the session on the tag side: its
/// answer carries no MAC and any further command needs a new handshake.
pub async fn change_key<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
    key: KeyNumber,
    old_key: &[u8; 16],
    new_key: &[u8; 16],
    version: u8,
) -> Result<()> {
    let key_data = encode_change_key_data(session.active_key(), key, old_key, new_key, version)?;
    SecureChannel::new(transport, session)
        .send(&NativeCommand::ChangeKey { key, key_data })
        .await?;
    log::debug!("{} changed (version {})", key, version);
    Ok(())
}
