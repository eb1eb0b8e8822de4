use crate::file::{EncodingMode, FileSettings};
use crate::protocol::NativeCommand;
use crate::session::{SecureChannel, Session};
use crate::transport::Transport;
use crate::types::FileSpecifier;
use crate::Result;

/// GetFileSettings (MAC).
pub async fn get_file_settings<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
    file: FileSpecifier,
) -> Result<FileSettings> {
    let data = SecureChannel::new(transport, session)
        .send(&NativeCommand::GetFileSettings { file })
        .await?;
    FileSettings::decode(&data)
}

/// ChangeFileSettings (Full). Settings that fail to encode are never sent.
pub async fn change_file_settings<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
    file: FileSpecifier,
    settings: &FileSettings,
) -> Result<()> {
    let payload = settings.encode(EncodingMode::ChangeFileSettings)?;
    log::debug!(
        "changing settings of {}: {}",
        file,
        crate::utils::bytes_to_hex(&payload)
    );
    SecureChannel::new(transport, session)
        .send(&NativeCommand::ChangeFileSettings {
            file,
            settings: payload,
        })
        .await?;
    Ok(())
}
