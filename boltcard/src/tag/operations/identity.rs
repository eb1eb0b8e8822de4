use crate::constants::SW_OK;
use crate::protocol::commands::encode_select_ndef_application;
use crate::protocol::NativeCommand;
use crate::session::channel::transmit;
use crate::session::{SecureChannel, Session};
use crate::transport::Transport;
use crate::types::ChipUid;
use crate::Result;

/// ISO SELECT of the NDEF tag application; requires `90 00`.
pub async fn select_ndef_application<T: Transport + ?Sized>(transport: &mut T) -> Result<()> {
    let apdu = encode_select_ndef_application()?;
    let result = transmit(transport, &apdu).await?;
    result
        .expect_status(SW_OK[0], SW_OK[1])
        .inspect_err(|e| log::warn!("NDEF application select failed: {}", e))?;
    log::debug!("NDEF application selected");
    Ok(())
}

/// GetCardUID (Full). The tag answers with its 7-byte UID even when random
/// ID is enabled.
pub async fn get_chip_uid<T: Transport + ?Sized>(
    transport: &mut T,
    session: &mut Session,
) -> Result<ChipUid> {
    let data = SecureChannel::new(transport, session)
        .send(&NativeCommand::GetCardUid)
        .await?;
    ChipUid::try_from(data.as_slice())
}
