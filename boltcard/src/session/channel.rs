// boltcard/src/session/channel.rs

use crate::constants::MAC_LEN;
use crate::protocol::frame::encode_native;
use crate::protocol::{NativeCommand, NxpCommandResult};
use crate::session::Session;
use crate::transport::Transport;
use crate::types::CommunicationMode;
use crate::{Error, Result};

/// Exchange one raw APDU and split the response. No session state is
/// touched here.
pub(crate) async fn transmit<T: Transport + ?Sized>(
    transport: &mut T,
    apdu: &[u8],
) -> Result<NxpCommandResult> {
    #[cfg(feature = "diagnostics")]
    log::trace!(">> {}", crate::utils::bytes_to_hex_spaced(apdu));

    let raw = transport.transceive(apdu).await?;

    #[cfg(feature = "diagnostics")]
    log::trace!("<< {}", crate::utils::bytes_to_hex_spaced(&raw));

    NxpCommandResult::parse(&raw)
}

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}

/// Plain/MAC/Full command wrapping over an authenticated session.
///
/// Every dispatched native command advances the session counter exactly
/// once, after the exchange returns and whatever its outcome.
pub struct SecureChannel<'a, T: ?Sized> {
    transport: &'a mut T,
    session: &'a mut Session,
}

impl<'a, T: Transport + ?Sized> SecureChannel<'a, T> {
    /// Borrow the link and session for a run of commands.
    pub fn new(transport: &'a mut T, session: &'a mut Session) -> Self {
        Self { transport, session }
    }

    /// The session being advanced.
    pub fn session(&self) -> &Session {
        self.session
    }

    /// Send a command in the mode it declares.
    pub async fn send(&mut self, command: &NativeCommand) -> Result<Vec<u8>> {
        let header = command.header()?;
        let code = command.code();
        match command.mode() {
            CommunicationMode::Plain => self.send_plain(code, &header, command.data()).await,
            CommunicationMode::Mac => self.send_mac(code, &header, command.data()).await,
            CommunicationMode::Full => self.send_full(code, &header, command.data()).await,
        }
    }

    /// Header and data pass through unmodified; nothing is MAC'd.
    pub async fn send_plain(&mut self, code: u8, header: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let result = self.dispatch(code, &concat(&[header, data])).await?;
        Self::require_success(code, &result)?;
        Ok(result.data)
    }

    /// Append the command MAC and verify the response MAC.
    pub async fn send_mac(&mut self, code: u8, header: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let counter = self.session.command_counter();
        let mac = self.command_mac(code, counter, header, data);
        let result = self
            .dispatch(code, &concat(&[header, data, &mac]))
            .await?;
        Self::require_success(code, &result)?;
        self.verify_response(&result, counter.wrapping_add(1))
    }

    /// Encrypt data, MAC the ciphertext, verify and decrypt the response.
    pub async fn send_full(&mut self, code: u8, header: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let counter = self.session.command_counter();
        let ti = *self.session.transaction_id();
        let encrypted = self.session.mode().encrypt(data, counter, &ti)?;
        let mac = self.command_mac(code, counter, header, &encrypted);
        let result = self
            .dispatch(code, &concat(&[header, &encrypted, &mac]))
            .await?;
        Self::require_success(code, &result)?;
        let body = self.verify_response(&result, counter.wrapping_add(1))?;
        self.session
            .mode()
            .decrypt(&body, counter.wrapping_add(1), &ti)
    }

    async fn dispatch(&mut self, code: u8, payload: &[u8]) -> Result<NxpCommandResult> {
        let frame = encode_native(code, payload)?;
        log::debug!(
            "native command {:#04x} ({} bytes) at counter {}",
            code,
            payload.len(),
            self.session.command_counter()
        );
        let outcome = transmit(&mut *self.transport, &frame).await;
        self.session.advance_counter();
        outcome
    }

    fn require_success(code: u8, result: &NxpCommandResult) -> Result<()> {
        if !result.is_success() {
            log::warn!(
                "native command {:#04x} failed with status {:02x} {:02x}",
                code,
                result.status_major,
                result.status_minor
            );
            return Err(Error::status(result.status_major, result.status_minor));
        }
        Ok(())
    }

    /// `CMAC(cmd || counter LE || TI || header || data)`.
    fn command_mac(&self, code: u8, counter: u16, header: &[u8], data: &[u8]) -> [u8; MAC_LEN] {
        let input = concat(&[
            &[code],
            &counter.to_le_bytes(),
            self.session.transaction_id().as_bytes(),
            header,
            data,
        ]);
        self.session.mode().cmac(&input)
    }

    /// Strip and check the trailing response MAC. Responses shorter than a
    /// MAC carry none and are returned as-is.
    fn verify_response(&self, result: &NxpCommandResult, counter: u16) -> Result<Vec<u8>> {
        if result.data.len() < MAC_LEN {
            return Ok(result.data.clone());
        }
        let (body, mac) = result.data.split_at(result.data.len() - MAC_LEN);
        let input = concat(&[
            &[result.status_minor],
            &counter.to_le_bytes(),
            self.session.transaction_id().as_bytes(),
            body,
        ]);
        if self.session.mode().cmac(&input).as_slice() != mac {
            log::warn!("response MAC mismatch at counter {}", counter);
            return Err(Error::InvalidMac);
        }
        Ok(body.to_vec())
    }
}
