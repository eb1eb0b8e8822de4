// boltcard/src/tag/mod.rs
//! Upward interface to a presented tag.
//!
//! [`Tag`] owns the transport for one presentment. Secure commands take the
//! [`Session`] returned by [`Tag::authenticate`] by exclusive reference, so
//! commands on one session are strictly sequential and its counter advances
//! once per command.

/// Per-command implementations behind [`Tag`].
pub mod operations;

use crate::file::{CapabilitiesContainer, FileSettings};
use crate::session::{Authenticator, Session};
use crate::transport::Transport;
use crate::types::{ChipUid, CommunicationMode, FileSpecifier, KeyNumber};
use crate::Result;

/// A tag reachable through a [`Transport`].
///
/// Authenticated operations take the [`Session`] returned by
/// [`Tag::authenticate`] by exclusive reference.
pub struct Tag<T> {
    transport: T,
}

impl<T: Transport> Tag<T> {
    /// Wrap a connected transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The underlying transport, mutably.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// ISO SELECT of the NDEF tag application. Hosts that select it
    /// themselves may skip this.
    pub async fn select_ndef_application(&mut self) -> Result<()> {
        operations::select_ndef_application(&mut self.transport).await
    }

    /// EV2First handshake with a random ChallengeA.
    pub async fn authenticate(&mut self, key: KeyNumber, key_data: &[u8; 16]) -> Result<Session> {
        Authenticator::new()
            .authenticate(&mut self.transport, key, key_data)
            .await
    }

    /// EV2First handshake driven by a caller-supplied authenticator, e.g.
    /// one built with a fixed challenge.
    pub async fn authenticate_with(
        &mut self,
        authenticator: &mut Authenticator,
        key: KeyNumber,
        key_data: &[u8; 16],
    ) -> Result<Session> {
        authenticator
            .authenticate(&mut self.transport, key, key_data)
            .await
    }

    /// Read the 7-byte chip UID (Full mode).
    pub async fn get_chip_uid(&mut self, session: &mut Session) -> Result<ChipUid> {
        operations::get_chip_uid(&mut self.transport, session).await
    }

    /// Version byte of a key slot.
    pub async fn get_key_version(&mut self, session: &mut Session, key: KeyNumber) -> Result<u8> {
        operations::get_key_version(&mut self.transport, session, key).await
    }

    /// Replace the key in `key`. `old_key` is only used when `key` is not
    /// the session's authentication key.
    pub async fn change_key(
        &mut self,
        session: &mut Session,
        key: KeyNumber,
        old_key: &[u8; 16],
        new_key: &[u8; 16],
        version: u8,
    ) -> Result<()> {
        operations::change_key(&mut self.transport, session, key, old_key, new_key, version).await
    }

    /// Read `length` bytes from `offset`; a length of 0 reads to the end of
    /// the file.
    pub async fn read_file_data(
        &mut self,
        session: &mut Session,
        file: FileSpecifier,
        offset: usize,
        length: usize,
        mode: CommunicationMode,
    ) -> Result<Vec<u8>> {
        operations::read_file_data(&mut self.transport, session, file, offset, length, mode).await
    }

    /// Write `data` at `offset` in chunks of at most 128 bytes.
    pub async fn write_file_data(
        &mut self,
        session: &mut Session,
        file: FileSpecifier,
        offset: usize,
        data: &[u8],
        mode: CommunicationMode,
    ) -> Result<()> {
        operations::write_file_data(&mut self.transport, session, file, offset, data, mode).await
    }

    /// Read and decode the settings of a file.
    pub async fn get_file_settings(
        &mut self,
        session: &mut Session,
        file: FileSpecifier,
    ) -> Result<FileSettings> {
        operations::get_file_settings(&mut self.transport, session, file).await
    }

    /// Encode and write new settings for a file.
    pub async fn change_file_settings(
        &mut self,
        session: &mut Session,
        file: FileSpecifier,
        settings: &FileSettings,
    ) -> Result<()> {
        operations::change_file_settings(&mut self.transport, session, file, settings).await
    }

    /// Read and decode the capability container (file 1).
    pub async fn read_capabilities_container(
        &mut self,
        session: &mut Session,
        mode: CommunicationMode,
    ) -> Result<CapabilitiesContainer> {
        operations::read_capabilities_container(&mut self.transport, session, mode).await
    }
}
