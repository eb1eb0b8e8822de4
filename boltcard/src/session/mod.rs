// boltcard/src/session/mod.rs
//! Authenticated session state and the secure command channel.
//!
//! A [`Session`] is produced by [`Authenticator::authenticate`] and then
//! passed by exclusive reference to every secure command. It lives for one
//! tag presentment: when the tag leaves the field the session is dropped and
//! a new handshake is required.

/// EV2First handshake.
pub mod auth;
/// Plain, MAC and Full command wrapping.
pub mod channel;

pub use auth::{AuthState, Authenticator};
pub use channel::SecureChannel;

use crate::crypto::EncryptionMode;
use crate::types::{KeyNumber, TransactionId};

/// State shared by all commands of one authenticated presentment.
#[derive(Debug)]
pub struct Session {
    active_key: KeyNumber,
    command_counter: u16,
    transaction_id: TransactionId,
    mode: Box<dyn EncryptionMode>,
}

impl Session {
    /// Assemble a session from its parts. `authenticate` is the normal way to
    /// obtain one; this exists for replaying recorded sessions.
    pub fn from_parts(
        active_key: KeyNumber,
        command_counter: u16,
        transaction_id: TransactionId,
        mode: Box<dyn EncryptionMode>,
    ) -> Self {
        Self {
            active_key,
            command_counter,
            transaction_id,
            mode,
        }
    }

    /// Key slot the handshake was performed with.
    pub fn active_key(&self) -> KeyNumber {
        self.active_key
    }

    /// Number of native commands dispatched since authentication (mod 2^16).
    pub fn command_counter(&self) -> u16 {
        self.command_counter
    }

    /// TI assigned by the tag at authentication.
    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    /// Session cryptography.
    pub fn mode(&self) -> &dyn EncryptionMode {
        self.mode.as_ref()
    }

    pub(crate) fn advance_counter(&mut self) {
        self.command_counter = self.command_counter.wrapping_add(1);
        log::trace!("command counter -> {}", self.command_counter);
    }
}
