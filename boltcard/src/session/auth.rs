// boltcard/src/session/auth.rs

use derive_more::Display;

use crate::constants::{
    CHALLENGE_LEN, STATUS_ADDITIONAL_FRAME, STATUS_AUTHENTICATION_DELAY, STATUS_NATIVE, STATUS_OK,
};
use crate::crypto::{AesMode, cbc_decrypt, cbc_encrypt, rotate_left, rotate_right};
use crate::protocol::frame::encode_native;
use crate::protocol::{NativeCommand, NxpCommandResult};
use crate::session::Session;
use crate::session::channel::transmit;
use crate::transport::Transport;
use crate::types::{KeyNumber, TransactionId};
use crate::{Error, Result};

const ZERO_IV: [u8; 16] = [0u8; 16];

/// Progress of an EV2First handshake.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Nothing sent yet.
    #[default]
    #[display(fmt = "idle")]
    Idle,
    /// Waiting for the encrypted RndB.
    #[display(fmt = "stage 1 sent")]
    Stage1Sent,
    /// Waiting for TI and RndA'.
    #[display(fmt = "stage 2 sent")]
    Stage2Sent,
    /// Session established.
    #[display(fmt = "authenticated")]
    Authenticated,
    /// A check failed.
    #[display(fmt = "failed")]
    Failed,
}

/// Drives the EV2First mutual authentication with a static AES key.
///
/// The authenticator itself keeps no key material; a successful run hands
/// everything the secure channel needs over in the returned [`Session`].
#[derive(Debug, Default)]
pub struct Authenticator {
    state: AuthState,
    challenge: Option<[u8; CHALLENGE_LEN]>,
}

impl Authenticator {
    /// Authenticator drawing a fresh random ChallengeA per run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticator using a fixed ChallengeA (replaying recorded exchanges).
    pub fn with_challenge(challenge_a: [u8; CHALLENGE_LEN]) -> Self {
        Self {
            state: AuthState::Idle,
            challenge: Some(challenge_a),
        }
    }

    /// Where the last run stopped.
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Run both handshake stages. Any failure leaves the state at `Failed`;
    /// there is no retry.
    pub async fn authenticate<T: Transport + ?Sized>(
        &mut self,
        transport: &mut T,
        key_number: KeyNumber,
        key: &[u8; 16],
    ) -> Result<Session> {
        self.state = AuthState::Idle;
        match self.run(transport, key_number, key).await {
            Ok(session) => {
                self.set_state(AuthState::Authenticated);
                log::debug!(
                    "authenticated with {} (TI {})",
                    key_number,
                    session.transaction_id().to_hex()
                );
                Ok(session)
            }
            Err(e) => {
                self.set_state(AuthState::Failed);
                log::warn!("authentication with {} failed: {}", key_number, e);
                Err(e)
            }
        }
    }

    fn set_state(&mut self, next: AuthState) {
        log::trace!("auth state {} -> {}", self.state, next);
        self.state = next;
    }

    async fn send<T: Transport + ?Sized>(
        transport: &mut T,
        command: &NativeCommand,
    ) -> Result<NxpCommandResult> {
        let frame = encode_native(command.code(), &command.header()?)?;
        transmit(transport, &frame).await
    }

    async fn run<T: Transport + ?Sized>(
        &mut self,
        transport: &mut T,
        key_number: KeyNumber,
        key: &[u8; 16],
    ) -> Result<Session> {
        // Stage 1: the tag answers with E(K, RndB).
        let first = NativeCommand::AuthenticateEv2First { key: key_number };
        self.set_state(AuthState::Stage1Sent);
        let stage1 = Self::send(transport, &first).await?;
        if stage1.is_native() && stage1.status_minor == STATUS_AUTHENTICATION_DELAY {
            return Err(Error::RetryUnsupported);
        }
        stage1.expect_status(STATUS_NATIVE, STATUS_ADDITIONAL_FRAME)?;
        if stage1.data.len() != CHALLENGE_LEN {
            return Err(Error::InvalidLength {
                expected: CHALLENGE_LEN,
                actual: stage1.data.len(),
            });
        }

        let rnd_b = cbc_decrypt(key, &ZERO_IV, &stage1.data)?;
        let rnd_a = self.challenge.unwrap_or_else(rand::random);
        let mut plain = Vec::with_capacity(2 * CHALLENGE_LEN);
        plain.extend_from_slice(&rnd_a);
        plain.extend_from_slice(&rotate_left(&rnd_b));
        let challenge = cbc_encrypt(key, &ZERO_IV, &plain)?;

        // Stage 2: the tag proves knowledge of K by returning rotl(RndA).
        let second = NativeCommand::AuthenticatePart2 { challenge };
        self.set_state(AuthState::Stage2Sent);
        let stage2 = Self::send(transport, &second).await?;
        stage2.expect_status(STATUS_NATIVE, STATUS_OK)?;
        if stage2.data.len() != 2 * CHALLENGE_LEN {
            return Err(Error::InvalidLength {
                expected: 2 * CHALLENGE_LEN,
                actual: stage2.data.len(),
            });
        }

        let decrypted = cbc_decrypt(key, &ZERO_IV, &stage2.data)?;
        let ti = TransactionId::try_from(&decrypted[0..4])?;
        if rotate_right(&decrypted[4..20]) != rnd_a {
            return Err(Error::InvalidChallengeResponse);
        }
        log::trace!(
            "PD caps {}, PCD caps {}",
            crate::utils::bytes_to_hex(&decrypted[20..26]),
            crate::utils::bytes_to_hex(&decrypted[26..32])
        );

        let rnd_b: [u8; CHALLENGE_LEN] =
            rnd_b.as_slice().try_into().map_err(|_| Error::InvalidLength {
                expected: CHALLENGE_LEN,
                actual: rnd_b.len(),
            })?;
        let mode = AesMode::new(key, &rnd_a, &rnd_b)?;
        Ok(Session::from_parts(key_number, 0, ti, Box::new(mode)))
    }
}
