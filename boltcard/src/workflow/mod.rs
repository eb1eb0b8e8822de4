// boltcard/src/workflow/mod.rs
//! Multi-step card flows built on [`Tag`].
//!
//! Each flow authenticates with key 0 and runs its steps on one session.
//! A failing step is reported as [`Error::Workflow`] naming the step; the
//! tag is left however far the flow got. None of the flows selects the NDEF
//! application, call [`Tag::select_ndef_application`] first when the host
//! does not do it.

mod inspect;
mod provision;
mod reset;

pub use inspect::{inspect, inspect_with, FileSnapshot, Inspection};
pub use provision::{provision, provision_with, provisioned_ndef_settings, ProvisionInput};
pub use reset::{reset, reset_with, ResetInput, RESET_URL};

use derive_more::Display;

use crate::session::Session;
use crate::tag::Tag;
use crate::transport::Transport;
use crate::types::{FileSpecifier, KeyNumber};
use crate::{Error, Result};

/// Step of a workflow, carried by [`Error::Workflow`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Authentication with key 0.
    #[display(fmt = "authenticate")]
    Authenticate,
    /// GetCardUID.
    #[display(fmt = "read chip uid")]
    ReadChipUid,
    /// GetFileSettings.
    #[display(fmt = "read settings of {}", _0)]
    ReadFileSettings(FileSpecifier),
    /// ReadData.
    #[display(fmt = "read data of {}", _0)]
    ReadFileData(FileSpecifier),
    /// ChangeFileSettings.
    #[display(fmt = "write settings of {}", _0)]
    WriteFileSettings(FileSpecifier),
    /// WriteData.
    #[display(fmt = "write data of {}", _0)]
    WriteFileData(FileSpecifier),
    /// ChangeKey.
    #[display(fmt = "change {}", _0)]
    ChangeKey(KeyNumber),
}

trait StepContext<T> {
    fn at(self, step: Step) -> Result<T>;
}

impl<T> StepContext<T> for Result<T> {
    fn at(self, step: Step) -> Result<T> {
        self.map_err(|source| {
            log::warn!("{} failed: {}", step, source);
            Error::Workflow {
                step,
                source: Box::new(source),
            }
        })
    }
}

/// Change `key` and store it with the current version plus one.
async fn change_key_bumping_version<T: Transport>(
    tag: &mut Tag<T>,
    session: &mut Session,
    key: KeyNumber,
    old_key: &[u8; 16],
    new_key: &[u8; 16],
) -> Result<()> {
    let version = tag.get_key_version(session, key).await?;
    tag.change_key(session, key, old_key, new_key, version.wrapping_add(1))
        .await
}

/// Try `start` and the following slots until one accepts the change.
///
/// A refused change moves on to the next slot; session-fatal errors end the
/// search. Returns `KeySlotsUnavailable` when no slot is left.
async fn change_first_available_slot<T: Transport>(
    tag: &mut Tag<T>,
    session: &mut Session,
    start: Option<KeyNumber>,
    old_key: &[u8; 16],
    new_key: &[u8; 16],
) -> Result<KeyNumber> {
    let mut slot = start;
    while let Some(key) = slot {
        match change_key_bumping_version(tag, session, key, old_key, new_key).await {
            Ok(()) => {
                log::debug!("key installed in {}", key);
                return Ok(key);
            }
            Err(e) if e.is_session_fatal() => return Err(e).at(Step::ChangeKey(key)),
            Err(e) => {
                log::info!("unable to change {}: {}", key, e);
                slot = key.next();
            }
        }
    }
    Err(Error::KeySlotsUnavailable)
}
