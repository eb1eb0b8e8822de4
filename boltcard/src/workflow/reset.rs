// boltcard/src/workflow/reset.rs

use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{change_first_available_slot, change_key_bumping_version, Step, StepContext};
use crate::constants::DEFAULT_KEY;
use crate::file::FileSettings;
use crate::ndef::ndef_data_for_url;
use crate::session::Authenticator;
use crate::tag::Tag;
use crate::transport::Transport;
use crate::types::{FileSpecifier, KeyNumber};
use crate::{Error, Result};

/// URL written to the NDEF file of a reset card unless
/// [`ResetInput::url`] names another.
pub const RESET_URL: &str = "https://example.com";

/// Keys currently installed on a provisioned card.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ResetInput {
    /// Current application master key.
    pub key0: [u8; 16],
    /// Key installed for SDM PICC data encryption.
    pub picc_data_key: [u8; 16],
    /// Key installed for the SDM CMAC.
    pub cmac_key: [u8; 16],
    /// URL record left on the card; `None` writes [`RESET_URL`].
    #[zeroize(skip)]
    pub url: Option<Url>,
}

impl std::fmt::Debug for ResetInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetInput")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Return a provisioned card to factory state.
pub async fn reset<T: Transport>(tag: &mut Tag<T>, input: &ResetInput) -> Result<()> {
    reset_with(tag, &mut Authenticator::new(), input).await
}

/// [`reset`] with a caller-supplied authenticator.
///
/// The PICC data and CMAC keys are searched from key 1 upward in the same
/// order provisioning used, so any slot pair it could have picked is found.
pub async fn reset_with<T: Transport>(
    tag: &mut Tag<T>,
    authenticator: &mut Authenticator,
    input: &ResetInput,
) -> Result<()> {
    let mut session = tag
        .authenticate_with(authenticator, KeyNumber::Key0, &input.key0)
        .await
        .at(Step::Authenticate)?;

    let picc_data_slot = change_first_available_slot(
        tag,
        &mut session,
        Some(KeyNumber::Key1),
        &input.picc_data_key,
        &DEFAULT_KEY,
    )
    .await?;
    let cmac_slot = change_first_available_slot(
        tag,
        &mut session,
        picc_data_slot.next(),
        &input.cmac_key,
        &DEFAULT_KEY,
    )
    .await?;
    log::debug!("restored {} and {}", picc_data_slot, cmac_slot);

    let file = FileSpecifier::Ndef;
    let settings = FileSettings::default_file2();
    tag.change_file_settings(&mut session, file, &settings)
        .await
        .at(Step::WriteFileSettings(file))?;

    let url = match &input.url {
        Some(url) => url.clone(),
        None => Url::parse(RESET_URL)
            .map_err(|e| Error::Decoding(e.to_string()))
            .at(Step::WriteFileData(file))?,
    };
    let data = ndef_data_for_url(&url).at(Step::WriteFileData(file))?;
    tag.write_file_data(&mut session, file, 0, &data, settings.communication_mode)
        .await
        .at(Step::WriteFileData(file))?;

    change_key_bumping_version(tag, &mut session, KeyNumber::Key0, &input.key0, &DEFAULT_KEY)
        .await
        .at(Step::ChangeKey(KeyNumber::Key0))?;

    log::debug!("card reset");
    Ok(())
}
