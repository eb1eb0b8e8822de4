// boltcard/src/workflow/provision.rs

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{change_first_available_slot, change_key_bumping_version, Step, StepContext};
use crate::constants::DEFAULT_KEY;
use crate::file::{FileSettings, SdmSettings};
use crate::ndef::Template;
use crate::session::Authenticator;
use crate::tag::Tag;
use crate::transport::Transport;
use crate::types::{ChipUid, CommunicationMode, FileSpecifier, KeyNumber, Permission};
use crate::Result;

/// Keys and NDEF template written to a factory-fresh card.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ProvisionInput {
    /// NDEF template written to file 2.
    #[zeroize(skip)]
    pub template: Template,
    /// New application master key.
    pub key0: [u8; 16],
    /// Key for SDM PICC data encryption.
    pub picc_data_key: [u8; 16],
    /// Key for the SDM CMAC.
    pub cmac_key: [u8; 16],
}

impl std::fmt::Debug for ProvisionInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisionInput")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// NDEF file settings of a provisioned card: Full mode, free read, UID and
/// read counter mirrored as ASCII into the template's placeholders.
pub fn provisioned_ndef_settings(
    template: &Template,
    picc_data_slot: KeyNumber,
    cmac_slot: KeyNumber,
) -> FileSettings {
    let cmac_offset = template.cmac_offset() as u32;
    FileSettings {
        communication_mode: CommunicationMode::Full,
        read_permission: Permission::All,
        write_permission: Permission::Key(0),
        read_write_permission: Permission::Key(0),
        change_permission: Permission::Key(0),
        sdm: Some(SdmSettings {
            uid: true,
            read_counter: true,
            use_ascii: true,
            meta_read_permission: picc_data_slot.to_permission(),
            file_read_permission: cmac_slot.to_permission(),
            picc_data_offset: Some(template.picc_data_offset() as u32),
            mac_input_offset: Some(cmac_offset),
            mac_offset: Some(cmac_offset),
            ..SdmSettings::default()
        }),
        ..FileSettings::default_file2()
    }
}

/// Provision a factory-fresh card and return its UID.
pub async fn provision<T: Transport>(tag: &mut Tag<T>, input: &ProvisionInput) -> Result<ChipUid> {
    provision_with(tag, &mut Authenticator::new(), input).await
}

/// [`provision`] with a caller-supplied authenticator.
///
/// Steps: authenticate key 0 with the factory key, read the UID, install
/// the PICC data key in the first slot from key 1 that accepts it and the
/// CMAC key in a later one, write the SDM settings and the template to the
/// NDEF file, and finally change key 0. Once key 0 changes the session is
/// gone.
pub async fn provision_with<T: Transport>(
    tag: &mut Tag<T>,
    authenticator: &mut Authenticator,
    input: &ProvisionInput,
) -> Result<ChipUid> {
    let mut session = tag
        .authenticate_with(authenticator, KeyNumber::Key0, &DEFAULT_KEY)
        .await
        .at(Step::Authenticate)?;

    let uid = tag.get_chip_uid(&mut session).await.at(Step::ReadChipUid)?;
    log::debug!("provisioning card {}", uid.to_hex());

    let picc_data_slot = change_first_available_slot(
        tag,
        &mut session,
        Some(KeyNumber::Key1),
        &DEFAULT_KEY,
        &input.picc_data_key,
    )
    .await?;
    let cmac_slot = change_first_available_slot(
        tag,
        &mut session,
        picc_data_slot.next(),
        &DEFAULT_KEY,
        &input.cmac_key,
    )
    .await?;
    log::debug!("picc data key in {}, cmac key in {}", picc_data_slot, cmac_slot);

    let file = FileSpecifier::Ndef;
    let settings = provisioned_ndef_settings(&input.template, picc_data_slot, cmac_slot);
    tag.change_file_settings(&mut session, file, &settings)
        .await
        .at(Step::WriteFileSettings(file))?;

    let data = input.template.ndef_data().at(Step::WriteFileData(file))?;
    tag.write_file_data(&mut session, file, 0, &data, settings.communication_mode)
        .await
        .at(Step::WriteFileData(file))?;

    change_key_bumping_version(tag, &mut session, KeyNumber::Key0, &DEFAULT_KEY, &input.key0)
        .await
        .at(Step::ChangeKey(KeyNumber::Key0))?;

    log::debug!("card {} provisioned", uid.to_hex());
    Ok(uid)
}
