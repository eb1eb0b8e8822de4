// boltcard/src/workflow/inspect.rs

use super::{Step, StepContext};
use crate::constants::DEFAULT_KEY;
use crate::file::{CapabilitiesContainer, FileSettings};
use crate::ndef::NdefRecord;
use crate::session::Authenticator;
use crate::tag::Tag;
use crate::transport::Transport;
use crate::types::{ChipUid, CommunicationMode, FileSpecifier, KeyNumber, Permission};
use crate::Result;

/// Settings and (when readable with key 0) contents of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    /// File read.
    pub file: FileSpecifier,
    /// Decoded settings.
    pub settings: FileSettings,
    /// Content, when free access or key 0 allows reading it.
    pub data: Option<Vec<u8>>,
}

/// What [`inspect`] found on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    /// Chip UID.
    pub uid: ChipUid,
    /// Decoded file 1, if readable.
    pub capabilities: Option<CapabilitiesContainer>,
    /// Files 1 to 3.
    pub files: Vec<FileSnapshot>,
}

impl Inspection {
    /// Snapshot of one file, if it was read.
    pub fn file(&self, file: FileSpecifier) -> Option<&FileSnapshot> {
        self.files.iter().find(|f| f.file == file)
    }

    /// First record of the NDEF file, if it was read and parses.
    pub fn ndef_record(&self) -> Option<NdefRecord> {
        let data = self.file(FileSpecifier::Ndef)?.data.as_ref()?;
        NdefRecord::decode(data).ok()
    }
}

/// Mode a ReadData must use under a key-0 session, or `None` when key 0 may
/// not read the file. Free read access is always plain.
fn read_mode(settings: &FileSettings) -> Option<CommunicationMode> {
    let key0 = KeyNumber::Key0.to_permission();
    if settings.read_permission == Permission::All {
        Some(CommunicationMode::Plain)
    } else if settings.read_permission == key0 || settings.read_write_permission == key0 {
        Some(settings.communication_mode)
    } else {
        None
    }
}

/// Read the UID plus settings and data of files 1 to 3 of a factory card.
pub async fn inspect<T: Transport>(tag: &mut Tag<T>) -> Result<Inspection> {
    inspect_with(tag, &mut Authenticator::new()).await
}

/// [`inspect`] with a caller-supplied authenticator.
pub async fn inspect_with<T: Transport>(
    tag: &mut Tag<T>,
    authenticator: &mut Authenticator,
) -> Result<Inspection> {
    let mut session = tag
        .authenticate_with(authenticator, KeyNumber::Key0, &DEFAULT_KEY)
        .await
        .at(Step::Authenticate)?;
    let uid = tag.get_chip_uid(&mut session).await.at(Step::ReadChipUid)?;

    let mut capabilities = None;
    let mut files = Vec::with_capacity(3);
    for file in [FileSpecifier::Cc, FileSpecifier::Ndef, FileSpecifier::Proprietary] {
        let settings = tag
            .get_file_settings(&mut session, file)
            .await
            .at(Step::ReadFileSettings(file))?;

        let data = match read_mode(&settings) {
            Some(mode) => {
                let length = (settings.file_size as usize).min(file.max_size());
                let data = tag
                    .read_file_data(&mut session, file, 0, length, mode)
                    .await
                    .at(Step::ReadFileData(file))?;
                log::debug!("{}: {}", file, crate::utils::bytes_to_hex(&data));
                Some(data)
            }
            None => {
                log::debug!("{} is not readable with key0", file);
                None
            }
        };

        if file == FileSpecifier::Cc {
            if let Some(image) = &data {
                let cc = CapabilitiesContainer::decode_file(image).at(Step::ReadFileData(file))?;
                capabilities = Some(cc);
            }
        }
        files.push(FileSnapshot {
            file,
            settings,
            data,
        });
    }

    Ok(Inspection {
        uid,
        capabilities,
        files,
    })
}
