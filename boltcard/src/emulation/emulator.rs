// boltcard/src/emulation/emulator.rs

use crate::constants::{SW_FILE_NOT_FOUND, SW_OK};
use crate::emulation::command_apdu::{CommandApdu, ReadBinaryCommand};
use crate::file::CapabilitiesContainer;
use crate::types::FileSpecifier;
use crate::utils::bytes_to_hex;

/// Answers a reader as an NFC Forum Type 4 tag serving one read-only NDEF
/// file.
#[derive(Debug, Clone)]
pub struct NdefEmulator {
    cc_file: Vec<u8>,
    ndef_file: Vec<u8>,
    selected: Option<FileSpecifier>,
}

impl NdefEmulator {
    /// Serve `ndef_file` (NLEN included) behind the default emulated
    /// capability container.
    pub fn new(ndef_file: Vec<u8>) -> Self {
        Self::with_capabilities(ndef_file, &CapabilitiesContainer::emulated_default())
    }

    /// Serve `ndef_file` behind a caller-supplied capability container.
    pub fn with_capabilities(ndef_file: Vec<u8>, cc: &CapabilitiesContainer) -> Self {
        Self {
            cc_file: cc.encode(),
            ndef_file,
            selected: None,
        }
    }

    /// File chosen by the last successful SELECT FILE.
    pub fn selected_file(&self) -> Option<FileSpecifier> {
        self.selected
    }

    /// Produce the response APDU (data and status word) for one command.
    pub fn respond(&mut self, raw: &[u8]) -> Vec<u8> {
        let command = match CommandApdu::parse(raw) {
            Ok(c) => c,
            Err(e) => {
                log::debug!("unparsable command {}: {}", bytes_to_hex(raw), e);
                return SW_FILE_NOT_FOUND.to_vec();
            }
        };

        if command.is_ndef_tag_application_select() {
            log::debug!("NDEF tag application selected");
            return SW_OK.to_vec();
        }

        if let Some(select) = command.as_select_file() {
            self.selected = match FileSpecifier::from_iso_file_id(select.file_id) {
                Some(file @ (FileSpecifier::Cc | FileSpecifier::Ndef)) => Some(file),
                _ => None,
            };
            return match self.selected {
                Some(file) => {
                    log::debug!("selected {}", file);
                    SW_OK.to_vec()
                }
                None => {
                    log::debug!("unknown file {}", bytes_to_hex(&select.file_id));
                    SW_FILE_NOT_FOUND.to_vec()
                }
            };
        }

        if let Some(read) = command.as_read_binary() {
            let file = match self.selected {
                Some(FileSpecifier::Cc) => &self.cc_file,
                Some(FileSpecifier::Ndef) => &self.ndef_file,
                _ => {
                    log::debug!("read binary without a selected file");
                    return SW_FILE_NOT_FOUND.to_vec();
                }
            };
            let mut out = read_window(file, read).to_vec();
            out.extend_from_slice(&SW_OK);
            return out;
        }

        log::debug!("unknown command {}", bytes_to_hex(raw));
        SW_FILE_NOT_FOUND.to_vec()
    }
}

/// Requested window of a file, clamped to its end.
fn read_window(file: &[u8], read: ReadBinaryCommand) -> &[u8] {
    let start = read.offset as usize;
    if start >= file.len() {
        return &[];
    }
    let end = (start + read.length).min(file.len());
    &file[start..end]
}
