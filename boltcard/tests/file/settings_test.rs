#[path = "../common/mod.rs"]
mod common;

use boltcard::file::{EncodingMode, FileSettings, FileSettingsEncodingError, SdmSettings};
use boltcard::{CommunicationMode, Permission};
use common::fixtures::{hx, PROVISIONED_FILE2_SETTINGS};
use proptest::prelude::*;

#[test]
fn provisioned_file_round_trip() {
    let raw = hx(PROVISIONED_FILE2_SETTINGS);
    let settings = FileSettings::decode(&raw).unwrap();

    assert_eq!(settings.communication_mode, CommunicationMode::Full);
    assert_eq!(settings.read_permission, Permission::All);
    assert_eq!(settings.file_size, 256);
    let sdm = settings.sdm.as_ref().unwrap();
    assert!(sdm.uid && sdm.read_counter && sdm.use_ascii);
    assert!(!sdm.encrypt_file_data);
    assert_eq!(sdm.file_read_permission, Permission::Key(2));
    assert_eq!(sdm.uid_offset, None);

    assert_eq!(settings.encode(EncodingMode::GetFileSettings).unwrap(), raw);
    assert_eq!(
        settings.encode(EncodingMode::ChangeFileSettings).unwrap(),
        raw[1..4]
            .iter()
            .chain(&raw[7..])
            .copied()
            .collect::<Vec<_>>()
    );
}

#[test]
fn missing_offsets_are_named() {
    let base = SdmSettings {
        uid: true,
        read_counter: true,
        meta_read_permission: Permission::All,
        file_read_permission: Permission::None,
        uid_offset: Some(0x10),
        ..SdmSettings::default()
    };
    let settings = FileSettings {
        sdm: Some(base.clone()),
        ..FileSettings::default_file2()
    };
    assert_eq!(
        settings.encode(EncodingMode::ChangeFileSettings),
        Err(FileSettingsEncodingError::SdmReadCounterOffsetRequired)
    );

    let settings = FileSettings {
        sdm: Some(SdmSettings {
            file_read_permission: Permission::Key(1),
            read_counter_offset: Some(0x20),
            mac_input_offset: Some(0x30),
            ..base
        }),
        ..FileSettings::default_file2()
    };
    assert_eq!(
        settings.encode(EncodingMode::ChangeFileSettings),
        Err(FileSettingsEncodingError::SdmMacOffsetRequired)
    );
}

#[test]
fn unused_offset_is_rejected() {
    let settings = FileSettings {
        sdm: Some(SdmSettings {
            meta_read_permission: Permission::None,
            file_read_permission: Permission::None,
            picc_data_offset: Some(0x20),
            ..SdmSettings::default()
        }),
        ..FileSettings::default_file2()
    };
    assert!(matches!(
        settings.encode(EncodingMode::ChangeFileSettings),
        Err(FileSettingsEncodingError::UnusedSdmField(_))
    ));
}

proptest! {
    #[test]
    fn decode_never_panics(raw in prop::collection::vec(any::<u8>(), 0..40)) {
        let _ = FileSettings::decode(&raw);
    }

    #[test]
    fn plain_settings_round_trip(
        rw in 0u8..16, change in 0u8..16, read in 0u8..16, write in 0u8..16,
        size in 0u32..0x0100_0000,
    ) {
        let settings = FileSettings {
            read_permission: Permission::from_nibble(read),
            write_permission: Permission::from_nibble(write),
            read_write_permission: Permission::from_nibble(rw),
            change_permission: Permission::from_nibble(change),
            file_size: size,
            ..FileSettings::default()
        };
        let raw = settings.encode(EncodingMode::GetFileSettings).unwrap();
        prop_assert_eq!(FileSettings::decode(&raw).unwrap(), settings);
    }
}
