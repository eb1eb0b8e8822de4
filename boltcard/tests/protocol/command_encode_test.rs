#[path = "../common/mod.rs"]
mod common;

use boltcard::protocol::commands::{
    encode_change_key_data, encode_file_window, encode_select_ndef_application,
};
use boltcard::protocol::NativeCommand;
use boltcard::{CommunicationMode, FileSpecifier, KeyNumber};
use common::fixtures::hx;

#[test]
fn command_codes_and_modes() {
    let cases = [
        (NativeCommand::GetCardUid, 0x51, CommunicationMode::Full),
        (
            NativeCommand::GetKeyVersion {
                key: KeyNumber::Key3,
            },
            0x64,
            CommunicationMode::Mac,
        ),
        (
            NativeCommand::GetFileSettings {
                file: FileSpecifier::Ndef,
            },
            0xF5,
            CommunicationMode::Mac,
        ),
        (
            NativeCommand::ChangeFileSettings {
                file: FileSpecifier::Ndef,
                settings: vec![0x00, 0xe0, 0xee],
            },
            0x5F,
            CommunicationMode::Full,
        ),
        (
            NativeCommand::ReadData {
                file: FileSpecifier::Cc,
                offset: 0,
                length: 32,
                mode: CommunicationMode::Plain,
            },
            0xAD,
            CommunicationMode::Plain,
        ),
    ];
    for (cmd, code, mode) in cases {
        assert_eq!(cmd.code(), code, "{:?}", cmd);
        assert_eq!(cmd.mode(), mode, "{:?}", cmd);
    }
}

#[test]
fn read_data_header() {
    let cmd = NativeCommand::ReadData {
        file: FileSpecifier::Ndef,
        offset: 0x80,
        length: 0x80,
        mode: CommunicationMode::Mac,
    };
    assert_eq!(cmd.header().unwrap(), hx("02 800000 800000"));
    assert!(cmd.data().is_empty());
}

#[test]
fn file_window_rejects_wide_values() {
    assert_eq!(
        encode_file_window(FileSpecifier::Proprietary, 0x010203, 1).unwrap(),
        [0x03, 0x03, 0x02, 0x01, 0x01, 0x00, 0x00]
    );
    assert!(encode_file_window(FileSpecifier::Ndef, 1 << 24, 0).is_err());
}

#[test]
fn change_key_cryptograms() {
    let new: [u8; 16] = core::array::from_fn(|i| i as u8);
    let other =
        encode_change_key_data(KeyNumber::Key0, KeyNumber::Key1, &[0u8; 16], &new, 1).unwrap();
    assert_eq!(other.len(), 21);
    assert_eq!(&other[..16], &new);
    assert_eq!(other[16], 1);
    assert_eq!(&other[17..], &hx("771d3131")[..]);

    let own =
        encode_change_key_data(KeyNumber::Key0, KeyNumber::Key0, &[0u8; 16], &new, 2).unwrap();
    assert_eq!(own.len(), 17);
    assert_eq!(own[16], 2);
}

#[test]
fn select_application_apdu() {
    assert_eq!(
        encode_select_ndef_application().unwrap(),
        hx("00a4040c07d2760000850101 00")
    );
}
