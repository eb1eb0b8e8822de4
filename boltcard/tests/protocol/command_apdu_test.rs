#[path = "../common/mod.rs"]
mod common;

use boltcard::emulation::{CommandApdu, ReadBinaryCommand, SelectFileCommand};
use boltcard::Error;
use common::fixtures::hx;

#[test]
fn reader_select_sequence_is_recognized() {
    let app = CommandApdu::parse(&hx("00a4040007d276000085010100")).unwrap();
    assert!(app.is_ndef_tag_application_select());

    let cc = CommandApdu::parse(&hx("00a4000c02e103")).unwrap();
    assert!(cc.is_capability_container_select());
    assert_eq!(
        cc.as_select_file(),
        Some(SelectFileCommand {
            file_id: [0xE1, 0x03]
        })
    );

    let read = CommandApdu::parse(&hx("00b000000f")).unwrap();
    assert_eq!(
        read.as_read_binary(),
        Some(ReadBinaryCommand {
            offset: 0,
            length: 15
        })
    );
}

#[test]
fn inconsistent_lc_is_rejected() {
    match CommandApdu::parse(&hx("00a4000c03e103")) {
        Err(Error::Decoding(_)) => {}
        other => panic!("expected Decoding, got {:?}", other),
    }
}
