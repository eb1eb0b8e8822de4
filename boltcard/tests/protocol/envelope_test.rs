#[path = "../common/mod.rs"]
mod common;

use boltcard::protocol::{encode_apdu, encode_native, NxpCommandResult};
use boltcard::Error;
use common::fixtures::hx;

#[test]
fn native_envelope_shapes() {
    assert_eq!(encode_native(0x51, &[]).unwrap(), hx("9051000000"));
    assert_eq!(
        encode_native(0x71, &[0x00, 0x00]).unwrap(),
        hx("9071000002 0000 00")
    );
}

#[test]
fn envelope_length_limit() {
    assert_eq!(encode_native(0x8D, &[0u8; 255]).unwrap().len(), 5 + 255 + 1);
    match encode_native(0x8D, &[0u8; 256]) {
        Err(Error::FrameTooLong {
            limit: 255,
            actual: 256,
        }) => {}
        other => panic!("expected FrameTooLong, got {:?}", other),
    }
}

#[test]
fn iso_apdu_without_le() {
    assert_eq!(
        encode_apdu(0x00, 0xA4, 0x00, 0x0C, &[0xE1, 0x04], None).unwrap(),
        hx("00a4000c02e104")
    );
}

#[test]
fn response_status_split() {
    let r = NxpCommandResult::parse(&hx("0102 91af")).unwrap();
    assert_eq!(r.data, vec![1, 2]);
    assert!(r.is_additional_frame());
    assert!(!r.is_success());
    assert!(r.expect_status(0x91, 0xAF).is_ok());

    let ok = NxpCommandResult::parse(&hx("9100")).unwrap();
    assert!(ok.is_success());
    assert!(ok.data.is_empty());

    match NxpCommandResult::parse(&[0x91]) {
        Err(Error::InvalidLength {
            expected: 2,
            actual: 1,
        }) => {}
        other => panic!("expected InvalidLength, got {:?}", other),
    }
}
