#[path = "../common/mod.rs"]
mod common;

use boltcard::file::{CapabilitiesContainer, CtrlTlv};
use common::fixtures::{hx, FACTORY_CC};

#[test]
fn factory_container() {
    let cc = CapabilitiesContainer::decode_file(&hx(FACTORY_CC)).unwrap();
    assert_eq!(cc.len, 0x17);
    assert_eq!(cc.m_le, 0x0100);
    assert_eq!(cc.m_lc, 0x00ff);

    let ndef = cc.file([0xE1, 0x04]).unwrap();
    assert_eq!(ndef.t, CtrlTlv::NDEF_FILE);
    assert_eq!(ndef.file_size, 256);
    assert_eq!((ndef.read_access, ndef.write_access), (0x00, 0x00));

    let proprietary = cc.file([0xE1, 0x05]).unwrap();
    assert_eq!(proprietary.t, CtrlTlv::PROPRIETARY_FILE);
    assert_eq!(proprietary.file_size, 128);
    assert_eq!(proprietary.read_access, 0x82);

    assert_eq!(cc.encode(), hx(FACTORY_CC)[..0x17]);
}

#[test]
fn emulated_container_bytes() {
    assert_eq!(
        CapabilitiesContainer::emulated_default().encode(),
        hx("000f 20 0100 00ff 0406e104 0200 00 ff")
    );
}
