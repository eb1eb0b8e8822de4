#[path = "../common/mod.rs"]
mod common;

use boltcard::emulation::NdefEmulator;
use boltcard::file::CapabilitiesContainer;
use boltcard::ndef::{ndef_data_for_url, NdefRecord};
use common::fixtures::hx;
use url::Url;

/// Drive the emulator the way a phone reads a Type 4 tag.
fn read_ndef_like_a_reader(emu: &mut NdefEmulator) -> Vec<u8> {
    assert_eq!(emu.respond(&hx("00a4040007d276000085010100")), hx("9000"));
    assert_eq!(emu.respond(&hx("00a4000c02e103")), hx("9000"));
    let cc = emu.respond(&hx("00b000000f"));
    let cc = CapabilitiesContainer::decode(&cc[..cc.len() - 2]).unwrap();
    assert!(cc.file([0xE1, 0x04]).is_some());

    assert_eq!(emu.respond(&hx("00a4000c02e104")), hx("9000"));
    let nlen = emu.respond(&hx("00b0000002"));
    let len = u16::from_be_bytes([nlen[0], nlen[1]]) as usize;

    let mut file = nlen[..2].to_vec();
    while file.len() < len + 2 {
        let offset = file.len() as u16;
        let want = (len + 2 - file.len()).min(0xff) as u8;
        let [p1, p2] = offset.to_be_bytes();
        let chunk = emu.respond(&[0x00, 0xB0, p1, p2, want]);
        assert_eq!(chunk[chunk.len() - 2..], [0x90, 0x00]);
        file.extend_from_slice(&chunk[..chunk.len() - 2]);
    }
    file
}

#[test]
fn phone_reads_served_url() {
    let url = Url::parse(&format!("https://card.example/{}", "y".repeat(400))).unwrap();
    let ndef = ndef_data_for_url(&url).unwrap();
    let mut emu = NdefEmulator::new(ndef.clone());

    let file = read_ndef_like_a_reader(&mut emu);
    assert_eq!(file, ndef);
    assert_eq!(NdefRecord::decode(&file).unwrap().value, url.as_str());
}

#[test]
fn unknown_file_is_not_found() {
    let mut emu = NdefEmulator::new(hx("0000"));
    assert_eq!(emu.respond(&hx("00a4000c02e105")), hx("6a82"));
    assert_eq!(emu.respond(&hx("00b0000002")), hx("6a82"));
}
