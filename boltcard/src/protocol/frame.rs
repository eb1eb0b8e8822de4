// boltcard/src/protocol/frame.rs

use crate::constants::{MAX_NATIVE_PAYLOAD_LEN, NATIVE_CLA};
use crate::{Error, Result};

/// Encode a short-form ISO 7816-4 command APDU.
///
/// Format: CLA INS P1 P2 [Lc data] [Le]. `Lc` and the data are omitted for
/// an empty body, `Le` is omitted when `le` is `None`.
pub fn encode_apdu(cla: u8, ins: u8, p1: u8, p2: u8, data: &[u8], le: Option<u8>) -> Result<Vec<u8>> {
    if data.len() > MAX_NATIVE_PAYLOAD_LEN {
        return Err(Error::FrameTooLong {
            limit: MAX_NATIVE_PAYLOAD_LEN,
            actual: data.len(),
        });
    }

    let mut out = Vec::with_capacity(4 + 1 + data.len() + 1);
    out.extend_from_slice(&[cla, ins, p1, p2]);
    if !data.is_empty() {
        out.push(data.len() as u8);
        out.extend_from_slice(data);
    }
    if let Some(le) = le {
        out.push(le);
    }
    Ok(out)
}

/// Wrap a native command in the ISO envelope:
/// `90 CMD 00 00 Lc payload 00`, or `90 CMD 00 00 00` without payload.
///
/// `payload` is header, data and MAC already concatenated.
pub fn encode_native(command: u8, payload: &[u8]) -> Result<Vec<u8>> {
    encode_apdu(NATIVE_CLA, command, 0x00, 0x00, payload, Some(0x00))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn native_with_payload() {
        let frame = encode_native(0x71, &[0x00, 0x00]).unwrap();
        assert_eq!(frame, vec![0x90, 0x71, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn native_without_payload() {
        let frame = encode_native(0x51, &[]).unwrap();
        assert_eq!(frame, vec![0x90, 0x51, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn payload_limit() {
        assert_eq!(encode_native(0x8d, &[0u8; 255]).unwrap().len(), 4 + 1 + 255 + 1);
        match encode_native(0x8d, &[0u8; 256]) {
            Err(Error::FrameTooLong {
                limit: 255,
                actual: 256,
            }) => {}
            other => panic!("expected FrameTooLong, got: {:?}", other),
        }
    }

    #[test]
    fn iso_select_layout() {
        let frame = encode_apdu(0x00, 0xA4, 0x04, 0x0C, &[0xD2, 0x76], Some(0x00)).unwrap();
        assert_eq!(frame, vec![0x00, 0xA4, 0x04, 0x0C, 0x02, 0xD2, 0x76, 0x00]);
        let no_le = encode_apdu(0x00, 0xB0, 0x00, 0x00, &[], None).unwrap();
        assert_eq!(no_le, vec![0x00, 0xB0, 0x00, 0x00]);
    }

    proptest! {
        #[test]
        fn lc_matches_payload(payload in prop::collection::vec(any::<u8>(), 1..=255)) {
            let frame = encode_native(0xad, &payload).unwrap();
            prop_assert_eq!(frame[4] as usize, payload.len());
            prop_assert_eq!(frame.len(), payload.len() + 6);
            prop_assert_eq!(&frame[5..5 + payload.len()], &payload[..]);
            prop_assert_eq!(*frame.last().unwrap(), 0x00);
        }
    }
}
