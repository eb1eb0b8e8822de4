// boltcard/src/protocol/commands/iso.rs

use crate::constants::{INS_SELECT, NDEF_APPLICATION_NAME};
use crate::protocol::frame::encode_apdu;
use crate::Result;

/// ISO SELECT by DF name of the NDEF tag application, first or only
/// occurrence, no response data: `00 A4 04 0C 07 D2760000850101 00`.
pub fn encode_select_ndef_application() -> Result<Vec<u8>> {
    encode_apdu(0x00, INS_SELECT, 0x04, 0x0C, &NDEF_APPLICATION_NAME, Some(0x00))
}
