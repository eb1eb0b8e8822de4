// boltcard/src/constants.rs
//! Protocol constants shared across the crate

/// CLA byte of the native command envelope
pub const NATIVE_CLA: u8 = 0x90;

/// Maximum payload (header + data + mac) of a short-form native envelope
pub const MAX_NATIVE_PAYLOAD_LEN: usize = 255;

/// Status byte 1 of a well-formed native response
pub const STATUS_NATIVE: u8 = 0x91;

/// Native status byte 2: operation successful
pub const STATUS_OK: u8 = 0x00;
/// Native status byte 2: additional frame expected
pub const STATUS_ADDITIONAL_FRAME: u8 = 0xAF;
/// Native status byte 2: authentication retry requested
pub const STATUS_AUTHENTICATION_DELAY: u8 = 0xAD;

/// ISO status word for success
pub const SW_OK: [u8; 2] = [0x90, 0x00];
/// ISO status word "file or application not found"
pub const SW_FILE_NOT_FOUND: [u8; 2] = [0x6A, 0x82];

/// Native command codes
pub const CMD_AUTHENTICATE_EV2_FIRST: u8 = 0x71;
/// Continuation frame (EV2First stage 2)
pub const CMD_ADDITIONAL_FRAME: u8 = 0xAF;
/// GetKeyVersion
pub const CMD_GET_KEY_VERSION: u8 = 0x64;
/// ChangeKey
pub const CMD_CHANGE_KEY: u8 = 0xC4;
/// GetCardUID
pub const CMD_GET_CARD_UID: u8 = 0x51;
/// ReadData
pub const CMD_READ_DATA: u8 = 0xAD;
/// WriteData
pub const CMD_WRITE_DATA: u8 = 0x8D;
/// GetFileSettings
pub const CMD_GET_FILE_SETTINGS: u8 = 0xF5;
/// ChangeFileSettings
pub const CMD_CHANGE_FILE_SETTINGS: u8 = 0x5F;

/// ISO 7816-4 instruction bytes
pub const INS_SELECT: u8 = 0xA4;
/// ISO READ BINARY
pub const INS_READ_BINARY: u8 = 0xB0;

/// DF name of the NFC Forum Type 4 NDEF tag application
pub const NDEF_APPLICATION_NAME: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

/// Prefix of the NDEF tag application select issued by readers
pub const NDEF_APPLICATION_SELECT_PREFIX: [u8; 12] = [
    0x00, 0xA4, 0x04, 0x00, 0x07, 0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01,
];

/// Prefix of the capability container select issued by readers
pub const CC_SELECT_PREFIX: [u8; 7] = [0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x03];

/// Length of the random challenges exchanged during EV2First
pub const CHALLENGE_LEN: usize = 16;

/// Length of the truncated CMAC appended to MAC/Full commands
pub const MAC_LEN: usize = 8;

/// AES block size
pub const BLOCK_SIZE: usize = 16;

/// Largest file chunk moved by a single ReadData/WriteData command
pub const MAX_FILE_CHUNK: usize = 128;

/// Factory default AES key of every key slot
pub const DEFAULT_KEY: [u8; 16] = [0u8; 16];
