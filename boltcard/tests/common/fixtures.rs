// fixtures.rs - recorded frames and sample values shared by integration tests

use boltcard::session::Authenticator;
use boltcard::test_support::{GOLDEN_CHALLENGE_A, GOLDEN_STAGE1_RESPONSE, GOLDEN_STAGE2_RESPONSE};
use boltcard::transport::MockTransport;

/// Decode a hex fixture, ignoring spaces.
pub fn hx(s: &str) -> Vec<u8> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(cleaned).expect("valid hex fixture")
}

/// Authenticator replaying the recorded ChallengeA.
pub fn golden_authenticator() -> Authenticator {
    Authenticator::with_challenge(GOLDEN_CHALLENGE_A)
}

/// Mock answering the recorded handshake, then `responses` in order.
pub fn mock_after_handshake(responses: Vec<Vec<u8>>) -> MockTransport {
    let mut mock = MockTransport::new();
    mock.push_response(hx(GOLDEN_STAGE1_RESPONSE));
    mock.push_response(hx(GOLDEN_STAGE2_RESPONSE));
    for r in responses {
        mock.push_response(r);
    }
    mock
}

/// Stage 2 command sent with the recorded challenges.
pub const STAGE2_COMMAND: &str =
    "90af000020 35c3e05a752e0144bac0de51c1f22c56b34408a23d8aea266cab947ea8e0118d 00";

/// GetFileSettings(1) at counter 0 and the tag's answer.
pub const GET_CC_SETTINGS_COMMAND: &str = "90f5000009 01 0e349eaa5631f58f 00";
pub const GET_CC_SETTINGS_RESPONSE: &str = "0000e0ee200000 a010ceeb6adb0f2d 9100";

/// GetCardUID at counter 1 and the tag's answer.
pub const GET_UID_COMMAND: &str = "9051000008 a3bede7b6bdbc3bd 00";
pub const GET_UID_RESPONSE: &str = "debf0e8a80599c36013bb0f5d1eae256 a8fba12fd1dec8d5 9100";
pub const SAMPLE_UID: &str = "04de5f1eacc040";

/// WriteData(file 2, offset 0, 01 02 03) in Full mode at counter 2.
pub const WRITE_FULL_COMMAND: &str =
    "908d00001f 02000000030000 b52b37793ee093bdf45f63a86b1e4202 79205182e531c3d5 00";
pub const WRITE_FULL_RESPONSE: &str = "6b3573a7f0f695ab 9100";

/// Factory capability container (file 1, 32 bytes).
pub const FACTORY_CC: &str = "001720010000ff0406e104010000000506e10500808283000000000000000000";

/// GetFileSettings answer of a provisioned NDEF file: Full mode, SDM with
/// UID and counter mirroring, PICC data key 1, CMAC key 2.
pub const PROVISIONED_FILE2_SETTINGS: &str = "00 43 00e0 000100 c1 ff12 200000 430000 430000";
