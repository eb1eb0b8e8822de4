#[path = "../common/mod.rs"]
mod common;

use boltcard::session::{AuthState, Authenticator};
use boltcard::test_support::{GOLDEN_STAGE1_RESPONSE, GOLDEN_TI};
use boltcard::transport::MockTransport;
use boltcard::{Error, KeyNumber};
use common::fixtures::{golden_authenticator, hx, mock_after_handshake, STAGE2_COMMAND};

#[tokio::test]
async fn recorded_handshake() {
    let mut mock = mock_after_handshake(vec![]);
    let mut auth = golden_authenticator();

    let session = auth
        .authenticate(&mut mock, KeyNumber::Key0, &[0u8; 16])
        .await
        .unwrap();

    assert_eq!(auth.state(), AuthState::Authenticated);
    assert_eq!(session.transaction_id().as_bytes(), &GOLDEN_TI);
    assert_eq!(session.command_counter(), 0);
    assert_eq!(session.active_key(), KeyNumber::Key0);
    assert_eq!(mock.sent[0], hx("9071000002 0000 00"));
    assert_eq!(mock.sent[1], hx(STAGE2_COMMAND));
}

#[tokio::test]
async fn wrong_key_is_detected() {
    let mut mock = mock_after_handshake(vec![]);
    let mut auth = golden_authenticator();

    let result = auth.authenticate(&mut mock, KeyNumber::Key0, &[1u8; 16]).await;
    assert!(result.is_err());
    assert_eq!(auth.state(), AuthState::Failed);
}

#[tokio::test]
async fn retry_status_is_not_retried() {
    let mut mock = MockTransport::new();
    mock.push_response(hx("91ad"));
    let mut auth = Authenticator::new();

    match auth.authenticate(&mut mock, KeyNumber::Key0, &[0u8; 16]).await {
        Err(Error::RetryUnsupported) => {}
        other => panic!("expected RetryUnsupported, got {:?}", other),
    }
    assert_eq!(mock.sent.len(), 1);
}

#[tokio::test]
async fn lost_tag_during_stage2() {
    let mut mock = MockTransport::new();
    mock.push_response(hx(GOLDEN_STAGE1_RESPONSE));
    mock.push_transport_error("tag removed");
    let mut auth = golden_authenticator();

    match auth.authenticate(&mut mock, KeyNumber::Key0, &[0u8; 16]).await {
        Err(Error::Transport(reason)) => assert_eq!(reason, "tag removed"),
        other => panic!("expected Transport, got {:?}", other),
    }
    assert_eq!(auth.state(), AuthState::Failed);
}
