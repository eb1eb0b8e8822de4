#[path = "../common/mod.rs"]
mod common;

use boltcard::tag::Tag;
use boltcard::test_support::{full_response, mac_response};
use boltcard::{CommunicationMode, Error, FileSpecifier, KeyNumber};
use common::fixtures::*;

#[tokio::test]
async fn recorded_session_through_tag() -> anyhow::Result<()> {
    common::init_logger();
    let mock = mock_after_handshake(vec![
        hx(GET_CC_SETTINGS_RESPONSE),
        hx(GET_UID_RESPONSE),
        hx(WRITE_FULL_RESPONSE),
    ]);
    let mut tag = Tag::new(mock);
    let mut session = tag
        .authenticate_with(&mut golden_authenticator(), KeyNumber::Key0, &[0u8; 16])
        .await?;

    let settings = tag
        .get_file_settings(&mut session, FileSpecifier::Cc)
        .await?;
    assert_eq!(settings.file_size, 32);

    let uid = tag.get_chip_uid(&mut session).await?;
    assert_eq!(uid.to_hex(), SAMPLE_UID);

    tag.write_file_data(
        &mut session,
        FileSpecifier::Ndef,
        0,
        &[1, 2, 3],
        CommunicationMode::Full,
    )
    .await?;

    let mock = tag.into_transport();
    assert_eq!(mock.sent[4], hx(WRITE_FULL_COMMAND));
    Ok(())
}

#[tokio::test]
async fn key_version_and_capabilities() -> anyhow::Result<()> {
    common::init_logger();
    let mut plain_cc = hx(FACTORY_CC);
    plain_cc.extend_from_slice(&[0x91, 0x00]);

    let mock = mock_after_handshake(vec![mac_response(1, &[0x05]), plain_cc]);
    let mut tag = Tag::new(mock);
    let mut session = tag
        .authenticate_with(&mut golden_authenticator(), KeyNumber::Key0, &[0u8; 16])
        .await?;

    assert_eq!(tag.get_key_version(&mut session, KeyNumber::Key4).await?, 5);
    let container = tag
        .read_capabilities_container(&mut session, CommunicationMode::Plain)
        .await?;
    assert_eq!(container.files.len(), 2);
    assert_eq!(session.command_counter(), 2);
    Ok(())
}

#[tokio::test]
async fn full_read_of_proprietary_file() {
    let secret = [0x5Au8; 20];
    let mock = mock_after_handshake(vec![full_response(1, &secret)]);
    let mut tag = Tag::new(mock);
    let mut session = tag
        .authenticate_with(&mut golden_authenticator(), KeyNumber::Key0, &[0u8; 16])
        .await
        .unwrap();

    let data = tag
        .read_file_data(
            &mut session,
            FileSpecifier::Proprietary,
            0,
            20,
            CommunicationMode::Full,
        )
        .await
        .unwrap();
    assert_eq!(data, secret);

    match tag
        .read_file_data(
            &mut session,
            FileSpecifier::Proprietary,
            120,
            20,
            CommunicationMode::Full,
        )
        .await
    {
        Err(Error::FileTooLarge { max: 128, .. }) => {}
        other => panic!("expected FileTooLarge, got {:?}", other),
    }
}
