#[path = "../common/mod.rs"]
mod common;

use boltcard::ndef::Template;
use boltcard::tag::Tag;
use boltcard::test_support::{full_response, mac_response};
use boltcard::workflow::{inspect_with, provision_with, ProvisionInput, Step};
use boltcard::{Error, FileSpecifier};
use common::fixtures::*;
use url::Url;

fn provision_input() -> ProvisionInput {
    let base = Url::parse("https://card.example/ln").unwrap();
    ProvisionInput {
        template: Template::from_url(&base).unwrap(),
        key0: [0xA0; 16],
        picc_data_key: [0xA1; 16],
        cmac_key: [0xA2; 16],
    }
}

#[tokio::test]
async fn provision_happy_path() -> anyhow::Result<()> {
    common::init_logger();
    let mock = mock_after_handshake(vec![
        full_response(1, &hx(SAMPLE_UID)),
        mac_response(2, &[0x00]),
        full_response(3, &[]),
        mac_response(4, &[0x00]),
        full_response(5, &[]),
        full_response(6, &[]),
        full_response(7, &[]),
        mac_response(8, &[0x00]),
        hx("9100"),
    ]);
    let mut tag = Tag::new(mock);

    let uid = provision_with(&mut tag, &mut golden_authenticator(), &provision_input()).await?;
    assert_eq!(uid.to_hex(), SAMPLE_UID);
    assert_eq!(tag.transport().pending(), 0);
    assert_eq!(tag.transport().sent.len(), 11);
    Ok(())
}

#[tokio::test]
async fn provision_settings_refused() {
    let mock = mock_after_handshake(vec![
        full_response(1, &hx(SAMPLE_UID)),
        mac_response(2, &[0x00]),
        full_response(3, &[]),
        mac_response(4, &[0x00]),
        full_response(5, &[]),
        hx("919e"),
    ]);
    let mut tag = Tag::new(mock);

    match provision_with(&mut tag, &mut golden_authenticator(), &provision_input()).await {
        Err(Error::Workflow {
            step: Step::WriteFileSettings(FileSpecifier::Ndef),
            source,
        }) => assert!(matches!(*source, Error::Status { .. })),
        other => panic!("expected Workflow, got {:?}", other),
    }
}

#[tokio::test]
async fn inspect_stops_at_unreadable_uid() {
    let mock = mock_after_handshake(vec![hx("91ae")]);
    let mut tag = Tag::new(mock);

    let err = inspect_with(&mut tag, &mut golden_authenticator())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Workflow {
            step: Step::ReadChipUid,
            ..
        }
    ));
    assert!(err.to_string().starts_with("read chip uid failed"));
}
