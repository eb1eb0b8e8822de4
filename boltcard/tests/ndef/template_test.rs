#[path = "../common/mod.rs"]
mod common;

use boltcard::ndef::{ndef_data_for_url, NdefRecord, RecordType, Template, TemplateValue};
use boltcard::Error;
use url::Url;

#[test]
fn url_template_placeholders_line_up() {
    let base = Url::parse("https://card.example/ln?PICC_DATA=ff&k=v").unwrap();
    let template = Template::from_url(&base).unwrap();
    let data = template.ndef_data().unwrap();

    let picc = template.picc_data_offset();
    let cmac = template.cmac_offset();
    assert_eq!(&data[picc - 10..picc], b"picc_data=");
    assert_eq!(&data[picc..picc + 32], [b'0'; 32]);
    assert_eq!(&data[cmac - 5..cmac], b"cmac=");
    assert_eq!(&data[cmac..cmac + 16], [b'0'; 16]);
    assert!(template.value_string().contains("k=v"));
    assert!(!template.value_string().contains("ff"));

    let record = NdefRecord::decode(&data).unwrap();
    assert_eq!(record.record_type, RecordType::Url);
    assert_eq!(record.value, template.value_string());
}

#[test]
fn text_template() {
    let template = Template::from_text("lnurlw://card.example/ln").unwrap();
    assert!(matches!(template.value(), TemplateValue::Text(_)));
    let data = template.ndef_data().unwrap();
    assert_eq!(&data[template.cmac_offset() - 5..template.cmac_offset()], b"cmac=");
}

#[test]
fn long_url_switches_record_form() {
    let url = Url::parse(&format!("https://card.example/{}", "x".repeat(300))).unwrap();
    let data = ndef_data_for_url(&url).unwrap();
    // MB|ME|TNF=1 without SR
    assert_eq!(data[2], 0xC1);
    assert_eq!(
        NdefRecord::decode(&data).unwrap().value,
        url.as_str().to_string()
    );
}

#[test]
fn oversized_record_is_refused() {
    let url = Url::parse(&format!("https://card.example/{}", "x".repeat(70_000))).unwrap();
    match ndef_data_for_url(&url) {
        Err(Error::FrameTooLong { .. }) => {}
        other => panic!("expected FrameTooLong, got {:?}", other),
    }
}
