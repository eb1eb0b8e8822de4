// boltcard/src/ndef/mod.rs
//! NDEF file encoding for the tag's NDEF file (E104): a single well-known
//! URI or Text record behind the 2-byte NLEN field, and the SDM template
//! that reserves space for the tag-generated `picc_data` and `cmac`.

/// NDEF file encoding and decoding.
pub mod record;
/// SDM templates with placeholder offsets.
pub mod template;

pub use record::{NdefRecord, RecordType, header_len, ndef_data_for_text, ndef_data_for_url};
pub use template::{Template, TemplateValue};
