// boltcard/src/ndef/record.rs

use derive_more::Display;
use url::Url;

use crate::protocol::parser::{Cursor, ensure_len};
use crate::{Error, Result};

const FLAG_MB: u8 = 0b1000_0000;
const FLAG_ME: u8 = 0b0100_0000;
const FLAG_SR: u8 = 0b0001_0000;
const FLAG_IL: u8 = 0b0000_1000;
const TNF_MASK: u8 = 0b0000_0111;
const TNF_WELL_KNOWN: u8 = 0x01;

/// Largest payload (type header included) that fits the 1-byte length.
pub const SHORT_RECORD_MAX: usize = 255;

/// URI identifier codes understood when decoding.
const URI_PREFIXES: [(u8, &str); 4] = [
    (0x01, "http://www."),
    (0x02, "https://www."),
    (0x03, "http://"),
    (0x04, "https://"),
];

/// Well-known record types written by this crate.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// URI record.
    #[display(fmt = "URI")]
    Url,
    /// Text record (English).
    #[display(fmt = "Text")]
    Text,
}

impl RecordType {
    /// Record type name byte (`U` or `T`).
    pub fn type_byte(&self) -> u8 {
        match self {
            Self::Url => b'U',
            Self::Text => b'T',
        }
    }

    /// Bytes preceding the UTF-8 value inside the payload: URI identifier
    /// code 0 (no prefix), or UTF-8 status byte plus language "en".
    pub fn type_header(&self) -> &'static [u8] {
        match self {
            Self::Url => &[0x00],
            Self::Text => &[0x02, b'e', b'n'],
        }
    }

    fn from_type_byte(b: u8) -> Option<Self> {
        match b {
            b'U' => Some(Self::Url),
            b'T' => Some(Self::Text),
            _ => None,
        }
    }
}

/// Bytes in front of the value: NLEN, record header and type header.
/// 7 for a short URI record, 9 for short text; the long form adds 3.
pub fn header_len(record_type: RecordType, value_len: usize) -> usize {
    let type_header = record_type.type_header().len();
    let length_field = if type_header + value_len <= SHORT_RECORD_MAX {
        1
    } else {
        4
    };
    2 + 1 + 1 + length_field + 1 + type_header
}

/// Encode a single-record NDEF file holding `value`.
pub fn encode_record(record_type: RecordType, value: &[u8]) -> Result<Vec<u8>> {
    let type_header = record_type.type_header();
    let payload_len = type_header.len() + value.len();
    let total = header_len(record_type, value.len()) + value.len();
    let nlen = u16::try_from(total - 2).map_err(|_| Error::FrameTooLong {
        limit: u16::MAX as usize,
        actual: total - 2,
    })?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&nlen.to_be_bytes());
    if payload_len <= SHORT_RECORD_MAX {
        out.push(FLAG_MB | FLAG_ME | FLAG_SR | TNF_WELL_KNOWN);
        out.push(0x01);
        out.push(payload_len as u8);
    } else {
        out.push(FLAG_MB | FLAG_ME | TNF_WELL_KNOWN);
        out.push(0x01);
        out.extend_from_slice(&(payload_len as u32).to_be_bytes());
    }
    out.push(record_type.type_byte());
    out.extend_from_slice(type_header);
    out.extend_from_slice(value);
    Ok(out)
}

/// NDEF file holding a URI record with the full URL (no prefix compression).
pub fn ndef_data_for_url(url: &Url) -> Result<Vec<u8>> {
    encode_record(RecordType::Url, url.as_str().as_bytes())
}

/// NDEF file holding an English UTF-8 Text record.
pub fn ndef_data_for_text(text: &str) -> Result<Vec<u8>> {
    encode_record(RecordType::Text, text.as_bytes())
}

/// First record of an NDEF file, as read back from a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    /// Record kind.
    pub record_type: RecordType,
    /// URL or text.
    pub value: String,
}

impl NdefRecord {
    /// Parse the first URI or Text record of an NDEF file (NLEN included).
    /// Trailing bytes past NLEN are ignored.
    pub fn decode(file: &[u8]) -> Result<Self> {
        let mut c = Cursor::new(file);
        let nlen = c.be_u16()? as usize;
        ensure_len(file, 2 + nlen)?;
        let mut c = Cursor::new(&file[2..2 + nlen]);

        let flags = c.u8()?;
        if flags & TNF_MASK != TNF_WELL_KNOWN {
            return Err(Error::Decoding(format!("unsupported TNF {}", flags & TNF_MASK)));
        }
        let type_len = c.u8()? as usize;
        let payload_len = if flags & FLAG_SR != 0 {
            c.u8()? as usize
        } else {
            let b = c.take(4)?;
            u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as usize
        };
        let id_len = if flags & FLAG_IL != 0 { c.u8()? as usize } else { 0 };
        let record_type = match c.take(type_len)? {
            [b] => RecordType::from_type_byte(*b),
            _ => None,
        }
        .ok_or_else(|| Error::Decoding("unsupported record type".into()))?;
        c.take(id_len)?;
        let payload = c.take(payload_len)?;

        let value = match record_type {
            RecordType::Url => {
                let (&code, rest) = payload
                    .split_first()
                    .ok_or_else(|| Error::Decoding("empty URI record".into()))?;
                let prefix = URI_PREFIXES
                    .iter()
                    .find(|(c, _)| *c == code)
                    .map(|(_, p)| *p)
                    .unwrap_or("");
                format!("{}{}", prefix, utf8(rest)?)
            }
            RecordType::Text => {
                let (&status, rest) = payload
                    .split_first()
                    .ok_or_else(|| Error::Decoding("empty Text record".into()))?;
                let lang_len = (status & 0x3f) as usize;
                ensure_len(rest, lang_len)?;
                utf8(&rest[lang_len..])?
            }
        };
        Ok(Self { record_type, value })
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::Decoding(e.to_string()))
}
