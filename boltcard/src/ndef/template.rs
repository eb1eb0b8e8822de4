// boltcard/src/ndef/template.rs

use url::{Url, form_urlencoded};

use super::record::{RecordType, header_len, ndef_data_for_text, ndef_data_for_url};
use crate::{Error, Result};

const PICC_DATA: &str = "picc_data";
const CMAC: &str = "cmac";
/// 16 bytes of PICC data as hex.
const PICC_DATA_PLACEHOLDER: &str = "00000000000000000000000000000000";
/// 8 bytes of truncated CMAC as hex.
const CMAC_PLACEHOLDER: &str = "0000000000000000";

/// Content of a template record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    /// URI record.
    Url(Url),
    /// Text record.
    Text(String),
}

/// NDEF content with placeholders the tag overwrites on every read (SDM
/// mirroring). Offsets are byte positions in the NDEF file, where the tag
/// starts writing each value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    value: TemplateValue,
    picc_data_offset: usize,
    cmac_offset: usize,
}

impl Template {
    /// Build from a base URL. Existing `picc_data`/`cmac` query parameters
    /// (any case) are dropped before the placeholders are appended; every
    /// other parameter is kept byte for byte.
    pub fn from_url(base: &Url) -> Result<Self> {
        let picc_data = format!("{}={}", PICC_DATA, PICC_DATA_PLACEHOLDER);
        let cmac = format!("{}={}", CMAC, CMAC_PLACEHOLDER);
        let mut query: Vec<&str> = base
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|segment| !segment.is_empty() && !is_marker_param(segment))
            .collect();
        query.push(&picc_data);
        query.push(&cmac);

        let mut url = base.clone();
        url.set_query(Some(&query.join("&")));

        let header = header_len(RecordType::Url, url.as_str().len());
        let (picc_data_offset, cmac_offset) = locate(url.as_str(), header)?;
        Ok(Self {
            value: TemplateValue::Url(url),
            picc_data_offset,
            cmac_offset,
        })
    }

    /// Build a Text record template: `<base>?picc_data=<..>&cmac=<..>`.
    pub fn from_text(base: &str) -> Result<Self> {
        let text = format!(
            "{}?{}={}&{}={}",
            base, PICC_DATA, PICC_DATA_PLACEHOLDER, CMAC, CMAC_PLACEHOLDER
        );
        let header = header_len(RecordType::Text, text.len());
        let (picc_data_offset, cmac_offset) = locate(&text, header)?;
        Ok(Self {
            value: TemplateValue::Text(text),
            picc_data_offset,
            cmac_offset,
        })
    }

    /// URL or text carried by the record.
    pub fn value(&self) -> &TemplateValue {
        &self.value
    }

    /// The record value as written to the tag.
    pub fn value_string(&self) -> &str {
        match &self.value {
            TemplateValue::Url(url) => url.as_str(),
            TemplateValue::Text(text) => text,
        }
    }

    /// File offset of the PICC data placeholder.
    pub fn picc_data_offset(&self) -> usize {
        self.picc_data_offset
    }

    /// File offset of the CMAC placeholder.
    pub fn cmac_offset(&self) -> usize {
        self.cmac_offset
    }

    /// NDEF file content to write to the tag.
    pub fn ndef_data(&self) -> Result<Vec<u8>> {
        match &self.value {
            TemplateValue::Url(url) => ndef_data_for_url(url),
            TemplateValue::Text(text) => ndef_data_for_text(text),
        }
    }
}

fn is_marker_param(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(name, _)| {
            let name = name.to_lowercase();
            name == PICC_DATA || name == CMAC
        })
        .unwrap_or(false)
}

/// Byte offsets just past the last `picc_data=` and `cmac=`, shifted by
/// the NDEF header in front of the value.
fn locate(value: &str, header: usize) -> Result<(usize, usize)> {
    let after = |marker: &'static str| {
        value
            .rfind(marker)
            .map(|i| header + i + marker.len())
            .ok_or(Error::TemplateMarkerMissing(marker))
    };
    Ok((after("picc_data=")?, after("cmac=")?))
}
