// libtappy/src/protocol/commands/content.rs

//! Encoders for the content-slot commands (ADD_CONTENT, EMULATE_CONTENT,
//! WRITE_TAG).

use crate::{Error, Result};

/// Kind of content stored in a content slot.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentType {
    Uri = 0x01,
    Text = 0x02,
    Vcard = 0x04,
    Empty = 0x99,
}

/// First vCard parameter byte. The reader requires a non-ASCII byte here.
pub const VCARD_MARKER: u8 = 0x80;

/// Fields supported by the reader's built-in vCard encoder. Anything else
/// has to be composed by hand and written with WRITE_CUSTOM_NDEF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vcard {
    pub name: String,
    pub cell_phone: String,
    pub work_phone: String,
    pub home_phone: String,
    pub personal_email: String,
    pub business_email: String,
    pub home_address: String,
    pub work_address: String,
    pub company: String,
    pub title: String,
    pub url: String,
}

/// Field names in wire order, as reported by [`Error::VcardFieldTooLong`].
pub const VCARD_FIELD_NAMES: [&str; 11] = [
    "name",
    "cell_phone",
    "work_phone",
    "home_phone",
    "personal_email",
    "business_email",
    "home_address",
    "work_address",
    "company",
    "title",
    "url",
];

impl Vcard {
    /// Fields in wire order.
    pub fn fields(&self) -> [&str; 11] {
        [
            &self.name,
            &self.cell_phone,
            &self.work_phone,
            &self.home_phone,
            &self.personal_email,
            &self.business_email,
            &self.home_address,
            &self.work_address,
            &self.company,
            &self.title,
            &self.url,
        ]
    }

    /// Encode as ADD_CONTENT data: marker, one length byte per field, then
    /// the UTF-8 fields separated by commas.
    ///
    /// Each length is a single byte on the wire; a field longer than 255
    /// bytes fails with [`Error::VcardFieldTooLong`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        let fields = self.fields();
        let mut lengths = [0u8; 11];
        for ((len, field), name) in lengths.iter_mut().zip(fields).zip(VCARD_FIELD_NAMES) {
            *len = u8::try_from(field.len()).map_err(|_| Error::VcardFieldTooLong {
                field: name,
                len: field.len(),
            })?;
        }

        let content_len: usize = fields.iter().map(|f| f.len()).sum::<usize>() + fields.len() - 1;
        let mut buf = Vec::with_capacity(1 + fields.len() + content_len);
        buf.push(VCARD_MARKER);
        buf.extend_from_slice(&lengths);
        for (i, field) in fields.iter().enumerate() {
            if i != 0 {
                buf.push(b',');
            }
            buf.extend_from_slice(field.as_bytes());
        }
        Ok(buf)
    }
}

/// ADD_CONTENT params: `slot, content_type, uri_code, data...`
pub fn encode_add_content(slot: u8, content_type: ContentType, uri_code: u8, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3 + data.len());
    buf.push(slot);
    buf.push(content_type as u8);
    buf.push(uri_code);
    buf.extend_from_slice(data);
    buf
}

/// EMULATE_CONTENT params: `slot, interrupt, num_scans, timeout (BE u16)`
pub fn encode_emulate_content(slot: u8, interrupt: bool, num_scans: u8, timeout_secs: u16) -> Vec<u8> {
    let [hi, lo] = timeout_secs.to_be_bytes();
    vec![slot, interrupt as u8, num_scans, hi, lo]
}

/// WRITE_TAG params: `slot, lock` followed by eight reserved zero bytes.
pub fn encode_write_content_to_tag(slot: u8, lock: bool) -> Vec<u8> {
    let mut buf = vec![0u8; 10];
    buf[0] = slot;
    buf[1] = lock as u8;
    buf
}
