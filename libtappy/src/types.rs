// libtappy/src/types.rs

use derive_more::{Display, From};

use crate::constants::TAG_UID_LENGTHS;
use crate::error::CommandError;

/// Identifier handed out by a transport for one open connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display(fmt = "conn#{}", _0)]
pub struct ConnectionId(pub u32);

/// A candidate serial endpoint reported by device enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceInfo {
    /// Path handed to `Transport::open`, e.g. `/dev/ttyUSB0` or `COM3`.
    pub path: String,
    pub display_name: Option<String>,
    pub vendor_id: Option<u16>,
    pub product_id: Option<u16>,
}

impl DeviceInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: None,
            vendor_id: None,
            product_id: None,
        }
    }
}

/// Tag type byte reported by the reader alongside a UID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagType(pub u8);

impl TagType {
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Human-readable English name of the tag type.
    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "Unknown Tag",
            1 => "Mifare Ultralight",
            2 => "NTAG 203",
            3 => "Mifare Ultralight C",
            4 => "Mifare Classic Standard - 1k",
            5 => "Mifare Classic Standard - 4k",
            6 => "Mifare DESFire EV1 2k",
            7 => "Generic NFC Forum Type 2 tag",
            8 => "Mifare Plus 2k CL2",
            9 => "Mifare Plus 4k CL2",
            10 => "Mifare Mini",
            11 => "Generic NFC Forum Type 4 tag",
            12 => "Mifare DESFire EV1 4k",
            13 => "Mifare DESFire EV1 8k",
            14 => "Mifare DESFire - Unspecified model and capacity",
            15 => "Topaz 512",
            16 => "NTAG 210",
            17 => "NTAG 212",
            18 => "NTAG 213",
            19 => "NTAG 215",
            20 => "NTAG 216",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag UID (4, 7 or 10 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagUid(Vec<u8>);

impl TagUid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl TryFrom<&[u8]> for TagUid {
    type Error = CommandError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if !TAG_UID_LENGTHS.contains(&value.len()) {
            return Err(CommandError::bad_response(
                value,
                "Tag code is an invalid length",
            ));
        }
        Ok(Self(value.to_vec()))
    }
}

impl AsRef<[u8]> for TagUid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
