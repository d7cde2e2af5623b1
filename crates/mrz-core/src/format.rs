//! # Document Format — Closed Set of MRZ Layouts
//!
//! Defines the `Format` enum covering the five ICAO 9303 layouts this codec
//! supports. Dispatch on format is always an exhaustive `match`; adding a
//! layout forces every consumer to handle it at compile time.
//!
//! Tags accepted on the wire: `TD1`, `TD2`, `P` (passport, TD3),
//! `MRVA`, `MRVB`. `TD3` is accepted as an alias for `P`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MrzError;
use crate::profile::{self, FormatProfile};

/// MRZ document layout.
///
/// | Tag | Document | Lines × width |
/// |-----|----------|---------------|
/// | `TD1`  | ID-1 card      | 3 × 30 |
/// | `TD2`  | ID-2 card      | 2 × 36 |
/// | `P`    | Passport (TD3) | 2 × 44 |
/// | `MRVA` | Visa, size A   | 2 × 44 |
/// | `MRVB` | Visa, size B   | 2 × 36 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// ID-1 size card.
    #[serde(rename = "TD1")]
    Td1,
    /// ID-2 size card.
    #[serde(rename = "TD2")]
    Td2,
    /// Passport booklet (TD3).
    #[serde(rename = "P", alias = "TD3")]
    Td3,
    /// Visa sticker, format A.
    #[serde(rename = "MRVA")]
    Mrva,
    /// Visa sticker, format B.
    #[serde(rename = "MRVB")]
    Mrvb,
}

/// Number of supported formats.
pub const FORMAT_COUNT: usize = 5;

impl Format {
    /// All supported formats, in tag order.
    pub fn all() -> &'static [Format; FORMAT_COUNT] {
        &[Self::Td1, Self::Td2, Self::Td3, Self::Mrva, Self::Mrvb]
    }

    /// Canonical tag for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Td1 => "TD1",
            Self::Td2 => "TD2",
            Self::Td3 => "P",
            Self::Mrva => "MRVA",
            Self::Mrvb => "MRVB",
        }
    }

    /// The static column table for this format.
    pub fn profile(&self) -> &'static FormatProfile {
        match self {
            Self::Td1 => &profile::TD1,
            Self::Td2 => &profile::TD2,
            Self::Td3 => &profile::TD3,
            Self::Mrva => &profile::MRVA,
            Self::Mrvb => &profile::MRVB,
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Td1 => "ID-1 card",
            Self::Td2 => "ID-2 card",
            Self::Td3 => "passport (TD3)",
            Self::Mrva => "visa, format A",
            Self::Mrvb => "visa, format B",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = MrzError;

    /// Parse a format tag, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TD1" => Ok(Self::Td1),
            "TD2" => Ok(Self::Td2),
            "P" | "TD3" => Ok(Self::Td3),
            "MRVA" => Ok(Self::Mrva),
            "MRVB" => Ok(Self::Mrvb),
            _ => Err(MrzError::UnsupportedFormat(s.to_string())),
        }
    }
}
