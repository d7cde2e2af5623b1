//! # Documents and Rendered MRZ Text
//!
//! [`StructuredDocument`] is the semantic input to generation: the
//! fields a document issuer fills in, with dates in `DD/MM/YYYY`.
//! [`MrzText`] is the rendered output.

use serde::{Deserialize, Serialize};

use crate::alphabet::is_mrz_char;
use crate::error::{MrzError, Result};
use crate::format::Format;

/// Semantic values of a travel document.
///
/// Not every field applies to every format: `optional_data_2` only exists
/// on TD1. Absent fields deserialize as empty strings and render as filler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredDocument {
    /// Document code, e.g. `P`, `I`, `ID`, `V`.
    pub document_type: String,
    /// Issuing state, ICAO alpha-3 (`D` for Germany is filler-padded).
    #[serde(alias = "contry_code")]
    pub country_code: String,
    pub document_number: String,
    /// `DD/MM/YYYY`.
    pub birth_date: String,
    /// `M`, `F`, `X` or `<`.
    pub sex: String,
    /// `DD/MM/YYYY`.
    #[serde(alias = "expiration_date")]
    pub expiry_date: String,
    pub nationality: String,
    pub surname: String,
    pub given_names: String,
    pub optional_data_1: String,
    pub optional_data_2: String,
}

/// Rendered MRZ lines.
///
/// Every line has the profile width and uses only `A`–`Z`, `0`–`9`, `<`.
/// Values are only built by the generator or by [`MrzText::new`], which
/// enforces the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MrzText {
    format: Format,
    lines: Vec<String>,
}

impl MrzText {
    /// Wrap `lines` after checking them against `format`'s geometry and the
    /// MRZ alphabet.
    pub fn new(format: Format, lines: Vec<String>) -> Result<Self> {
        let profile = format.profile();
        if lines.len() != profile.line_count {
            return Err(MrzError::MalformedInput(format!(
                "{format} expects {} lines, got {}",
                profile.line_count,
                lines.len()
            )));
        }
        for (i, line) in lines.iter().enumerate() {
            if let Some(bad) = line.chars().find(|c| !is_mrz_char(*c)) {
                return Err(MrzError::MalformedInput(format!(
                    "line {} contains {bad:?}, outside the MRZ alphabet",
                    i + 1
                )));
            }
            if line.len() != profile.line_width {
                return Err(MrzError::MalformedInput(format!(
                    "line {} of {format} must be {} characters, got {}",
                    i + 1,
                    profile.line_width,
                    line.len()
                )));
            }
        }
        Ok(Self { format, lines })
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl std::fmt::Display for MrzText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
