//! # Generator — Structured Document to MRZ Lines
//!
//! One generator for all five formats, driven by the [`FormatProfile`]
//! tables:
//!
//! 1. Start from filler-only lines of the profile's geometry.
//! 2. Render every data slot (field formatter, date codec).
//! 3. Walk the profile's check-digit rules in order, computing each digit
//!    from the slots already written. The composite rule comes last, so it
//!    sees the per-field digits.
//! 4. Verify the geometry and wrap the lines in [`MrzText`].
//!
//! Names are the only field allowed to truncate. Every other value that does
//! not fit its slot fails with [`MrzError::FieldTooWide`].

use crate::alphabet::{format_exact, format_names, format_numeric_field, normalize, FILLER};
use crate::check_digit::compute_check_digit;
use crate::date;
use crate::document::{MrzText, StructuredDocument};
use crate::error::{MrzError, Result};
use crate::format::Format;
use crate::profile::{Checksum, DocumentField, FieldName, FormatProfile};

/// Render `doc` as MRZ text in `format`.
pub fn generate(doc: &StructuredDocument, format: Format) -> Result<MrzText> {
    let profile = format.profile();
    let number = SplitNumber::split(doc, profile)?;

    if profile.field(FieldName::OptionalData2).is_none() && !doc.optional_data_2.trim().is_empty() {
        tracing::debug!(%format, "optional_data_2 has no slot in this format; ignored");
    }

    let mut lines: Vec<String> = (0..profile.line_count)
        .map(|_| FILLER.to_string().repeat(profile.line_width))
        .collect();

    for field in profile.fields {
        if let Some(value) = render(field, doc, &number)? {
            write(&mut lines, field, &value)?;
        }
    }

    for rule in profile.checks {
        if rule.checksum == Checksum::DocumentNumber && number.overflow.is_some() {
            // Extended numbers carry their digit inside optional data.
            continue;
        }
        let mut text = String::new();
        for source in profile.sources(rule) {
            text.push_str(source.slice(&lines));
        }
        let digit = compute_check_digit(&text);
        write(&mut lines, slot(profile, rule.digit)?, &digit.as_char().to_string())?;
    }

    for (i, line) in lines.iter().enumerate() {
        debug_assert_eq!(line.len(), profile.line_width);
        if line.len() != profile.line_width {
            return Err(MrzError::Internal(format!(
                "{format} line {} rendered {} characters, expected {}",
                i + 1,
                line.len(),
                profile.line_width
            )));
        }
    }

    tracing::debug!(%format, lines = lines.len(), "generated MRZ");
    MrzText::new(format, lines).map_err(|e| MrzError::Internal(e.to_string()))
}

/// Parse `format_tag` (`TD1`, `TD2`, `P`, `MRVA`, `MRVB`) and generate.
pub fn generate_str(format_tag: &str, doc: &StructuredDocument) -> Result<MrzText> {
    generate(doc, format_tag.parse()?)
}

/// The document number split across its slot and, for extended numbers,
/// the start of optional data 1.
struct SplitNumber {
    head: String,
    overflow: Option<String>,
}

impl SplitNumber {
    fn split(doc: &StructuredDocument, profile: &FormatProfile) -> Result<Self> {
        let number = normalize(doc.document_number.trim());
        let width = slot(profile, FieldName::DocumentNumber)?.width;
        if number.len() <= width {
            return Ok(Self {
                head: number,
                overflow: None,
            });
        }
        if !profile.extended_document_number {
            return Err(MrzError::FieldTooWide {
                field: "document_number",
                width,
                len: number.len(),
            });
        }
        if number.contains(FILLER) {
            return Err(MrzError::InvalidField {
                field: "document_number",
                reason: "extended document numbers cannot contain separators".into(),
            });
        }
        let digit = compute_check_digit(&number);
        Ok(Self {
            head: number[..width].to_string(),
            overflow: Some(format!("{}{}", &number[width..], digit.as_char())),
        })
    }
}

/// Text for a data slot, or `None` for slots filled by check-digit rules.
fn render(field: &DocumentField, doc: &StructuredDocument, number: &SplitNumber) -> Result<Option<String>> {
    use FieldName::*;

    let exact = |name: &'static str, value: &str| {
        format_exact(value.trim(), field.width).map_err(|e| MrzError::from_field(name, e))
    };
    let value = match field.name {
        DocumentType => exact("document_type", &doc.document_type)?,
        CountryCode => exact("country_code", &doc.country_code)?,
        Nationality => exact("nationality", &doc.nationality)?,
        Names => format_names(&doc.surname, &doc.given_names, field.width),
        DocumentNumber => exact("document_number", &number.head)?,
        BirthDate => render_date("birth_date", &doc.birth_date, field.width)?,
        ExpiryDate => render_date("expiry_date", &doc.expiry_date, field.width)?,
        Sex => render_sex(&doc.sex)?,
        OptionalData1 => match &number.overflow {
            Some(overflow) if doc.optional_data_1.trim().is_empty() => exact("optional_data_1", overflow)?,
            Some(overflow) => exact(
                "optional_data_1",
                &format!("{overflow}{FILLER}{}", doc.optional_data_1.trim()),
            )?,
            None => exact("optional_data_1", &doc.optional_data_1)?,
        },
        OptionalData2 => exact("optional_data_2", &doc.optional_data_2)?,
        DocumentNumberCheck if number.overflow.is_some() => FILLER.to_string(),
        DocumentNumberCheck | BirthDateCheck | ExpiryDateCheck | OptionalDataCheck | CompositeCheck => {
            return Ok(None)
        }
    };
    Ok(Some(value))
}

/// Encode a `DD/MM/YYYY` date. An empty value stands for an unknown date
/// and renders as filler.
fn render_date(name: &'static str, value: &str, width: usize) -> Result<String> {
    let value = value.trim();
    let encoded = if value.is_empty() {
        String::new()
    } else {
        date::encode_human(value)?
    };
    format_numeric_field(&encoded, width).map_err(|e| MrzError::from_field(name, e))
}

/// `M` and `F` pass through; `X`, `<` and empty mean unspecified and
/// render as filler.
fn render_sex(value: &str) -> Result<String> {
    match value.trim().to_ascii_uppercase().as_str() {
        "M" => Ok("M".into()),
        "F" => Ok("F".into()),
        "X" | "<" | "" => Ok(FILLER.to_string()),
        other => Err(MrzError::InvalidField {
            field: "sex",
            reason: format!("expected M, F, X or <, got {other:?}"),
        }),
    }
}

fn slot(profile: &FormatProfile, name: FieldName) -> Result<&'static DocumentField> {
    profile
        .field(name)
        .ok_or_else(|| MrzError::Internal(format!("{} profile has no {name} slot", profile.format)))
}

fn write(lines: &mut [String], field: &DocumentField, value: &str) -> Result<()> {
    if value.len() != field.width {
        return Err(MrzError::Internal(format!(
            "{} rendered {} characters for a {}-wide slot",
            field.name,
            value.len(),
            field.width
        )));
    }
    lines[field.line].replace_range(field.start..field.end(), value);
    Ok(())
}
