//! # Alphabet & Field Formatter
//!
//! The MRZ uses a 37-character subset: `A`–`Z`, `0`–`9` and the filler `<`.
//! Everything written into an MRZ slot passes through this module, so every
//! generated line satisfies the alphabet invariant by construction.
//!
//! Name fields get an extra pass: Latin letters with diacritics are
//! transliterated to their ICAO 9303-3 recommended forms before the generic
//! normalization maps anything left over to the filler.

use crate::error::FieldError;

/// The filler character used to pad unused positions.
pub const FILLER: char = '<';

/// Returns `true` if `c` belongs to the MRZ alphabet.
pub fn is_mrz_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == FILLER
}

/// Uppercase `value` and replace every character outside `A`–`Z`/`0`–`9`
/// with the filler. Spaces become filler too.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| {
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                c
            } else {
                FILLER
            }
        })
        .collect()
}

/// Normalize `value` and fit it to exactly `width` characters, truncating
/// when longer and right-padding with filler when shorter.
pub fn format_field(value: &str, width: usize) -> String {
    pad(normalize(value), width)
}

/// Like [`format_field`] but refuses to truncate.
///
/// Used for identity fields (document number, country codes) where losing
/// characters would silently produce a different document.
pub fn format_exact(value: &str, width: usize) -> Result<String, FieldError> {
    let normalized = normalize(value);
    if normalized.len() > width {
        return Err(FieldError::TooWide {
            width,
            len: normalized.len(),
        });
    }
    Ok(pad(normalized, width))
}

/// Format a numeric-only field. Any residual character other than a digit
/// or the filler after normalization is rejected, never coerced.
pub fn format_numeric_field(value: &str, width: usize) -> Result<String, FieldError> {
    let formatted = format_exact(value, width)?;
    match formatted.chars().find(|c| !(c.is_ascii_digit() || *c == FILLER)) {
        Some(c) => Err(FieldError::NonNumeric(c)),
        None => Ok(formatted),
    }
}

/// Build the primary/secondary identifier field:
/// `SURNAME<<GIVEN<NAMES`, fitted to `width`.
///
/// Names are transliterated, apostrophes dropped, and runs of whitespace or
/// punctuation collapse into a single filler so that `<<` stays the only
/// separator between surname and given names.
pub fn format_names(surname: &str, given_names: &str, width: usize) -> String {
    let surname = name_component(surname);
    let given = name_component(given_names);
    let combined = if given.is_empty() {
        surname
    } else {
        format!("{surname}<<{given}")
    };
    format_field(&combined, width)
}

/// Split a formatted names field back into `(surname, given_names)`, with
/// fillers turned back into spaces.
pub fn split_names(field: &str) -> (String, String) {
    let (primary, secondary) = field.split_once("<<").unwrap_or((field, ""));
    (defill(primary), defill(secondary))
}

/// Replace fillers with spaces and trim.
pub fn defill(value: &str) -> String {
    value
        .split(FILLER)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map Latin letters with diacritics to ICAO-recommended ASCII and drop
/// apostrophes. Characters without a mapping are passed through unchanged.
pub fn transliterate(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars().flat_map(char::to_uppercase) {
        match c {
            '\'' | '\u{2019}' | '`' => {}
            'À' | 'Á' | 'Â' | 'Ã' | 'Ā' | 'Ă' | 'Ą' => out.push('A'),
            'Ä' | 'Æ' => out.push_str("AE"),
            'Å' => out.push_str("AA"),
            'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => out.push('C'),
            'Ð' | 'Ď' | 'Đ' => out.push('D'),
            'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => out.push('E'),
            'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => out.push('G'),
            'Ĥ' | 'Ħ' => out.push('H'),
            'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => out.push('I'),
            'Ĳ' => out.push_str("IJ"),
            'Ĵ' => out.push('J'),
            'Ķ' => out.push('K'),
            'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => out.push('L'),
            'Ñ' | 'Ń' | 'Ņ' | 'Ň' => out.push('N'),
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ō' | 'Ŏ' => out.push('O'),
            'Ö' | 'Ø' | 'Œ' | 'Ő' => out.push_str("OE"),
            'Ŕ' | 'Ŗ' | 'Ř' => out.push('R'),
            'Ś' | 'Ŝ' | 'Ş' | 'Š' | 'Ș' => out.push('S'),
            'Ţ' | 'Ť' | 'Ŧ' | 'Ț' => out.push('T'),
            'Þ' => out.push_str("TH"),
            'Ù' | 'Ú' | 'Û' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ų' => out.push('U'),
            'Ü' | 'Ű' => out.push_str("UE"),
            'Ŵ' => out.push('W'),
            'Ý' | 'Ÿ' | 'Ŷ' => out.push('Y'),
            'Ź' | 'Ż' | 'Ž' => out.push('Z'),
            other => out.push(other),
        }
    }
    out
}

fn name_component(value: &str) -> String {
    normalize(&transliterate(value))
        .split(FILLER)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("<")
}

fn pad(mut value: String, width: usize) -> String {
    // Normalized values are pure ASCII, so byte length equals char count.
    value.truncate(width);
    while value.len() < width {
        value.push(FILLER);
    }
    value
}
