//! # Error Types — Fatal Codec Failures
//!
//! Defines the error types returned by the MRZ codec. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Only conditions that abort a single call are errors: an unknown format
//!   tag, an unusable date, a field that cannot be rendered without losing
//!   data, or MRZ text that cannot be sliced safely.
//! - Checksum mismatches and warnings are *not* errors. They are recorded in
//!   [`ValidationResult`](crate::checker::ValidationResult) so a tampered MRZ
//!   still yields a structured failure report.

use thiserror::Error;

/// Top-level error type for the MRZ codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MrzError {
    /// The format tag is not one of `TD1`, `TD2`, `P`, `MRVA`, `MRVB`.
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),

    /// A date could not be parsed, encoded or decoded.
    #[error("invalid date: {0}")]
    InvalidDate(#[from] DateError),

    /// The MRZ text does not have the geometry or alphabet of the declared
    /// format, so fields cannot be sliced.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An identity field is longer than its slot and must not be truncated.
    #[error("field {field} is {len} characters wide but the slot holds {width}")]
    FieldTooWide {
        /// Field name.
        field: &'static str,
        /// Slot width in the profile.
        width: usize,
        /// Normalized value length.
        len: usize,
    },

    /// A field value is not representable in its slot.
    #[error("invalid value for field {field}: {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Checker configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// A profile produced a line of the wrong width. Indicates a bug in a
    /// profile table, never a user error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MrzError {
    /// Attach a field name to a [`FieldError`].
    pub fn from_field(field: &'static str, err: FieldError) -> Self {
        match err {
            FieldError::TooWide { width, len } => Self::FieldTooWide { field, width, len },
            FieldError::NonNumeric(c) => Self::InvalidField {
                field,
                reason: format!("non-digit character {c:?} in numeric field"),
            },
        }
    }
}

/// Error in date handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Human date is not in `DD/MM/YYYY` form.
    #[error("expected DD/MM/YYYY, got {0:?}")]
    BadHumanFormat(String),

    /// MRZ date is not exactly six digits.
    #[error("expected 6 digits (YYMMDD), got {0:?}")]
    BadMrzFormat(String),

    /// Day, month or year is outside the calendar.
    #[error("no such calendar date: day {day}, month {month}, year {year}")]
    OutOfRange {
        /// Day of month.
        day: u32,
        /// Month of year.
        month: u32,
        /// Four-digit year.
        year: i32,
    },
}

/// Error in fixed-width field formatting.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Value is wider than the slot and truncation is not allowed.
    #[error("value of {len} characters exceeds width {width}")]
    TooWide {
        /// Slot width.
        width: usize,
        /// Normalized value length.
        len: usize,
    },

    /// A numeric-only field contains something other than digits and filler.
    #[error("non-digit character {0:?} in numeric field")]
    NonNumeric(char),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MrzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_maps_to_too_wide() {
        let err = MrzError::from_field("document_number", FieldError::TooWide { width: 9, len: 12 });
        assert_eq!(
            err,
            MrzError::FieldTooWide {
                field: "document_number",
                width: 9,
                len: 12
            }
        );
    }

    #[test]
    fn field_error_maps_to_invalid_field() {
        let err = MrzError::from_field("birth_date", FieldError::NonNumeric('A'));
        assert!(matches!(err, MrzError::InvalidField { field: "birth_date", .. }));
        assert!(err.to_string().contains("'A'"));
    }

    #[test]
    fn date_error_converts() {
        let err: MrzError = DateError::BadMrzFormat("7408".into()).into();
        assert!(matches!(err, MrzError::InvalidDate(_)));
        assert!(err.to_string().contains("7408"));
    }
}
