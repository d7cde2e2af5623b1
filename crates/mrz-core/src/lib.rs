//! # mrz-core — ICAO 9303 Machine-Readable Zone Codec
//!
//! Generates and checks the machine-readable zone printed on passports,
//! identity cards and visas. Five layouts are supported: TD1 (ID-1 cards,
//! 3×30), TD2 (ID-2 cards, 2×36), TD3 (passports, 2×44), MRV-A (2×44) and
//! MRV-B (2×36) visas.
//!
//! ## Key Design Principles
//!
//! 1. **One table per layout.** Every slot, its width and every check-digit
//!    rule lives in a static [`FormatProfile`]. The generator and checker both
//!    walk the same table, so they cannot disagree about geometry.
//!
//! 2. **Closed `Format` enum.** Dispatch on layout is an exhaustive `match`.
//!    Adding a layout forces every consumer to handle it.
//!
//! 3. **Integrity vs. plausibility.** Check-digit failures are data in a
//!    [`ValidationResult`]; expired documents and unknown codes are
//!    warnings beside it. Only unusable input is an `Err`.
//!
//! 4. **No silent truncation of identifiers.** Names are cut to fit; any
//!    other overlong field is [`MrzError::FieldTooWide`].
//!
//! ## Crate Policy
//!
//! - Pure functions over owned strings. No I/O; the only clock read is
//!   [`CheckerConfig::default`].
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod alphabet;
pub mod check_digit;
pub mod checker;
pub mod config;
pub mod country;
pub mod date;
pub mod document;
pub mod error;
pub mod format;
pub mod generator;
pub mod profile;

// Re-export primary types for ergonomic imports.
pub use check_digit::{compute_check_digit, CheckDigit};
pub use checker::{
    check, check_str, CheckOutcome, Checker, ParsedFields, ValidationResult, Warning, WarningKind,
};
pub use config::CheckerConfig;
pub use document::{MrzText, StructuredDocument};
pub use error::{DateError, FieldError, MrzError};
pub use format::{Format, FORMAT_COUNT};
pub use generator::{generate, generate_str};
pub use profile::{Checksum, FieldName, FormatProfile};
