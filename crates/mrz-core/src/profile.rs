//! # Format Profiles — Column Tables as Data
//!
//! One static [`FormatProfile`] per [`Format`]. A profile lists every field
//! slot (line, starting column, width, character class, composite
//! participation) and every check-digit rule (which slots feed which digit).
//! The composite rule has no source list of its own: it reads every slot
//! flagged `composite`, in table order.
//!
//! ## Invariant
//!
//! These tables are the single source of truth for both the
//! [`generator`](crate::generator) and the [`checker`](crate::checker). Neither
//! module hard-codes a column; they walk the same rules in the same order,
//! so whatever one writes the other reads back.
//!
//! Per-field rules come before the composite rule in `checks`, because the
//! composite digit covers the per-field digits.

use serde::{Deserialize, Serialize};

use crate::format::Format;

/// Semantic name of an MRZ slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// Document code, e.g. `P<`, `I<`, `V<`.
    DocumentType,
    /// Issuing state or organization.
    CountryCode,
    /// Primary and secondary identifiers, `SURNAME<<GIVEN<NAMES`.
    Names,
    /// Document number (first nine characters when extended).
    DocumentNumber,
    /// Check digit over the document number.
    DocumentNumberCheck,
    /// Nationality of the holder.
    Nationality,
    /// Date of birth, `YYMMDD`.
    BirthDate,
    /// Check digit over the birth date.
    BirthDateCheck,
    /// Sex, `M`, `F` or filler.
    Sex,
    /// Date of expiry, `YYMMDD`.
    ExpiryDate,
    /// Check digit over the expiry date.
    ExpiryDateCheck,
    /// Optional data (personal number on passports).
    #[serde(rename = "optional_data_1")]
    OptionalData1,
    /// Second optional-data element (TD1 line 2).
    #[serde(rename = "optional_data_2")]
    OptionalData2,
    /// Check digit over optional data (passports only).
    OptionalDataCheck,
    /// Composite check digit over the line(s).
    CompositeCheck,
}

impl FieldName {
    /// snake_case identifier, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentType => "document_type",
            Self::CountryCode => "country_code",
            Self::Names => "names",
            Self::DocumentNumber => "document_number",
            Self::DocumentNumberCheck => "document_number_check",
            Self::Nationality => "nationality",
            Self::BirthDate => "birth_date",
            Self::BirthDateCheck => "birth_date_check",
            Self::Sex => "sex",
            Self::ExpiryDate => "expiry_date",
            Self::ExpiryDateCheck => "expiry_date_check",
            Self::OptionalData1 => "optional_data_1",
            Self::OptionalData2 => "optional_data_2",
            Self::OptionalDataCheck => "optional_data_check",
            Self::CompositeCheck => "composite_check",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characters a slot may hold besides the filler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    /// `A`–`Z`, `0`–`9`, `<`.
    Alphanumeric,
    /// `0`–`9`, `<`.
    Numeric,
}

/// A named fixed-width slot on one MRZ line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentField {
    pub name: FieldName,
    pub line: usize,
    pub start: usize,
    pub width: usize,
    pub class: CharClass,
    /// Whether the slot is part of the composite check digit's input.
    pub composite: bool,
}

impl DocumentField {
    /// Exclusive end column.
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    /// Borrow this slot's text out of a set of MRZ lines.
    ///
    /// Lines must already have been validated against the profile geometry.
    pub fn slice<'a>(&self, lines: &'a [String]) -> &'a str {
        &lines[self.line][self.start..self.end()]
    }
}

/// Identifies one check digit in a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Checksum {
    DocumentNumber,
    BirthDate,
    ExpiryDate,
    OptionalData,
    Composite,
}

impl Checksum {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentNumber => "document_number",
            Self::BirthDate => "birth_date",
            Self::ExpiryDate => "expiry_date",
            Self::OptionalData => "optional_data",
            Self::Composite => "composite",
        }
    }
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which slots feed a check digit, and where the digit is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckDigitRule {
    pub checksum: Checksum,
    /// Slots concatenated in this order to form the checked text. Empty
    /// for the composite rule; see [`FormatProfile::sources`].
    pub sources: &'static [FieldName],
    /// Slot holding the digit.
    pub digit: FieldName,
}

/// Complete layout of one MRZ format.
#[derive(Debug)]
pub struct FormatProfile {
    pub format: Format,
    pub line_count: usize,
    pub line_width: usize,
    pub fields: &'static [DocumentField],
    pub checks: &'static [CheckDigitRule],
    /// Document numbers longer than the number slot may overflow into
    /// optional data 1 (ICAO 9303-5 and -6).
    pub extended_document_number: bool,
    /// Expected first character of the document code.
    pub document_codes: &'static [char],
}

impl FormatProfile {
    /// Look up a slot by name.
    pub fn field(&self, name: FieldName) -> Option<&'static DocumentField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a check-digit rule.
    pub fn rule(&self, checksum: Checksum) -> Option<&'static CheckDigitRule> {
        self.checks.iter().find(|r| r.checksum == checksum)
    }

    /// Whether the format carries a composite check digit. Visas do not.
    pub fn has_composite(&self) -> bool {
        self.rule(Checksum::Composite).is_some()
    }

    /// Slots whose text feeds `rule`, in concatenation order.
    pub fn sources(&self, rule: &CheckDigitRule) -> Vec<&'static DocumentField> {
        let fields: &'static [DocumentField] = self.fields;
        match rule.checksum {
            Checksum::Composite => fields.iter().filter(|f| f.composite).collect(),
            _ => rule.sources.iter().filter_map(|name| self.field(*name)).collect(),
        }
    }

    /// Slots read by `rule`, digit slot included.
    pub fn covering(&self, rule: &CheckDigitRule) -> Vec<&'static DocumentField> {
        let mut fields = self.sources(rule);
        fields.extend(self.field(rule.digit));
        fields
    }

    /// Every `(line, column)` read by at least one check-digit rule,
    /// including the digit slots themselves.
    pub fn covered_positions(&self) -> Vec<(usize, usize)> {
        let mut positions: Vec<(usize, usize)> = self
            .checks
            .iter()
            .flat_map(|rule| self.covering(rule))
            .flat_map(|f| (f.start..f.end()).map(move |col| (f.line, col)))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}

const fn alnum(name: FieldName, line: usize, start: usize, width: usize, composite: bool) -> DocumentField {
    DocumentField {
        name,
        line,
        start,
        width,
        class: CharClass::Alphanumeric,
        composite,
    }
}

const fn numeric(name: FieldName, line: usize, start: usize, width: usize, composite: bool) -> DocumentField {
    DocumentField {
        name,
        line,
        start,
        width,
        class: CharClass::Numeric,
        composite,
    }
}

use FieldName::*;

const DOCUMENT_NUMBER_RULE: CheckDigitRule = CheckDigitRule {
    checksum: Checksum::DocumentNumber,
    sources: &[DocumentNumber],
    digit: DocumentNumberCheck,
};

const BIRTH_DATE_RULE: CheckDigitRule = CheckDigitRule {
    checksum: Checksum::BirthDate,
    sources: &[BirthDate],
    digit: BirthDateCheck,
};

const EXPIRY_DATE_RULE: CheckDigitRule = CheckDigitRule {
    checksum: Checksum::ExpiryDate,
    sources: &[ExpiryDate],
    digit: ExpiryDateCheck,
};

/// TD1: 3 lines × 30. Composite spans line 1 from the document number on,
/// plus the dates and optional data 2 on line 2.
pub static TD1: FormatProfile = FormatProfile {
    format: Format::Td1,
    line_count: 3,
    line_width: 30,
    fields: &[
        alnum(DocumentType, 0, 0, 2, false),
        alnum(CountryCode, 0, 2, 3, false),
        alnum(DocumentNumber, 0, 5, 9, true),
        numeric(DocumentNumberCheck, 0, 14, 1, true),
        alnum(OptionalData1, 0, 15, 15, true),
        numeric(BirthDate, 1, 0, 6, true),
        numeric(BirthDateCheck, 1, 6, 1, true),
        alnum(Sex, 1, 7, 1, false),
        numeric(ExpiryDate, 1, 8, 6, true),
        numeric(ExpiryDateCheck, 1, 14, 1, true),
        alnum(Nationality, 1, 15, 3, false),
        alnum(OptionalData2, 1, 18, 11, true),
        numeric(CompositeCheck, 1, 29, 1, false),
        alnum(Names, 2, 0, 30, false),
    ],
    checks: &[
        DOCUMENT_NUMBER_RULE,
        BIRTH_DATE_RULE,
        EXPIRY_DATE_RULE,
        CheckDigitRule {
            checksum: Checksum::Composite,
            sources: &[],
            digit: CompositeCheck,
        },
    ],
    extended_document_number: true,
    document_codes: &['I', 'A', 'C'],
};

/// TD2: 2 lines × 36. Composite over line 2 minus nationality and sex.
pub static TD2: FormatProfile = FormatProfile {
    format: Format::Td2,
    line_count: 2,
    line_width: 36,
    fields: &[
        alnum(DocumentType, 0, 0, 2, false),
        alnum(CountryCode, 0, 2, 3, false),
        alnum(Names, 0, 5, 31, false),
        alnum(DocumentNumber, 1, 0, 9, true),
        numeric(DocumentNumberCheck, 1, 9, 1, true),
        alnum(Nationality, 1, 10, 3, false),
        numeric(BirthDate, 1, 13, 6, true),
        numeric(BirthDateCheck, 1, 19, 1, true),
        alnum(Sex, 1, 20, 1, false),
        numeric(ExpiryDate, 1, 21, 6, true),
        numeric(ExpiryDateCheck, 1, 27, 1, true),
        alnum(OptionalData1, 1, 28, 7, true),
        numeric(CompositeCheck, 1, 35, 1, false),
    ],
    checks: &[
        DOCUMENT_NUMBER_RULE,
        BIRTH_DATE_RULE,
        EXPIRY_DATE_RULE,
        CheckDigitRule {
            checksum: Checksum::Composite,
            sources: &[],
            digit: CompositeCheck,
        },
    ],
    extended_document_number: true,
    document_codes: &['I', 'A', 'C'],
};

/// TD3 (passport): 2 lines × 44. Same composite set as TD2 with a wider
/// personal-number field that carries its own check digit.
pub static TD3: FormatProfile = FormatProfile {
    format: Format::Td3,
    line_count: 2,
    line_width: 44,
    fields: &[
        alnum(DocumentType, 0, 0, 2, false),
        alnum(CountryCode, 0, 2, 3, false),
        alnum(Names, 0, 5, 39, false),
        alnum(DocumentNumber, 1, 0, 9, true),
        numeric(DocumentNumberCheck, 1, 9, 1, true),
        alnum(Nationality, 1, 10, 3, false),
        numeric(BirthDate, 1, 13, 6, true),
        numeric(BirthDateCheck, 1, 19, 1, true),
        alnum(Sex, 1, 20, 1, false),
        numeric(ExpiryDate, 1, 21, 6, true),
        numeric(ExpiryDateCheck, 1, 27, 1, true),
        alnum(OptionalData1, 1, 28, 14, true),
        numeric(OptionalDataCheck, 1, 42, 1, false),
        numeric(CompositeCheck, 1, 43, 1, false),
    ],
    checks: &[
        DOCUMENT_NUMBER_RULE,
        BIRTH_DATE_RULE,
        EXPIRY_DATE_RULE,
        CheckDigitRule {
            checksum: Checksum::OptionalData,
            sources: &[OptionalData1],
            digit: OptionalDataCheck,
        },
        CheckDigitRule {
            checksum: Checksum::Composite,
            sources: &[],
            digit: CompositeCheck,
        },
    ],
    extended_document_number: false,
    document_codes: &['P'],
};

/// MRV-A: 2 lines × 44. Per-field digits only, no composite.
pub static MRVA: FormatProfile = FormatProfile {
    format: Format::Mrva,
    line_count: 2,
    line_width: 44,
    fields: &[
        alnum(DocumentType, 0, 0, 2, false),
        alnum(CountryCode, 0, 2, 3, false),
        alnum(Names, 0, 5, 39, false),
        alnum(DocumentNumber, 1, 0, 9, false),
        numeric(DocumentNumberCheck, 1, 9, 1, false),
        alnum(Nationality, 1, 10, 3, false),
        numeric(BirthDate, 1, 13, 6, false),
        numeric(BirthDateCheck, 1, 19, 1, false),
        alnum(Sex, 1, 20, 1, false),
        numeric(ExpiryDate, 1, 21, 6, false),
        numeric(ExpiryDateCheck, 1, 27, 1, false),
        alnum(OptionalData1, 1, 28, 16, false),
    ],
    checks: &[DOCUMENT_NUMBER_RULE, BIRTH_DATE_RULE, EXPIRY_DATE_RULE],
    extended_document_number: false,
    document_codes: &['V', 'A'],
};

/// MRV-B: 2 lines × 36. Per-field digits only, no composite.
pub static MRVB: FormatProfile = FormatProfile {
    format: Format::Mrvb,
    line_count: 2,
    line_width: 36,
    fields: &[
        alnum(DocumentType, 0, 0, 2, false),
        alnum(CountryCode, 0, 2, 3, false),
        alnum(Names, 0, 5, 31, false),
        alnum(DocumentNumber, 1, 0, 9, false),
        numeric(DocumentNumberCheck, 1, 9, 1, false),
        alnum(Nationality, 1, 10, 3, false),
        numeric(BirthDate, 1, 13, 6, false),
        numeric(BirthDateCheck, 1, 19, 1, false),
        alnum(Sex, 1, 20, 1, false),
        numeric(ExpiryDate, 1, 21, 6, false),
        numeric(ExpiryDateCheck, 1, 27, 1, false),
        alnum(OptionalData1, 1, 28, 8, false),
    ],
    checks: &[DOCUMENT_NUMBER_RULE, BIRTH_DATE_RULE, EXPIRY_DATE_RULE],
    extended_document_number: false,
    document_codes: &['V', 'A'],
};
