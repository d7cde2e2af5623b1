//! # Checker — MRZ Lines to a Validation Report
//!
//! Reverses the generator: validates geometry, slices every slot by the
//! profile's column table, recomputes every check digit named by the
//! profile's rules and compares it with the digit in the text.
//!
//! ## Two channels
//!
//! A [`ValidationResult`] keeps integrity and plausibility apart:
//!
//! - `checks` / `valid`: checksum outcomes. A mismatch means the MRZ was
//!   corrupted or tampered with. `valid` is true only if every check the
//!   profile mandates passes.
//! - `warnings`: notable but structurally sound content: expired
//!   documents, future birth dates, unknown codes. Warnings never touch
//!   `valid`.
//!
//! Only unusable input (wrong line count, wrong width, foreign characters)
//! is an error; see [`MrzError::MalformedInput`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::alphabet::{defill, split_names, FILLER};
use crate::check_digit::compute_check_digit;
use crate::config::CheckerConfig;
use crate::country::is_known_code;
use crate::date;
use crate::document::MrzText;
use crate::error::{MrzError, Result};
use crate::format::Format;
use crate::profile::{CharClass, CheckDigitRule, Checksum, DocumentField, FieldName, FormatProfile};

/// Field values read back out of an MRZ. Fillers are turned back into
/// spaces and trimmed; dates are kept raw alongside their decoded form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedFields {
    pub document_type: String,
    pub country_code: String,
    /// Full number, reassembled when it overflowed into optional data.
    pub document_number: String,
    /// Raw `YYMMDD`.
    pub birth_date: String,
    pub birth_date_decoded: Option<NaiveDate>,
    pub sex: String,
    /// Raw `YYMMDD`.
    pub expiry_date: String,
    pub expiry_date_decoded: Option<NaiveDate>,
    pub nationality: String,
    pub surname: String,
    pub given_names: String,
    pub optional_data_1: String,
    pub optional_data_2: String,
}

/// Outcome of one check-digit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub checksum: Checksum,
    /// Digit computed over the covered text.
    pub expected: char,
    /// Character found in the digit slot.
    pub found: char,
    /// Numeric slot covered by this rule that holds a letter. Fails the
    /// check even when the digits agree.
    pub non_numeric: Option<FieldName>,
    pub passed: bool,
}

/// Category of a non-fatal anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Expiry date is before the reference date.
    Expired,
    /// Birth date is after the reference date.
    BirthDateInFuture,
    /// Birth date is after the expiry date.
    BirthAfterExpiry,
    /// A date slot does not hold a calendar date.
    UnparseableDate,
    /// Sex is not `M`, `F`, `X` or filler.
    UnknownSex,
    /// Issuing state is not a known ICAO code.
    UnknownCountryCode,
    /// Nationality is not a known ICAO code.
    UnknownNationality,
    /// Document code does not belong to this format.
    UnexpectedDocumentType,
    /// Names slot holds only fillers.
    EmptyNames,
    /// Names slot contains digits.
    DigitsInNames,
}

/// A non-fatal anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub field: FieldName,
    pub message: String,
}

/// Result of checking one MRZ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub format: Format,
    pub fields: ParsedFields,
    /// One entry per rule in the profile, in profile order.
    pub checks: Vec<CheckOutcome>,
    pub warnings: Vec<Warning>,
    /// True only if every check passed.
    pub valid: bool,
}

impl ValidationResult {
    /// Outcome of a specific check, if the format has it.
    pub fn outcome(&self, checksum: Checksum) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.checksum == checksum)
    }

    /// Composite outcome; `None` for visas, which carry no composite digit.
    pub fn composite_passed(&self) -> Option<bool> {
        self.outcome(Checksum::Composite).map(|c| c.passed)
    }

    /// Checks that failed.
    pub fn failed(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Whether a warning of `kind` was raised.
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// MRZ checker with fixed pivots and reference date.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    config: CheckerConfig,
}

impl Checker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check `text` (lines separated by `\n` or `\r\n`) as `format`.
    pub fn check(&self, text: &str, format: Format, compute_warnings: bool) -> Result<ValidationResult> {
        let profile = format.profile();
        let lines: Vec<String> = text
            .trim()
            .lines()
            .map(|l| l.trim().to_string())
            .collect();
        let mrz = MrzText::new(format, lines)?;
        let lines = mrz.lines();
        let reader = SlotReader { profile, lines };

        let number = reader.document_number()?;
        let checks = profile
            .checks
            .iter()
            .map(|rule| reader.evaluate(rule, &number))
            .collect::<Result<Vec<_>>>()?;
        let valid = checks.iter().all(|c| c.passed);

        let fields = self.parse_fields(&reader, &number)?;
        let warnings = if compute_warnings {
            self.warnings(&reader, &fields)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            %format,
            valid,
            failed = checks.iter().filter(|c| !c.passed).count(),
            warnings = warnings.len(),
            "checked MRZ"
        );

        Ok(ValidationResult {
            format,
            fields,
            checks,
            warnings,
            valid,
        })
    }

    fn parse_fields(&self, reader: &SlotReader<'_>, number: &NumberSlot) -> Result<ParsedFields> {
        let birth_date = reader.text(FieldName::BirthDate)?.to_string();
        let expiry_date = reader.text(FieldName::ExpiryDate)?.to_string();
        let (surname, given_names) = split_names(reader.text(FieldName::Names)?);
        Ok(ParsedFields {
            document_type: defill(reader.text(FieldName::DocumentType)?),
            country_code: defill(reader.text(FieldName::CountryCode)?),
            document_number: number.full.clone(),
            birth_date_decoded: date::decode(&birth_date, self.config.birth_pivot()).ok(),
            birth_date,
            sex: reader.text(FieldName::Sex)?.to_string(),
            expiry_date_decoded: date::decode(&expiry_date, self.config.expiry_pivot).ok(),
            expiry_date,
            nationality: defill(reader.text(FieldName::Nationality)?),
            surname,
            given_names,
            optional_data_1: defill(&number.optional_data_1),
            optional_data_2: match reader.profile.field(FieldName::OptionalData2) {
                Some(f) => defill(f.slice(reader.lines)),
                None => String::new(),
            },
        })
    }

    fn warnings(&self, reader: &SlotReader<'_>, fields: &ParsedFields) -> Result<Vec<Warning>> {
        let mut out = Vec::new();
        let mut warn = |kind, field, message: String| out.push(Warning { kind, field, message });
        let today = self.config.reference_date;
        let profile = reader.profile;

        let document_type = reader.text(FieldName::DocumentType)?;
        if !document_type
            .chars()
            .next()
            .is_some_and(|c| profile.document_codes.contains(&c))
        {
            warn(
                WarningKind::UnexpectedDocumentType,
                FieldName::DocumentType,
                format!(
                    "document code {document_type:?} is unusual for {}; expected one of {:?}",
                    profile.format, profile.document_codes
                ),
            );
        }

        let country = reader.text(FieldName::CountryCode)?;
        if !is_known_code(country) {
            warn(
                WarningKind::UnknownCountryCode,
                FieldName::CountryCode,
                format!("issuing state {country:?} is not a known ICAO code"),
            );
        }

        let names = reader.text(FieldName::Names)?;
        if names.chars().all(|c| c == FILLER) {
            warn(WarningKind::EmptyNames, FieldName::Names, "names field is empty".into());
        } else if names.chars().any(|c| c.is_ascii_digit()) {
            warn(
                WarningKind::DigitsInNames,
                FieldName::Names,
                "names field contains digits".into(),
            );
        }

        match fields.birth_date_decoded {
            None => warn(
                WarningKind::UnparseableDate,
                FieldName::BirthDate,
                format!("birth date {:?} is not a calendar date", fields.birth_date),
            ),
            Some(birth) if birth > today => warn(
                WarningKind::BirthDateInFuture,
                FieldName::BirthDate,
                format!("birth date {birth} is after {today}"),
            ),
            Some(_) => {}
        }

        if !matches!(fields.sex.as_str(), "M" | "F" | "X" | "<") {
            warn(
                WarningKind::UnknownSex,
                FieldName::Sex,
                format!("sex {:?} is not M, F, X or <", fields.sex),
            );
        }

        match fields.expiry_date_decoded {
            None => warn(
                WarningKind::UnparseableDate,
                FieldName::ExpiryDate,
                format!("expiry date {:?} is not a calendar date", fields.expiry_date),
            ),
            Some(expiry) if expiry < today => warn(
                WarningKind::Expired,
                FieldName::ExpiryDate,
                format!("document expired on {expiry}"),
            ),
            Some(_) => {}
        }

        if let (Some(birth), Some(expiry)) = (fields.birth_date_decoded, fields.expiry_date_decoded) {
            if birth > expiry {
                warn(
                    WarningKind::BirthAfterExpiry,
                    FieldName::BirthDate,
                    format!("birth date {birth} is after expiry date {expiry}"),
                );
            }
        }

        let nationality = reader.text(FieldName::Nationality)?;
        if !is_known_code(nationality) {
            warn(
                WarningKind::UnknownNationality,
                FieldName::Nationality,
                format!("nationality {nationality:?} is not a known ICAO code"),
            );
        }

        Ok(out)
    }
}

/// Check `text` as `format` with the default configuration (today's date,
/// default pivots).
pub fn check(text: &str, format: Format, compute_warnings: bool) -> Result<ValidationResult> {
    Checker::default().check(text, format, compute_warnings)
}

/// Parse `format_tag` (`TD1`, `TD2`, `P`, `MRVA`, `MRVB`) and check.
pub fn check_str(format_tag: &str, text: &str, compute_warnings: bool) -> Result<ValidationResult> {
    check(text, format_tag.parse()?, compute_warnings)
}

struct SlotReader<'a> {
    profile: &'static FormatProfile,
    lines: &'a [String],
}

/// Document number as read from the MRZ, including the ICAO 9303-5/-6
/// overflow form where the number continues in optional data 1.
struct NumberSlot {
    full: String,
    /// For extended numbers: the digit found after the overflow.
    extended_digit: Option<char>,
    /// Optional data 1 with any overflow removed.
    optional_data_1: String,
}

impl<'a> SlotReader<'a> {
    fn field(&self, name: FieldName) -> Result<&'static DocumentField> {
        self.profile
            .field(name)
            .ok_or_else(|| MrzError::Internal(format!("{} profile has no {name} slot", self.profile.format)))
    }

    fn text(&self, name: FieldName) -> Result<&'a str> {
        Ok(self.field(name)?.slice(self.lines))
    }

    fn document_number(&self) -> Result<NumberSlot> {
        let head = self.text(FieldName::DocumentNumber)?;
        let check = self.text(FieldName::DocumentNumberCheck)?;
        let optional = self.text(FieldName::OptionalData1)?;

        let overflow = optional.split(FILLER).next().unwrap_or_default();
        if self.profile.extended_document_number && check == "<" && !overflow.is_empty() {
            let (rest, digit) = overflow.split_at(overflow.len() - 1);
            return Ok(NumberSlot {
                full: format!("{}{rest}", head.trim_end_matches(FILLER)),
                extended_digit: digit.chars().next(),
                optional_data_1: optional[overflow.len()..].to_string(),
            });
        }
        Ok(NumberSlot {
            full: defill(head),
            extended_digit: None,
            optional_data_1: optional.to_string(),
        })
    }

    fn evaluate(&self, rule: &CheckDigitRule, number: &NumberSlot) -> Result<CheckOutcome> {
        let slot_char = self.text(rule.digit)?.chars().next().unwrap_or(FILLER);
        let (text, found) = match (rule.checksum, number.extended_digit) {
            (Checksum::DocumentNumber, Some(digit)) => (number.full.clone(), digit),
            _ => {
                let mut text = String::new();
                for source in self.profile.sources(rule) {
                    text.push_str(source.slice(self.lines));
                }
                (text, slot_char)
            }
        };
        let expected = compute_check_digit(&text).as_char();
        // An unused personal-number field may carry '<' instead of '0'.
        let filler_allowed = rule.checksum == Checksum::OptionalData
            && found == FILLER
            && text.chars().all(|c| c == FILLER);
        let non_numeric = self.non_numeric_slot(rule);
        if let Some(name) = non_numeric {
            tracing::debug!(checksum = %rule.checksum, field = %name, "letter in numeric slot");
        }
        Ok(CheckOutcome {
            checksum: rule.checksum,
            expected,
            found,
            non_numeric,
            passed: (expected == found || filler_allowed) && non_numeric.is_none(),
        })
    }

    /// First numeric slot read by `rule` that holds something other than a
    /// digit or filler.
    fn non_numeric_slot(&self, rule: &CheckDigitRule) -> Option<FieldName> {
        self.profile
            .covering(rule)
            .into_iter()
            .find(|field| {
                field.class == CharClass::Numeric
                    && field
                        .slice(self.lines)
                        .chars()
                        .any(|c| !c.is_ascii_digit() && c != FILLER)
            })
            .map(|field| field.name)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::document::StructuredDocument;
    use crate::generator::generate;
    use proptest::prelude::*;

    fn human_date() -> impl Strategy<Value = String> {
        (1u32..=28, 1u32..=12, 1930i32..=2060).prop_map(|(d, m, y)| format!("{d:02}/{m:02}/{y}"))
    }

    /// Documents whose fields fit every format's slots.
    fn fitting_document() -> impl Strategy<Value = StructuredDocument> {
        (
            prop::sample::select(vec!["P", "I", "ID", "V", "AC"]),
            prop::sample::select(vec!["UTO", "GBR", "D", "XXA", "ZZZ"]),
            "[A-Z0-9]{1,9}",
            human_date(),
            prop::sample::select(vec!["M", "F", "X", "<"]),
            human_date(),
            "[A-Z]{1,12}",
            "([A-Z]{1,8}( [A-Z]{1,8})?)?",
            "[A-Z0-9]{0,7}",
            "[A-Z0-9]{0,11}",
        )
            .prop_map(
                |(doc_type, code, number, birth, sex, expiry, surname, given, opt1, opt2)| StructuredDocument {
                    document_type: doc_type.to_string(),
                    country_code: code.to_string(),
                    document_number: number,
                    birth_date: birth,
                    sex: sex.to_string(),
                    expiry_date: expiry,
                    nationality: code.to_string(),
                    surname,
                    given_names: given,
                    optional_data_1: opt1,
                    optional_data_2: opt2,
                },
            )
    }

    fn any_format() -> impl Strategy<Value = Format> {
        prop::sample::select(Format::all().to_vec())
    }

    /// Replace a character with one whose value differs by a non-multiple
    /// of ten, so every weight sees the change.
    fn bump(c: char) -> char {
        match c {
            '9' => '0',
            'Z' => 'A',
            '<' => '1',
            c => char::from(c as u8 + 1),
        }
    }

    proptest! {
        /// Whatever the generator writes, the checker accepts.
        #[test]
        fn generated_mrz_is_valid(doc in fitting_document(), format in any_format()) {
            let mrz = generate(&doc, format).unwrap();
            let result = check(&mrz.to_string(), format, true).unwrap();
            prop_assert!(result.valid, "{:?}", result.failed().collect::<Vec<_>>());
            prop_assert_eq!(&result.fields.document_number, &doc.document_number);
            prop_assert_eq!(&result.fields.surname, &doc.surname);
        }

        /// Every line has exactly the profile width.
        #[test]
        fn generated_lines_have_profile_width(doc in fitting_document(), format in any_format()) {
            let mrz = generate(&doc, format).unwrap();
            let profile = format.profile();
            prop_assert_eq!(mrz.lines().len(), profile.line_count);
            for line in mrz.lines() {
                prop_assert_eq!(line.len(), profile.line_width);
                prop_assert!(line.chars().all(crate::alphabet::is_mrz_char));
            }
        }

        /// Checking is a pure function of its input.
        #[test]
        fn check_is_idempotent(doc in fitting_document(), format in any_format()) {
            let text = generate(&doc, format).unwrap().to_string();
            let checker = Checker::new(CheckerConfig::at(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
            let a = checker.check(&text, format, true).unwrap();
            let b = checker.check(&text, format, true).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Numbers past the nine-character slot spill into optional data 1
        /// on TD1/TD2 and come back whole, alongside any other optional data.
        #[test]
        fn extended_numbers_round_trip(
            doc in fitting_document(),
            format in prop::sample::select(vec![Format::Td1, Format::Td2]),
            number in "[A-Z0-9]{10,23}",
            extra in "[A-Z0-9]{0,13}",
        ) {
            let slot = format.profile().field(FieldName::OptionalData1).unwrap().width;
            // Overflow plus its digit must fit the optional-data slot.
            let number: String = number.chars().take(9 + slot - 1).collect();
            let used = number.len() - 9 + 1;
            let extra: String = extra.chars().take(slot.saturating_sub(used + 1)).collect();
            let doc = StructuredDocument {
                document_number: number.clone(),
                optional_data_1: extra.clone(),
                ..doc
            };

            let mrz = generate(&doc, format).unwrap();
            let result = check(&mrz.to_string(), format, false).unwrap();
            prop_assert!(result.valid, "{:?}", result.failed().collect::<Vec<_>>());
            prop_assert_eq!(&result.fields.document_number, &number);
            prop_assert_eq!(&result.fields.optional_data_1, &extra);
        }

        /// Changing one covered character fails every rule that covers it.
        #[test]
        fn single_character_tamper_detected(
            doc in fitting_document(),
            format in any_format(),
            pick in any::<prop::sample::Index>(),
        ) {
            let profile = format.profile();
            let covered = profile.covered_positions();
            let (line, col) = covered[pick.index(covered.len())];

            let mut lines = generate(&doc, format).unwrap().into_lines();
            let before = lines[line].as_bytes()[col] as char;
            lines[line].replace_range(col..col + 1, &bump(before).to_string());

            let result = check(&lines.join("\n"), format, false).unwrap();
            prop_assert!(!result.valid);
            for rule in profile.checks {
                let covers = profile
                    .covering(rule)
                    .iter()
                    .any(|f| f.line == line && (f.start..f.end()).contains(&col));
                if covers {
                    let outcome = result.outcome(rule.checksum).unwrap();
                    prop_assert!(!outcome.passed, "{} survived change at {}:{}", rule.checksum, line, col);
                }
            }
        }
    }
}
