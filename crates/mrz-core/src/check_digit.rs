//! # Check-Digit Engine
//!
//! The single checksum used everywhere in ICAO 9303: every character maps to
//! a value (`0`–`9` to themselves, `A`–`Z` to 10–35, filler to 0), values are
//! weighted 7, 3, 1 repeating from the first position, and the digit is the
//! weighted sum modulo 10.
//!
//! The same function serves per-field digits (document number, dates,
//! optional data) and composite digits over concatenated slices.

use serde::{Deserialize, Serialize};

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// A single check digit, always in `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckDigit(u8);

impl CheckDigit {
    /// The numeric value of the digit.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit as it appears in the MRZ.
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl std::fmt::Display for CheckDigit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric value of an MRZ character, or `None` outside the alphabet.
pub fn char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        '<' => Some(0),
        _ => None,
    }
}

/// Compute the 7-3-1 check digit of `text`.
///
/// Callers pass text already restricted to the MRZ alphabet; anything else
/// contributes nothing to the sum.
pub fn compute_check_digit(text: &str) -> CheckDigit {
    let sum: u32 = text
        .chars()
        .zip(WEIGHTS.iter().cycle())
        .map(|(c, w)| char_value(c).unwrap_or(0) * w)
        .sum();
    CheckDigit((sum % 10) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_character_example() {
        // 3*7 + 6*3 = 39
        assert_eq!(compute_check_digit("36").value(), 9);
    }

    #[test]
    fn icao_specimen_fields() {
        assert_eq!(compute_check_digit("L898902C3").as_char(), '6');
        assert_eq!(compute_check_digit("740812").as_char(), '2');
        assert_eq!(compute_check_digit("120415").as_char(), '9');
        assert_eq!(compute_check_digit("ZE184226B<<<<<").as_char(), '1');
        assert_eq!(compute_check_digit("D23145890").as_char(), '7');
    }

    #[test]
    fn icao_specimen_composite() {
        // Slices 0..10, 13..20, 21..43 of the TD3 specimen line 2.
        let line = "L898902C36UTO7408122F1204159ZE184226B<<<<<10";
        let joined = format!("{}{}{}", &line[0..10], &line[13..20], &line[21..43]);
        assert_eq!(joined.len(), 39);
        assert_eq!(compute_check_digit(&joined).as_char(), '0');
    }

    #[test]
    fn fillers_count_as_zero() {
        assert_eq!(compute_check_digit("<<<<<<<<<<<<<<").value(), 0);
        assert_eq!(compute_check_digit("").value(), 0);
    }

    #[test]
    fn char_values() {
        assert_eq!(char_value('0'), Some(0));
        assert_eq!(char_value('9'), Some(9));
        assert_eq!(char_value('A'), Some(10));
        assert_eq!(char_value('Z'), Some(35));
        assert_eq!(char_value('<'), Some(0));
        assert_eq!(char_value('a'), None);
    }

    #[test]
    fn weights_cycle_every_three_positions() {
        // 1*7 + 0*3 + 0*1 + 1*7 = 14
        assert_eq!(compute_check_digit("1001").value(), 4);
    }

    #[test]
    fn display_and_char_agree() {
        let d = compute_check_digit("36");
        assert_eq!(d.to_string(), "9");
        assert_eq!(d.as_char(), '9');
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn digit_is_single_decimal(text in "[A-Z0-9<]{0,40}") {
            let d = compute_check_digit(&text);
            prop_assert!(d.value() < 10);
            prop_assert!(d.as_char().is_ascii_digit());
        }

        /// Fillers weigh nothing, so trailing padding never moves the digit.
        #[test]
        fn trailing_fillers_do_not_change_digit(text in "[A-Z0-9]{0,20}", pad in 0usize..20) {
            let padded = format!("{text}{}", "<".repeat(pad));
            prop_assert_eq!(compute_check_digit(&text), compute_check_digit(&padded));
        }
    }
}
