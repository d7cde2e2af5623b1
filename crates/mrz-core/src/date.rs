//! # Date Codec — Human Dates to `YYMMDD` and Back
//!
//! MRZ dates carry only two year digits. Encoding simply drops the century;
//! decoding needs a pivot year to pick one:
//!
//! - two-digit years `>= pivot` become `19yy`,
//! - two-digit years `< pivot` become `20yy`.
//!
//! The pivot is always a parameter. Birth and expiry dates need different
//! pivots in practice (see [`CheckerConfig`](crate::config::CheckerConfig)).

use chrono::{Datelike, NaiveDate};

use crate::error::DateError;

/// Pivot used for expiry dates unless configured otherwise: `70`–`99` map to
/// the 1900s, `00`–`69` to the 2000s.
pub const DEFAULT_EXPIRY_PIVOT: u8 = 70;

/// Sliding birth-date pivot for a reference year: the two-digit year after
/// the reference year's. A decoded birth date can then never land in a
/// future year.
pub fn sliding_birth_pivot(reference: NaiveDate) -> u8 {
    // rem_euclid keeps the result in 0..100 for any year.
    (reference.year().rem_euclid(100) + 1) as u8
}

/// Parse a human date in `DD/MM/YYYY` form into `(day, month, year)`.
///
/// Only the shape is checked here; calendar validity is checked by
/// [`encode`].
pub fn parse_human(value: &str) -> Result<(u32, u32, i32), DateError> {
    let bad = || DateError::BadHumanFormat(value.to_string());
    let mut parts = value.trim().split('/');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };
    if day.is_empty()
        || day.len() > 2
        || month.is_empty()
        || month.len() > 2
        || year.len() != 4
        || ![day, month, year].iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(bad());
    }
    let day = day.parse().map_err(|_| bad())?;
    let month = month.parse().map_err(|_| bad())?;
    let year = year.parse().map_err(|_| bad())?;
    Ok((day, month, year))
}

/// Encode a calendar date as six MRZ digits `YYMMDD`.
pub fn encode(day: u32, month: u32, year: i32) -> Result<String, DateError> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .filter(|_| year >= 0)
        .ok_or(DateError::OutOfRange { day, month, year })?;
    Ok(format!(
        "{:02}{:02}{:02}",
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    ))
}

/// Parse a `DD/MM/YYYY` string and encode it as `YYMMDD`.
pub fn encode_human(value: &str) -> Result<String, DateError> {
    let (day, month, year) = parse_human(value)?;
    encode(day, month, year)
}

/// Decode six MRZ digits into a calendar date using `pivot` to choose the
/// century.
pub fn decode(yymmdd: &str, pivot: u8) -> Result<NaiveDate, DateError> {
    if yymmdd.len() != 6 || !yymmdd.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::BadMrzFormat(yymmdd.to_string()));
    }
    let num = |range: std::ops::Range<usize>| -> u32 {
        yymmdd[range]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };
    let yy = num(0..2);
    let month = num(2..4);
    let day = num(4..6);
    let century = if yy >= u32::from(pivot) { 1900 } else { 2000 };
    let year = century + yy as i32;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::OutOfRange { day, month, year })
}
