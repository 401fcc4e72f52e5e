//! Field formatting primitives.
//!
//! Deterministic transforms from typed values to fixed-width text. Widths are
//! counted in characters, not bytes: the output is Latin-1, where every
//! character occupies exactly one column.

use crate::error::{Result, SalaryFileError};
use chrono::{Datelike, NaiveDate};

/// Two-digit years below this pivot decode to 20xx, the rest to 19xx.
pub const CENTURY_PIVOT: u32 = 70;

/// Width of an encoded `YYMMDD` date.
pub const DATE_WIDTH: usize = 6;

/// Which end of an oversized value survives truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncate {
    /// Keep the rightmost characters, dropping the most significant digits.
    KeepRight,

    /// Keep the leftmost characters.
    KeepLeft,
}

/// What to do when a value is longer than its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Silently truncate according to the column's [`Truncate`] rule.
    ///
    /// This can corrupt data (an oversized account number or total loses
    /// digits without notice), so callers must make sure their input fits.
    #[default]
    Truncate,

    /// Fail with [`SalaryFileError::FieldOverflow`] instead of truncating.
    Reject,
}

/// Encodes an ISO `YYYY-MM-DD` date as `YYMMDD`.
///
/// Only the exact ten-character form is accepted; `2024-3-5` or
/// `2024/03/05` are rejected even though they name a real date.
pub fn encode_date(field: &'static str, value: &str) -> Result<String> {
    let invalid = || SalaryFileError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
    Ok(format!(
        "{:02}{:02}{:02}",
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    ))
}

/// Decodes a `YYMMDD` date, placing the year in 1970..=2069.
///
/// Returns `None` if the text is not six digits naming a real date.
pub fn decode_date(value: &str) -> Option<NaiveDate> {
    if value.len() != DATE_WIDTH || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: u32 = value[0..2].parse().ok()?;
    let month: u32 = value[2..4].parse().ok()?;
    let day: u32 = value[4..6].parse().ok()?;
    let year = if yy < CENTURY_PIVOT { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Right-justifies `value` in `width` columns, filling with zeros.
///
/// Longer values keep their rightmost `width` characters.
pub fn zero_pad(value: &str, width: usize) -> String {
    pad(value, width, '0', Truncate::KeepRight)
}

/// Left-justifies `value` in `width` columns, filling with spaces.
///
/// Longer values keep their first `width` characters.
pub fn space_pad(value: &str, width: usize) -> String {
    pad(value, width, ' ', Truncate::KeepLeft)
}

/// Fits `value` into exactly `width` columns.
///
/// Values are padded on the side opposite to the one `truncate` keeps, so
/// `KeepRight` columns are right-justified and `KeepLeft` columns are
/// left-justified.
pub fn pad(value: &str, width: usize, fill: char, truncate: Truncate) -> String {
    let len = value.chars().count();
    if len >= width {
        return match truncate {
            Truncate::KeepRight => value.chars().skip(len - width).collect(),
            Truncate::KeepLeft => value.chars().take(width).collect(),
        };
    }

    let filler = std::iter::repeat(fill).take(width - len);
    match truncate {
        Truncate::KeepRight => filler.chain(value.chars()).collect(),
        Truncate::KeepLeft => value.chars().chain(filler).collect(),
    }
}

/// Rejects values that do not fit `width` when the policy is strict.
pub fn check_width(
    field: &'static str,
    value: &str,
    width: usize,
    policy: OverflowPolicy,
) -> Result<()> {
    if policy == OverflowPolicy::Reject && value.chars().count() > width {
        return Err(SalaryFileError::FieldOverflow {
            field,
            width,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Fails on the first character outside the Latin-1 range.
pub fn check_latin1(field: &'static str, value: &str) -> Result<()> {
    match value.chars().find(|c| u32::from(*c) > 0xFF) {
        Some(ch) => Err(SalaryFileError::Unencodable { field, ch }),
        None => Ok(()),
    }
}

/// Encodes text as Latin-1, one byte per character.
pub fn to_latin1(field: &'static str, text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|ch| {
            u8::try_from(u32::from(ch)).map_err(|_| SalaryFileError::Unencodable { field, ch })
        })
        .collect()
}
