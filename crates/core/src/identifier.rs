//! National-identifier parsing.
//!
//! An identifier is written as `<digits>-<check>`: a numeric body and a
//! single verification character, e.g. `12345678-9` or `12.345.678-K`.
//! Only the shape is validated here; no checksum algorithm is applied to
//! the check character.

use std::fmt;

use crate::error::CoreError;

/// A parsed national identifier: numeric body plus check character.
///
/// The pair forms the natural key of a person record. The check character
/// is stored uppercased; the body is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NationalId {
    pub number: i64,
    pub check_digit: char,
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.number, self.check_digit)
    }
}

/// Parse a raw identifier string into a [`NationalId`].
///
/// Rules:
/// - the trimmed input must split into exactly two segments on `-`;
/// - the body segment, after stripping `.` thousands separators, must
///   parse as a positive integer;
/// - the check segment must be exactly one character, which is
///   ASCII-uppercased.
///
/// # Examples
///
/// ```
/// use padron_core::identifier::parse;
///
/// let id = parse("12.345.678-k").unwrap();
/// assert_eq!(id.number, 12_345_678);
/// assert_eq!(id.check_digit, 'K');
/// assert_eq!(id.to_string(), "12345678-K");
///
/// assert!(parse("12345678").is_err());
/// ```
pub fn parse(raw: &str) -> Result<NationalId, CoreError> {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    if parts.len() != 2 {
        return Err(CoreError::Validation(
            "invalid identifier format, expected <digits>-<check> (e.g. 12345678-9)".to_string(),
        ));
    }

    let body = parts[0].replace('.', "");
    let number: i64 = body.trim().parse().map_err(|_| {
        CoreError::Validation(format!("identifier body '{}' is not a number", parts[0].trim()))
    })?;
    if number <= 0 {
        return Err(CoreError::Validation(
            "identifier body must be a positive number".to_string(),
        ));
    }

    let check = parts[1].trim();
    let mut chars = check.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(NationalId {
            number,
            check_digit: c.to_ascii_uppercase(),
        }),
        _ => Err(CoreError::Validation(
            "check character must be exactly one character".to_string(),
        )),
    }
}
