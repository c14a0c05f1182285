//! Person field rules.
//!
//! Validation and normalization shared by the create and update paths.
//! Validation runs on the raw operator input; normalization produces the
//! canonical stored form (uppercased check character, trimmed name,
//! lowercased email). Uniqueness is not checked here; that is the
//! service's job against the record store.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum accepted length of a trimmed name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum accepted length of a trimmed email address.
pub const MAX_EMAIL_LEN: usize = 200;

/// Accepted email shape: `local@domain.tld` with letters, digits and
/// `+_.-` in the local part, letters, digits and `.-` in the domain, and a
/// final label of at least two letters.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("static email pattern compiles"))
}

/// Validate a record id supplied by the operator. Ids are store-assigned
/// and always positive.
pub fn validate_record_id(id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(
            "id must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Validate the operator-supplied person fields.
///
/// Applied identically before create and update. Checks shape and limits
/// only; the values are normalized separately once they pass.
pub fn validate_fields(
    id_number: i64,
    check_digit: &str,
    full_name: &str,
    email: &str,
) -> Result<(), CoreError> {
    if id_number <= 0 {
        return Err(CoreError::Validation(
            "identifier number must be greater than 0".to_string(),
        ));
    }

    if check_digit.trim().chars().count() != 1 {
        return Err(CoreError::Validation(
            "check character must be exactly one character".to_string(),
        ));
    }

    let name = full_name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "name exceeds {MAX_NAME_LEN} characters"
        )));
    }

    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::Validation("email is required".to_string()));
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(CoreError::Validation(format!(
            "email exceeds {MAX_EMAIL_LEN} characters"
        )));
    }
    if !email_regex().is_match(email) {
        return Err(CoreError::Validation(format!(
            "email '{email}' is not a valid address"
        )));
    }

    Ok(())
}

/// Canonical stored form of a check character: trimmed and uppercased.
pub fn normalize_check_digit(check_digit: &str) -> String {
    check_digit.trim().to_ascii_uppercase()
}

/// Canonical stored form of a name: trimmed.
pub fn normalize_name(full_name: &str) -> String {
    full_name.trim().to_string()
}

/// Canonical stored form of an email: trimmed and lowercased. Comparison
/// for uniqueness always happens on this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
