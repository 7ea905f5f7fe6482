use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CrmError, CrmResult};

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

static MACHINE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid machine name pattern"));

/// Trimmed value of a required text field.
pub fn required(label: &str, value: &str) -> CrmResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CrmError::validation(format!("{label} is required")));
    }
    Ok(value.to_string())
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Trimmed, lowercased email for a required field.
pub fn email(label: &str, value: &str) -> CrmResult<String> {
    let value = required(label, value)?.to_lowercase();
    if !is_email(&value) {
        return Err(CrmError::validation(format!("{label} is not a valid email address")));
    }
    Ok(value)
}

/// Like [`email`], for fields that may be left blank.
pub fn optional_email(label: &str, value: Option<String>) -> CrmResult<Option<String>> {
    match crate::models::clean(value) {
        Some(v) => email(label, &v).map(Some),
        None => Ok(None),
    }
}

/// Lowercase letters, digits and underscores only.
pub fn machine_name(label: &str, value: &str) -> CrmResult<String> {
    let value = required(label, value)?;
    if !MACHINE_NAME.is_match(&value) {
        return Err(CrmError::validation(format!(
            "{label} may only contain lowercase letters, digits and underscores"
        )));
    }
    Ok(value)
}

pub fn non_negative(label: &str, value: f64) -> CrmResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CrmError::validation(format!("{label} must be a positive number")));
    }
    Ok(value)
}

pub fn optional_non_negative(label: &str, value: Option<f64>) -> CrmResult<Option<f64>> {
    value.map(|v| non_negative(label, v)).transpose()
}

/// Rejects an end date earlier than the start date when both are present.
pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> CrmResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(CrmError::validation("End date cannot be before start date"));
        }
    }
    Ok(())
}

/// Both password fields must match and meet the minimum length.
pub fn new_password(password: &str, confirm: &str) -> CrmResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CrmError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirm {
        return Err(CrmError::validation("Passwords do not match"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("Name", "  Acme ").unwrap(), "Acme");
        assert!(matches!(required("Name", "   "), Err(CrmError::Validation(_))));
    }

    #[test]
    fn email_format() {
        assert_eq!(email("Email", " Ola@Example.NO ").unwrap(), "ola@example.no");
        assert!(email("Email", "not-an-email").is_err());
        assert!(email("Email", "a b@example.com").is_err());
        assert_eq!(optional_email("Email", Some("  ".into())).unwrap(), None);
    }

    #[test]
    fn machine_names() {
        assert!(machine_name("Name", "hosting_2024").is_ok());
        assert!(machine_name("Name", "Hosting").is_err());
        assert!(machine_name("Name", "web-hosting").is_err());
    }

    #[test]
    fn amounts_must_be_non_negative() {
        assert!(non_negative("Amount", 0.0).is_ok());
        assert!(non_negative("Amount", -1.0).is_err());
        assert!(non_negative("Amount", f64::NAN).is_err());
        assert_eq!(optional_non_negative("Budget", None).unwrap(), None);
    }

    #[test]
    fn end_date_not_before_start() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day);
        assert!(date_range(d(10), d(5)).is_err());
        assert!(date_range(d(10), d(15)).is_ok());
        assert!(date_range(d(10), d(10)).is_ok());
        assert!(date_range(None, d(5)).is_ok());
    }

    #[test]
    fn password_policy() {
        assert!(new_password("short", "short").is_err());
        assert!(new_password("long-enough", "long-enougH").is_err());
        assert!(new_password("long-enough", "long-enough").is_ok());
    }
}
