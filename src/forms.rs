//! Form input helpers

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Enter the date as YYYY-MM-DD")]
    Date,

    #[error("Enter a valid e-mail address")]
    Email,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Enter a password")]
    EmptyPassword,

    #[error("Enter the verification code")]
    EmptyCode,

    #[error("Enter {0}")]
    Missing(&'static str),
}

/// Progressive `YYYY-MM-DD` formatting while typing
pub fn format_date_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(8).collect();
    match digits.len() {
        0..=4 => digits,
        5..=6 => format!("{}-{}", &digits[..4], &digits[4..]),
        _ => format!("{}-{}-{}", &digits[..4], &digits[4..6], &digits[6..]),
    }
}

pub fn parse_date_input(value: &str) -> Result<NaiveDate, InputError> {
    let value = value.trim();
    if value.len() != 10 {
        return Err(InputError::Date);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| InputError::Date)
}

pub fn validate_email(email: &str) -> Result<(), InputError> {
    if EMAIL.as_ref().is_some_and(|re| re.is_match(email.trim())) {
        Ok(())
    } else {
        Err(InputError::Email)
    }
}

pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), InputError> {
    if password.is_empty() {
        return Err(InputError::EmptyPassword);
    }
    if password != confirm {
        return Err(InputError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_code(code: &str) -> Result<(), InputError> {
    if code.trim().is_empty() {
        Err(InputError::EmptyCode)
    } else {
        Ok(())
    }
}

/// Trimmed value, or [`InputError::Missing`] naming the field
pub fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, InputError> {
    match value.trim() {
        "" => Err(InputError::Missing(field)),
        v => Ok(v),
    }
}
