//! Input validation for directory fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Phone number is not in E.164 format.
    InvalidPhoneNumber(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidPhoneNumber(msg) => {
                write!(f, "Phone must be E.164 format (e.g. +12345678901): {}", msg)
            }
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for participant names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum number of digits in an E.164 number (excluding the `+`).
pub const MAX_PHONE_DIGITS: usize = 15;

/// Validate a phone number in E.164 format.
///
/// A valid number is a `+` followed by 2 to 15 digits, the first of which
/// is 1-9. No whitespace or separators are accepted.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::Empty("phone number".to_string()));
    }

    let Some(digits) = phone.strip_prefix('+') else {
        return Err(ValidationError::InvalidPhoneNumber(
            "must start with '+'".to_string(),
        ));
    };

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhoneNumber(
            "only digits may follow '+'".to_string(),
        ));
    }

    if digits.starts_with('0') {
        return Err(ValidationError::InvalidPhoneNumber(
            "country code cannot start with 0".to_string(),
        ));
    }

    if digits.len() < 2 {
        return Err(ValidationError::InvalidPhoneNumber(
            "too few digits".to_string(),
        ));
    }

    if digits.len() > MAX_PHONE_DIGITS {
        return Err(ValidationError::TooLong {
            field: "phone number".to_string(),
            max: MAX_PHONE_DIGITS,
            actual: digits.len(),
        });
    }

    Ok(())
}

/// Validate a participant name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Empty("name".to_string()));
    }

    let len = name.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
            actual: len,
        });
    }

    Ok(())
}
