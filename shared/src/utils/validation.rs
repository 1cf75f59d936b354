//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Minimum password length accepted by the credential stores
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Human-readable messages, in the order the rules were checked
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Check an email address for a plausible `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Validate registration credentials
///
/// Passwords need at least six characters with a digit, a lowercase letter, an uppercase letter and a non-alphanumeric
/// character. Every failing rule is reported, not just the first.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !is_valid_email(email) {
        errors.add_error("email", format!("Email '{}' is invalid.", email), "INVALID_EMAIL");
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add_error(
            "password",
            format!("Passwords must be at least {} characters.", MIN_PASSWORD_LENGTH),
            "PASSWORD_TOO_SHORT",
        );
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        errors.add_error(
            "password",
            "Passwords must have at least one non alphanumeric character.",
            "PASSWORD_REQUIRES_NON_ALPHANUMERIC",
        );
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.add_error(
            "password",
            "Passwords must have at least one digit ('0'-'9').",
            "PASSWORD_REQUIRES_DIGIT",
        );
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.add_error(
            "password",
            "Passwords must have at least one lowercase ('a'-'z').",
            "PASSWORD_REQUIRES_LOWER",
        );
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.add_error(
            "password",
            "Passwords must have at least one uppercase ('A'-'Z').",
            "PASSWORD_REQUIRES_UPPER",
        );
    }

    errors.into_result()
}
