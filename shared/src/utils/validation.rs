//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PERSON_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern is valid"));

/// Maximum accepted email length
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Upper bound for an estimated treatment amount
pub const MAX_ESTIMATED_AMOUNT: u64 = 100_000_000;

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
#[derive(Debug, Clone, Default, PartialEq, Eq)]
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

    /// Whether any error was recorded for `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Group messages by field, in a stable order
    pub fn to_field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
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

/// Trait for types that can be validated
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Field checks used by the claim form
pub mod validators {
    use super::*;

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length (in characters) is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// `local@domain.tld` with no whitespace, at most 255 characters
    pub fn is_valid_email(email: &str) -> bool {
        email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
    }

    /// Letters and spaces only, 2 to 100 characters once trimmed
    pub fn is_valid_person_name(name: &str) -> bool {
        let trimmed = name.trim();
        length_between(trimmed, 2, 100) && PERSON_NAME_REGEX.is_match(trimmed)
    }

    /// Exactly ten digits once separators are stripped
    pub fn is_valid_phone_number(phone: &str) -> bool {
        digits_only(phone).len() == 10
    }

    /// Whole positive amount no larger than [`MAX_ESTIMATED_AMOUNT`]
    pub fn is_valid_amount(amount: &str) -> bool {
        let trimmed = amount.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        trimmed
            .parse::<u64>()
            .map(|value| value > 0 && value <= MAX_ESTIMATED_AMOUNT)
            .unwrap_or(false)
    }

    /// Strip everything but ASCII digits
    pub fn digits_only(value: &str) -> String {
        value.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}
