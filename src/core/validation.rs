//! Input validation for command arguments.
//!
//! Command handlers receive user-typed strings; these checks turn them into a
//! pass/fail result with a message that can be shown back to the user as-is.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// What shape the input is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Any text, optionally length-bounded
    String,
    /// A finite decimal number, optionally range-bounded; blank text counts as zero
    Number,
    /// `local@domain.tld`
    Email,
    /// Absolute URL
    Url,
}

/// Constraints applied on top of the [`InputKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ValidationOptions {
    /// Missing or empty input is an error
    pub required: bool,
    /// Minimum length in characters ([`InputKind::String`])
    pub min_length: Option<usize>,
    /// Maximum length in characters ([`InputKind::String`])
    pub max_length: Option<usize>,
    /// Smallest accepted value ([`InputKind::Number`])
    pub min: Option<f64>,
    /// Largest accepted value ([`InputKind::Number`])
    pub max: Option<f64>,
}

impl ValidationOptions {
    /// Options with only `required` set.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }
}

/// Outcome of [`validate_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the input passed every check
    pub is_valid: bool,
    /// User-facing reason for the failure
    pub error: Option<String>,
}

impl ValidationResult {
    const fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

/// Validates `input` against `kind` and `options`.
///
/// Empty input is valid unless `options.required` is set.
#[must_use]
pub fn validate_input(
    input: Option<&str>,
    kind: InputKind,
    options: &ValidationOptions,
) -> ValidationResult {
    let input = match input {
        Some(value) if !value.is_empty() => value,
        _ if options.required => return ValidationResult::invalid("This field is required"),
        _ => return ValidationResult::valid(),
    };

    match kind {
        InputKind::String => validate_string(input, options),
        InputKind::Number => validate_number(input, options),
        InputKind::Email => {
            if EMAIL_RE.is_match(input) {
                ValidationResult::valid()
            } else {
                ValidationResult::invalid("Input must be a valid email address")
            }
        }
        InputKind::Url => match url::Url::parse(input) {
            Ok(_) => ValidationResult::valid(),
            Err(_) => ValidationResult::invalid("Input must be a valid URL"),
        },
    }
}

fn validate_string(input: &str, options: &ValidationOptions) -> ValidationResult {
    let length = input.chars().count();
    match (options.min_length, options.max_length) {
        (Some(min), _) if length < min => {
            ValidationResult::invalid(format!("Input must be at least {min} characters long"))
        }
        (_, Some(max)) if length > max => {
            ValidationResult::invalid(format!("Input must be no more than {max} characters long"))
        }
        _ => ValidationResult::valid(),
    }
}

fn validate_number(input: &str, options: &ValidationOptions) -> ValidationResult {
    let trimmed = input.trim();
    let parsed = if trimmed.is_empty() {
        Ok(0.0)
    } else {
        trimmed.parse::<f64>()
    };
    let number = match parsed {
        Ok(n) if n.is_finite() => n,
        _ => return ValidationResult::invalid("Input must be a valid number"),
    };
    match (options.min, options.max) {
        (Some(min), _) if number < min => {
            ValidationResult::invalid(format!("Number must be at least {min}"))
        }
        (_, Some(max)) if number > max => {
            ValidationResult::invalid(format!("Number must be no more than {max}"))
        }
        _ => ValidationResult::valid(),
    }
}
