use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)*\.[A-Za-z]{2,}$").expect("email regex is valid")
});

/// A field-level invariant violation raised by a model setter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Non-empty (after trimming) string of at most `max` characters.
pub fn required_text(field: &'static str, value: &str, max: usize) -> ValidationResult<String> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
    Ok(value.to_string())
}

pub fn email(field: &'static str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::new(field, "invalid email format"));
    }
    Ok(value.to_string())
}

/// Finite value inside the closed interval `[min, max]`.
pub fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> ValidationResult<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}
