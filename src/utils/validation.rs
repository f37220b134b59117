//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen for reasonable UX on names, notes and addresses;
//! SurrealDB itself enforces no text length.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, sub-product, customer, business name
pub const MAX_NAME_LEN: usize = 200;

/// Notes, expense descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Ship-to and customer addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Mobile numbers (digits only)
pub const MAX_MOBILE_DIGITS: usize = 10;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a mobile number: digits only, at most [`MAX_MOBILE_DIGITS`].
/// Empty strings pass (mobile is optional everywhere it appears).
pub fn validate_mobile(value: &str, field: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Ok(());
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "{field} must contain digits only"
        )));
    }
    if value.len() > MAX_MOBILE_DIGITS {
        return Err(AppError::validation(format!(
            "{field} must be at most {MAX_MOBILE_DIGITS} digits"
        )));
    }
    Ok(())
}

/// Validate a non-negative finite amount (expenses, charges).
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Steel Sheet", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_mobile() {
        assert!(validate_mobile("", "mobile").is_ok());
        assert!(validate_mobile("9876543210", "mobile").is_ok());
        assert!(validate_mobile("98765432101", "mobile").is_err()); // 11 digits
        assert!(validate_mobile("98765-4321", "mobile").is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(0.0, "amount").is_ok());
        assert!(validate_non_negative(120.5, "amount").is_ok());
        assert!(validate_non_negative(-1.0, "amount").is_err());
        assert!(validate_non_negative(f64::NAN, "amount").is_err());
    }
}
