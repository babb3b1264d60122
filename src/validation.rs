//! Input validation utilities for the service layer.
//!
//! Every check returns a field-level error so handlers can report which
//! part of the request was rejected. Emails are normalized to lowercase
//! before they reach the database.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Loose North-American phone pattern: optional country code, optional
/// parentheses, separators in space/dot/dash.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+\d{1,2}\s?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$")
        .expect("phone regex is valid")
});

/// Validates an email address and returns it trimmed and lowercased.
///
/// # Arguments
/// * `email` - The email address to validate
/// * `field` - Field name used in the error message
pub fn validate_email(email: &str, field: &str) -> Result<String> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(Error::validation(field, "Email is required"));
    }

    if email.len() > 254 {
        return Err(Error::validation(field, "Email address is too long (max 254 characters)"));
    }

    // Basic structure: exactly one @, non-empty local and domain parts,
    // at least one dot in the domain, no consecutive dots.
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(Error::validation(field, "Please provide a valid email"));
    }

    let domain = parts[1];
    if !domain.contains('.') || email.contains("..") {
        return Err(Error::validation(field, "Please provide a valid email"));
    }

    if email.contains(char::is_whitespace) {
        return Err(Error::validation(field, "Please provide a valid email"));
    }

    Ok(email)
}

/// Validates a candidate phone number against the loose phone pattern.
pub fn validate_phone(phone: &str) -> Result<String> {
    let phone = phone.trim().to_string();

    if phone.is_empty() {
        return Err(Error::validation("phone", "Phone number is required"));
    }

    if !PHONE_REGEX.is_match(&phone) {
        return Err(Error::validation(
            "phone",
            format!("{} is not a valid phone number", phone),
        ));
    }

    Ok(phone)
}

/// Validates a user's display name (minimum 2 characters after trimming).
pub fn validate_user_name(name: &str) -> Result<String> {
    let name = name.trim().to_string();

    if name.len() < 2 {
        return Err(Error::validation("name", "Name must be at least 2 characters long"));
    }

    Ok(name)
}

/// Validates password length at input time (minimum 6 characters).
/// Only the argon2 hash is ever stored.
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 6 {
        return Err(Error::validation(
            "password",
            "Password must be at least 6 characters long",
        ));
    }

    if password.len() > 128 {
        return Err(Error::validation("password", "Password is too long (max 128 characters)"));
    }

    Ok(())
}

/// Validates that a string is non-empty after trimming and returns the
/// trimmed value.
pub fn validate_required_string(input: &str, field: &str) -> Result<String> {
    let trimmed = input.trim().to_string();

    if trimmed.is_empty() {
        return Err(Error::validation(field, format!("{} is required", field)));
    }

    Ok(trimmed)
}
