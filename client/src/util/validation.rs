//! Client-side form checks (presence and format only).
//!
//! The backend owns every business rule; these helpers just keep obviously
//! malformed input from leaving the browser and produce inline messages.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::LazyLock;

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

/// Safaricom-style mobile numbers: `07XXXXXXXX`, `01XXXXXXXX`, `2547...`,
/// `+2547...`, or the bare 9-digit subscriber number.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+?254|0)?([71]\d{8})$").expect("phone regex"));

static NATIONAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{6,10}$").expect("id regex"));

/// Trimmed value, or `message` when blank.
///
/// # Errors
///
/// Returns `message` when the trimmed input is empty.
pub fn required(value: &str, message: &'static str) -> Result<String, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { Err(message) } else { Ok(trimmed.to_owned()) }
}

/// # Errors
///
/// Returns an inline message for a blank or malformed address.
pub fn validate_email(value: &str) -> Result<String, &'static str> {
    let email = required(value, "Email is required")?;
    if EMAIL_RE.is_match(&email) { Ok(email.to_ascii_lowercase()) } else { Err("Enter a valid email address") }
}

/// Normalise a Kenyan mobile number to the `254XXXXXXXXX` form M-Pesa expects.
///
/// # Errors
///
/// Returns an inline message for a blank or malformed number.
pub fn normalize_phone(value: &str) -> Result<String, &'static str> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if compact.is_empty() {
        return Err("Phone number is required");
    }
    PHONE_RE
        .captures(&compact)
        .and_then(|caps| caps.get(1))
        .map(|subscriber| format!("254{}", subscriber.as_str()))
        .ok_or("Enter a valid Safaricom number, e.g. 0712345678")
}

/// # Errors
///
/// Returns an inline message when the password is too short.
pub fn validate_password(value: &str) -> Result<(), &'static str> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        Err("Password must be at least 8 characters")
    } else {
        Ok(())
    }
}

/// # Errors
///
/// Returns an inline message when the confirmation differs.
pub fn validate_password_match(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if password == confirmation { Ok(()) } else { Err("Passwords do not match") }
}

/// # Errors
///
/// Returns an inline message for a blank or non-numeric ID number.
pub fn validate_national_id(value: &str) -> Result<String, &'static str> {
    let id = required(value, "ID number is required")?;
    if NATIONAL_ID_RE.is_match(&id) { Ok(id) } else { Err("ID number must be 6-10 digits") }
}

/// M-Pesa transaction code entered after a timeout. Only presence is checked;
/// the backend verifies it.
///
/// # Errors
///
/// Returns an inline message when the code is blank.
pub fn normalize_transaction_code(value: &str) -> Result<String, &'static str> {
    required(value, "Enter the M-Pesa transaction code").map(|code| code.to_ascii_uppercase())
}

/// Positive KES amount parsed from a text field.
///
/// # Errors
///
/// Returns an inline message for blank, non-numeric, or non-positive input.
pub fn parse_amount(value: &str) -> Result<f64, &'static str> {
    let raw = required(value, "Amount is required")?;
    let amount: f64 = raw.replace(',', "").parse().map_err(|_| "Enter a numeric amount")?;
    if amount.is_finite() && amount > 0.0 { Ok(amount) } else { Err("Amount must be greater than zero") }
}
