use super::*;

#[test]
fn required_trims_and_rejects_blank() {
    assert_eq!(required("  Jane ", "Name is required"), Ok("Jane".to_owned()));
    assert_eq!(required("   ", "Name is required"), Err("Name is required"));
}

#[test]
fn validate_email_accepts_and_lowercases() {
    assert_eq!(validate_email(" Jane.Doe@Example.CO.KE "), Ok("jane.doe@example.co.ke".to_owned()));
    assert_eq!(validate_email(""), Err("Email is required"));
    assert_eq!(validate_email("jane@"), Err("Enter a valid email address"));
    assert_eq!(validate_email("jane@example"), Err("Enter a valid email address"));
}

#[test]
fn normalize_phone_handles_common_formats() {
    for raw in ["0712345678", "254712345678", "+254712345678", "712345678", "0712 345 678", "0712-345-678"] {
        assert_eq!(normalize_phone(raw), Ok("254712345678".to_owned()), "input {raw}");
    }
    assert_eq!(normalize_phone("0110345678"), Ok("254110345678".to_owned()));
}

#[test]
fn normalize_phone_rejects_bad_numbers() {
    assert_eq!(normalize_phone(""), Err("Phone number is required"));
    for raw in ["0812345678", "07123456", "07123456789", "phone", "+1555123456"] {
        assert!(normalize_phone(raw).is_err(), "input {raw}");
    }
}

#[test]
fn password_checks() {
    assert!(validate_password("short").is_err());
    assert!(validate_password("longenough").is_ok());
    assert_eq!(validate_password_match("a", "b"), Err("Passwords do not match"));
    assert!(validate_password_match("same", "same").is_ok());
}

#[test]
fn national_id_requires_digits() {
    assert_eq!(validate_national_id(" 12345678 "), Ok("12345678".to_owned()));
    assert!(validate_national_id("12AB").is_err());
    assert!(validate_national_id("").is_err());
}

#[test]
fn transaction_code_only_requires_presence() {
    assert_eq!(normalize_transaction_code(" qwe123abc "), Ok("QWE123ABC".to_owned()));
    assert_eq!(normalize_transaction_code("  "), Err("Enter the M-Pesa transaction code"));
}

#[test]
fn parse_amount_accepts_thousands_separators() {
    assert_eq!(parse_amount("2,400"), Ok(2400.0));
    assert_eq!(parse_amount("0"), Err("Amount must be greater than zero"));
    assert_eq!(parse_amount("abc"), Err("Enter a numeric amount"));
    assert_eq!(parse_amount(""), Err("Amount is required"));
}
