//! Input validation utilities
//!
//! Every check here runs before the store is touched.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Validate a kiosk PIN: exactly six ASCII digits
pub fn validate_pin(pin: &str) -> Result<(), String> {
    static PIN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PIN_REGEX.get_or_init(|| Regex::new(r"^[0-9]{6}$").expect("Failed to compile PIN regex"));

    if !regex.is_match(pin) {
        return Err("PIN must be exactly 6 digits".to_string());
    }

    Ok(())
}

/// Validate a worker's display name
pub fn validate_full_name(full_name: &str) -> Result<(), String> {
    if full_name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if full_name.chars().count() > 120 {
        return Err("Name must be at most 120 characters long".to_string());
    }

    Ok(())
}

/// Validate an optional contact email
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if email.len() > 254 || !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a time-off date range
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), String> {
    if end_date < start_date {
        return Err("End date must not be before start date".to_string());
    }

    Ok(())
}

/// Validate a paid or unpaid hour split
pub fn validate_hours(label: &str, hours: f64) -> Result<(), String> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(format!("{label} must be zero or more"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_must_be_six_digits() {
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("000001").is_ok());
        assert!(validate_pin("12345").is_err());
        assert!(validate_pin("1234567").is_err());
        assert!(validate_pin("12a456").is_err());
        assert!(validate_pin(" 123456").is_err());
        assert!(validate_pin("").is_err());
        assert!(validate_pin("１２３４５６").is_err());
    }

    #[test]
    fn test_name_must_not_be_blank() {
        assert!(validate_full_name("Grace Hopper").is_ok());
        assert!(validate_full_name("").is_err());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("shift.lead@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_date_range() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        let friday = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert!(validate_date_range(monday, friday).is_ok());
        assert!(validate_date_range(monday, monday).is_ok());
        assert!(validate_date_range(friday, monday).is_err());
    }

    #[test]
    fn test_hours_must_be_non_negative() {
        assert!(validate_hours("Paid hours", 0.0).is_ok());
        assert!(validate_hours("Paid hours", 7.5).is_ok());
        assert_eq!(
            validate_hours("Unpaid hours", -1.0).unwrap_err(),
            "Unpaid hours must be zero or more"
        );
        assert!(validate_hours("Paid hours", f64::NAN).is_err());
    }
}
