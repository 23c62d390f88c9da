//! Input validation utilities and helpers
//!
//! Validation for user-supplied values collected at the CLI boundary.
//! Domain invariants live in `core::validation`; these helpers cover the
//! looser shapes of emails, phone numbers, and payout addresses.

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

/// Validate an email address
///
/// Structural check only (one `@`, a dotted domain, no whitespace); the
/// backend is the authority on deliverability.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(anyhow!("Email cannot be empty"));
    }

    if email.len() > 254 {
        return Err(anyhow!("Email too long (max 254 characters)"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(anyhow!("Email cannot contain whitespace"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(anyhow!("Invalid email format"));
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(anyhow!("Invalid email format"));
    }

    Ok(())
}

/// Validate a phone number
///
/// Accepts an optional leading `+` followed by 7 to 15 digits, ignoring
/// spaces and dashes.
pub fn validate_phone(phone: &str) -> Result<()> {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Phone number may contain only digits"));
    }

    if digits.len() < 7 || digits.len() > 15 {
        return Err(anyhow!(
            "Phone number must have 7-15 digits, got {}",
            digits.len()
        ));
    }

    Ok(())
}

/// Validate a payout address for withdrawals
///
/// The platform pays out to external crypto addresses; the exact chain is
/// the backend's concern, so the check is length plus character set.
pub fn validate_payout_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(anyhow!("Address cannot be empty"));
    }

    if address.len() < 20 || address.len() > 100 {
        return Err(anyhow!(
            "Address length {} outside the accepted 20-100 range",
            address.len()
        ));
    }

    if !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(anyhow!("Address may contain only letters and digits"));
    }

    Ok(())
}

/// Validate a positive monetary amount
pub fn validate_positive_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be positive, got {}", amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
        assert!(validate_email("nodot@example").is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("+15550100123").is_ok());
        assert!(validate_phone("555-010-0123").is_ok());
        assert!(validate_phone("5550100").is_ok());

        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+1234567890123456").is_err());
        assert!(validate_phone("call-me").is_err());
    }

    #[test]
    fn test_payout_address_validation() {
        assert!(validate_payout_address("TXYZexampleaddressvalue").is_ok());

        assert!(validate_payout_address("").is_err());
        assert!(validate_payout_address("tooshort").is_err());
        assert!(validate_payout_address(&"a".repeat(101)).is_err());
        assert!(validate_payout_address("has spaces in the address").is_err());
    }

    #[test]
    fn test_positive_amount() {
        assert!(validate_positive_amount(dec!(0.01)).is_ok());
        assert!(validate_positive_amount(Decimal::ZERO).is_err());
        assert!(validate_positive_amount(dec!(-5)).is_err());
    }
}
