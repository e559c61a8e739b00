use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating phone numbers
    /// Digits with optional leading `+`, spaces, dots, hyphens and parentheses
    /// - Valid: "+55 11 98765-4321", "(11) 3333-4444", "555.123.4567"
    /// - Invalid: "abc", "12-ab-34", "+", "++5511"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9()][0-9() .\-]{5,18}[0-9]$").unwrap();
}

pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative")
            .with_message("Value must be zero or greater".into()));
    }
    Ok(())
}

pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive").with_message("Value must be greater than zero".into()));
    }
    Ok(())
}

/// Treats `None` and `""` the same way for partial updates
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+55 11 98765-4321"));
        assert!(PHONE_REGEX.is_match("(11) 3333-4444"));
        assert!(PHONE_REGEX.is_match("555.123.4567"));
        assert!(PHONE_REGEX.is_match("1234567"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("abc"));
        assert!(!PHONE_REGEX.is_match("12-ab-34"));
        assert!(!PHONE_REGEX.is_match("+"));
        assert!(!PHONE_REGEX.is_match("++5511987654"));
        assert!(!PHONE_REGEX.is_match("")); // empty
        assert!(!PHONE_REGEX.is_match("123")); // too short
    }

    #[test]
    fn test_price_checks() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 2)).is_err());
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    }
}
