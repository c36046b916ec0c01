//! Validation rules and custom validators

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    // National mobile format: ten digits, operator prefix 05, 06 or 07.
    static ref PHONE_REGEX: Regex = Regex::new(
        r"^0[5-7][0-9]{8}$"
    ).unwrap();

    static ref XSS_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)<script[^>]*>").unwrap(),
        Regex::new(r"(?i)</script>").unwrap(),
        Regex::new(r"(?i)javascript:").unwrap(),
        Regex::new(r"(?i)<iframe[^>]*>").unwrap(),
    ];
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::new("Phone number cannot be empty"));
    }

    if !is_valid_phone(phone) {
        return Err(ValidationError::new("Invalid phone number format"));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("Email cannot be empty"));
    }

    if email.len() > 254 {
        return Err(ValidationError::new("Email is too long"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("Invalid email format"));
    }

    Ok(())
}

pub fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("Field cannot be blank"));
    }
    Ok(())
}

pub fn validate_no_xss(input: &str) -> Result<(), ValidationError> {
    for pattern in XSS_PATTERNS.iter() {
        if pattern.is_match(input) {
            return Err(ValidationError::new("Input contains potentially dangerous script patterns"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("0512345678").is_ok());
        assert!(validate_phone("0612345678").is_ok());
        assert!(validate_phone("0799999999").is_ok());

        assert!(validate_phone("1234567890").is_err());
        assert!(validate_phone("061234567").is_err());
        assert!(validate_phone("06123456789").is_err());
        assert!(validate_phone("0412345678").is_err());
        assert!(validate_phone("0812345678").is_err());
        assert!(validate_phone("06 12 34 56 78").is_err());
        assert!(validate_phone("+212612345678").is_err());
        assert!(validate_phone("06123456a8").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_phone_rejects_non_ascii_digits() {
        // Arabic-Indic digits are not accepted by the national format.
        assert!(!is_valid_phone("٠٦١٢٣٤٥٦٧٨"));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("contact@chantier.ma").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Ali").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_xss_detection() {
        assert!(validate_no_xss("Devis pour une villa").is_ok());
        assert!(validate_no_xss("<script>alert('xss')</script>").is_err());
        assert!(validate_no_xss("javascript:alert(1)").is_err());
    }
}
