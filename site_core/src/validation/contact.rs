//! Contact form submission

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::rules::{validate_email, validate_no_xss, validate_not_blank, validate_phone};
use super::{Validatable, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(max = 120, message = "Name must not exceed 120 characters"))]
    #[validate(custom(function = "validate_not_blank", message = "Name is required"))]
    pub name: String,

    #[validate(custom(
        function = "validate_phone",
        message = "Phone must be 10 digits starting with 05, 06 or 07"
    ))]
    pub phone: String,

    #[validate(custom(function = "validate_email", message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 200, message = "Subject must not exceed 200 characters"))]
    #[validate(custom(function = "validate_not_blank", message = "Subject is required"))]
    pub subject: String,

    #[validate(length(max = 5000, message = "Message must not exceed 5000 characters"))]
    #[validate(custom(function = "validate_not_blank", message = "Message is required"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Derive rules plus script-injection checks on the free-text fields.
    pub fn check(&self) -> ValidationResult {
        let mut result = self.validate_comprehensive();

        for (field, value) in [
            ("name", &self.name),
            ("subject", &self.subject),
            ("message", &self.message),
        ] {
            if validate_no_xss(value).is_err() {
                result.add_error(field, "Field contains invalid content");
            }
        }

        result
    }
}
