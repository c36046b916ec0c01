//! Input validation for contact submissions and admin input

pub mod contact;
pub mod rules;

pub use contact::ContactSubmission;
pub use rules::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Field-keyed validation outcome, rendered by the form as inline messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut result = Self::success();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Validation failed for field '{}'", field),
                };
                result.add_error(&field, &message);
            }
        }

        result
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_error(&self, field: &str) -> bool {
        !self.field_errors(field).is_empty()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

impl<T> Validatable for T
where
    T: Validate,
{
    fn validate_comprehensive(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => ValidationResult::from_validation_errors(errors),
        }
    }
}
