//! Custom validation functions and closures

use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::field::FieldName;
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

pub type ValidationFn = Arc<dyn Fn(&str, FieldName) -> ValidationResult<()> + Send + Sync>;

/// Rule backed by a user-supplied function; absent values are skipped
#[derive(Clone)]
pub struct CustomValidator {
    pub name: String,
    validator: ValidationFn,
    /// Replaces the message of any error the function returns
    pub message: Option<String>,
}

impl CustomValidator {
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&str, FieldName) -> ValidationResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
            message: None,
        }
    }

    /// Lift a boolean predicate into a rule producing one fixed error
    pub fn predicate<P>(
        name: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
        predicate: P,
    ) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let code = format!("invalid_{}", name);
        let message = message.into();
        Self::new(name, move |value, field| {
            if predicate(value) {
                Ok(())
            } else {
                Err(ValidationError::new(field, message.clone(), code.clone(), kind))
            }
        })
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        let Some(value) = value else {
            return Ok(());
        };

        match ((self.validator)(value, field), &self.message) {
            (Err(error), Some(custom_message)) => Err(error.message(custom_message.clone())),
            (result, _) => result,
        }
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();
        params.insert("name".to_string(), Value::String(self.name.clone()));
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }
        Some(Value::Object(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_validator_closure() {
        let validator = CustomValidator::new("no_spaces", |value, field| {
            if value.contains(' ') {
                Err(ValidationError::format(field, "No spaces allowed", "has_spaces"))
            } else {
                Ok(())
            }
        });

        assert!(validator.validate(Some("abc"), FieldName::Email).is_ok());
        assert!(validator.validate(Some("a c"), FieldName::Email).is_err());
        assert!(validator.validate(None, FieldName::Email).is_ok());
    }

    #[test]
    fn test_custom_validator_predicate() {
        let validator = CustomValidator::predicate(
            "cvv",
            ErrorKind::Format,
            "CVV must be exactly 3 digits",
            crate::card::is_valid_cvv,
        );

        assert!(validator.validate(Some("123"), FieldName::Cvv).is_ok());
        let err = validator.validate(Some("12a"), FieldName::Cvv).unwrap_err();
        assert_eq!(err.code, "invalid_cvv");
        assert_eq!(err.kind, ErrorKind::Format);
        assert_eq!(err.field, FieldName::Cvv);
    }

    #[test]
    fn test_custom_validator_with_custom_message() {
        let validator = CustomValidator::new("always_fail", |_value, field| {
            Err(ValidationError::domain(field, "Original message", "nope"))
        })
        .message("Custom error message");

        let err = validator.validate(Some("x"), FieldName::Cvv).unwrap_err();
        assert_eq!(err.message, "Custom error message");
        assert_eq!(err.code, "nope");
    }
}
