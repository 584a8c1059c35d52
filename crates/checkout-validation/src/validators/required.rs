//! Required field validator

use crate::error::{ValidationError, ValidationResult};
use crate::field::FieldName;
use crate::traits::ValidationRule;
use serde_json::Value;

/// Validator that ensures a field is present and not blank
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl RequiredValidator {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(()),
            _ => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("{} is required", field.label()));
                Err(ValidationError::required(field, message))
            }
        }
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        self.message
            .as_ref()
            .map(|msg| serde_json::json!({ "message": msg }))
    }
}
