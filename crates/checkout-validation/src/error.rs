//! Validation and submission error types

use crate::field::FieldName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Error taxonomy shared by every rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Value absent or blank
    Required,
    /// Value present but structurally malformed
    Format,
    /// Structurally valid but rejected by a card-domain rule
    Domain,
}

/// A single rule failure for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: FieldName,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(
        field: FieldName,
        message: impl Into<String>,
        code: impl Into<String>,
        kind: ErrorKind,
    ) -> Self {
        Self {
            field,
            message: message.into(),
            code: code.into(),
            kind,
        }
    }

    pub fn required(field: FieldName, message: impl Into<String>) -> Self {
        Self::new(field, message, "required", ErrorKind::Required)
    }

    pub fn format(field: FieldName, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(field, message, code, ErrorKind::Format)
    }

    pub fn domain(field: FieldName, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(field, message, code, ErrorKind::Domain)
    }

    /// Replace the message, keeping code and kind
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ordered error lists for every checkout field.
///
/// Every [`FieldName`] has an entry, possibly empty. Within a field, errors
/// keep the order in which the rules produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct FieldErrors {
    errors: BTreeMap<FieldName, Vec<ValidationError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self {
            errors: FieldName::ALL.into_iter().map(|f| (f, Vec::new())).collect(),
        }
    }

    /// Append an error under its own field
    pub fn add(&mut self, error: ValidationError) {
        self.errors.entry(error.field).or_default().push(error);
    }

    pub fn extend(&mut self, field: FieldName, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.entry(field).or_default().extend(errors);
    }

    /// True when no field has any error
    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Number of fields with at least one error
    pub fn invalid_field_count(&self) -> usize {
        self.errors.values().filter(|v| !v.is_empty()).count()
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn get_field_errors(&self, field: FieldName) -> &[ValidationError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_field_errors(&self, field: FieldName) -> bool {
        !self.get_field_errors(field).is_empty()
    }

    pub fn messages(&self, field: FieldName) -> Vec<&str> {
        self.get_field_errors(field)
            .iter()
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Messages for `field` joined for display; empty when the field is clean
    pub fn joined(&self, field: FieldName, separator: &str) -> String {
        self.messages(field).join(separator)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &[ValidationError])> + '_ {
        self.errors.iter().map(|(field, errors)| (*field, errors.as_slice()))
    }

    /// JSON envelope for handing the error set to a rendering layer
    pub fn to_json(&self) -> serde_json::Value {
        let fields: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(field, errors)| {
                (
                    field.as_str().to_string(),
                    serde_json::json!(errors.iter().map(|e| &e.message).collect::<Vec<_>>()),
                )
            })
            .collect();

        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": fields
            }
        })
    }
}

impl Default for FieldErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No validation errors");
        }
        write!(f, "Validation failed for {} field(s):", self.invalid_field_count())?;
        for (field, errors) in self.iter() {
            for error in errors {
                write!(f, "\n  {}: {}", field, error.message)?;
            }
        }
        Ok(())
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

/// Reasons a submit attempt is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("form is invalid: {} field(s) have errors", .errors.invalid_field_count())]
    Invalid { errors: FieldErrors },

    #[error("a submission is already in progress")]
    Loading,

    #[error("{field} is missing from the submitted snapshot")]
    Incomplete { field: FieldName },
}
