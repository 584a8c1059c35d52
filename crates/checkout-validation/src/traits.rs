//! Core validation traits

use crate::error::ValidationResult;
use crate::field::FieldName;
use serde_json::Value;

/// A single rule in a field's rule chain.
///
/// Rules are pure: the same `(value, field)` always yields the same result.
/// `value` is `None` when the field is untouched; every rule except
/// `required` treats that as "nothing to check".
pub trait ValidationRule: Send + Sync {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}
