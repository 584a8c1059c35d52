//! Email format validator

use crate::error::{ValidationError, ValidationResult};
use crate::field::FieldName;
use crate::traits::ValidationRule;
use regex::Regex;
use serde_json::Value;

// ASCII-only, no leading/trailing dots in either part
const PATTERN_WITH_TLD: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$";
const PATTERN_WITHOUT_TLD: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?$";

/// RFC 5321 local-part limit
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 255;

/// Validator for email address shape
#[derive(Debug, Clone)]
pub struct EmailValidator {
    /// Custom error message
    pub message: Option<String>,
    /// Require top-level domain (e.g., .com, .org)
    pub require_tld: bool,
    pattern: Option<Regex>,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self {
            message: None,
            require_tld: true,
            pattern: Regex::new(PATTERN_WITH_TLD).ok(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn require_tld(mut self, require: bool) -> Self {
        self.require_tld = require;
        let pattern = if require {
            PATTERN_WITH_TLD
        } else {
            PATTERN_WITHOUT_TLD
        };
        self.pattern = Regex::new(pattern).ok();
        self
    }

    /// Use a custom regex instead of the built-in patterns
    pub fn custom_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    fn is_well_formed(&self, email: &str) -> bool {
        let (local, domain) = match email.split_once('@') {
            Some(parts) => parts,
            None => return false,
        };

        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        if local.len() > MAX_LOCAL_LEN || domain.len() > MAX_DOMAIN_LEN {
            return false;
        }

        // A missing pattern never accepts
        self.pattern
            .as_ref()
            .is_some_and(|regex| regex.is_match(email))
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for EmailValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        let Some(email) = value else {
            return Ok(());
        };

        if self.is_well_formed(email) {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} must be a valid email address", field.label()));
        Err(ValidationError::format(field, message, "invalid_email"))
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }
        params.insert("require_tld".to_string(), Value::Bool(self.require_tld));
        Some(Value::Object(params))
    }
}
