//! Expiry rules: `MM / YY` shape, then not already elapsed

use crate::card::{expiry_parts, is_valid_expiry_in, parse_expiry, DEFAULT_CENTURY};
use crate::clock::Clock;
use crate::error::{ValidationError, ValidationResult};
use crate::field::FieldName;
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

/// Value parses as `MM / YY` with a real month and a two-digit year
#[derive(Debug, Clone)]
pub struct ExpiryFormatValidator {
    century: i32,
}

impl ExpiryFormatValidator {
    pub fn new(century: i32) -> Self {
        Self { century }
    }
}

impl Default for ExpiryFormatValidator {
    fn default() -> Self {
        Self::new(DEFAULT_CENTURY)
    }
}

impl ValidationRule for ExpiryFormatValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        match value {
            Some(v) if parse_expiry(v, self.century).is_none() => Err(ValidationError::format(
                field,
                format!("{} must be in MM / YY format", field.label()),
                "invalid_expiry_format",
            )),
            _ => Ok(()),
        }
    }

    fn rule_name(&self) -> &'static str {
        "expiry_format"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "century": self.century }))
    }
}

/// Expiry month is the current month or later
#[derive(Clone)]
pub struct NotExpiredValidator {
    century: i32,
    clock: Arc<dyn Clock>,
}

impl NotExpiredValidator {
    pub fn new(century: i32, clock: Arc<dyn Clock>) -> Self {
        Self { century, clock }
    }
}

impl std::fmt::Debug for NotExpiredValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotExpiredValidator")
            .field("century", &self.century)
            .field("current_month", &self.clock.current_month())
            .finish()
    }
}

impl ValidationRule for NotExpiredValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        // Unparseable values are the format rule's concern
        let Some((month, yy)) = value.and_then(expiry_parts) else {
            return Ok(());
        };

        if !is_valid_expiry_in(month, yy, self.century, self.clock.current_month()) {
            return Err(ValidationError::domain(
                field,
                "Card has expired",
                "card_expired",
            ));
        }
        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "not_expired"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::YearMonth;
    use crate::clock::FixedClock;
    use crate::error::ErrorKind;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(YearMonth::new(2025, 6).unwrap()))
    }

    #[test]
    fn test_expiry_format() {
        let validator = ExpiryFormatValidator::default();
        assert!(validator.validate(Some("12 / 29"), FieldName::CardExpire).is_ok());
        assert!(validator.validate(None, FieldName::CardExpire).is_ok());

        let err = validator
            .validate(Some("12 / 2"), FieldName::CardExpire)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Format);
        assert_eq!(err.message, "Expiration date must be in MM / YY format");

        assert!(validator.validate(Some("13 / 29"), FieldName::CardExpire).is_err());
    }

    #[test]
    fn test_not_expired() {
        let validator = NotExpiredValidator::new(DEFAULT_CENTURY, clock());
        assert!(validator.validate(Some("06 / 25"), FieldName::CardExpire).is_ok());
        assert!(validator.validate(Some("12 / 29"), FieldName::CardExpire).is_ok());

        let err = validator
            .validate(Some("05 / 25"), FieldName::CardExpire)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Domain);
        assert_eq!(err.code, "card_expired");
    }

    #[test]
    fn test_not_expired_follows_century() {
        let validator = NotExpiredValidator::new(1900, clock());
        let err = validator
            .validate(Some("12 / 99"), FieldName::CardExpire)
            .unwrap_err();
        assert_eq!(err.code, "card_expired");
    }

    #[test]
    fn test_not_expired_ignores_malformed() {
        let validator = NotExpiredValidator::new(DEFAULT_CENTURY, clock());
        assert!(validator.validate(Some("1"), FieldName::CardExpire).is_ok());
    }
}
