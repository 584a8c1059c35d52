//! Card rules: number checksum, accepted brand and CVV shape

use crate::card::{self, CardBrand, CVV_LENGTH, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::error::{ValidationError, ValidationResult};
use crate::field::FieldName;
use crate::traits::ValidationRule;
use serde_json::Value;

/// Separators allowed, length within bounds, Luhn checksum passes
#[derive(Debug, Clone, Default)]
pub struct CardNumberValidator;

impl CardNumberValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ValidationRule for CardNumberValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        let Some(number) = value else {
            return Ok(());
        };

        let Some(digits) = card::card_digits(number) else {
            return Err(ValidationError::format(
                field,
                format!("{} may only contain digits", field.label()),
                "invalid_characters",
            ));
        };

        if digits.len() < MIN_CARD_DIGITS {
            return Err(ValidationError::format(
                field,
                format!("{} is incomplete", field.label()),
                "incomplete_card_number",
            ));
        }

        if digits.len() > MAX_CARD_DIGITS {
            return Err(ValidationError::format(
                field,
                format!("{} is too long", field.label()),
                "card_number_too_long",
            ));
        }

        if !card::luhn_valid(&digits) {
            return Err(ValidationError::domain(
                field,
                format!("{} is invalid", field.label()),
                "invalid_checksum",
            ));
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "card_number"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "min_digits": MIN_CARD_DIGITS,
            "max_digits": MAX_CARD_DIGITS,
        }))
    }
}

/// Rejects card numbers whose brand is not in the accepted list
#[derive(Debug, Clone)]
pub struct CardBrandValidator {
    accepted: Vec<CardBrand>,
}

impl CardBrandValidator {
    pub fn new(accepted: Vec<CardBrand>) -> Self {
        Self { accepted }
    }

    pub fn accepted(&self) -> &[CardBrand] {
        &self.accepted
    }
}

impl Default for CardBrandValidator {
    fn default() -> Self {
        Self::new(vec![CardBrand::Visa, CardBrand::Mastercard])
    }
}

impl ValidationRule for CardBrandValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        let Some(number) = value else {
            return Ok(());
        };

        if self.accepted.contains(&card::card_brand(number)) {
            return Ok(());
        }

        let names: Vec<&str> = self.accepted.iter().map(CardBrand::name).collect();
        Err(ValidationError::domain(
            field,
            format!("Only {} cards are accepted", names.join(" and ")),
            "unsupported_brand",
        ))
    }

    fn rule_name(&self) -> &'static str {
        "card_brand"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "accepted": self.accepted }))
    }
}

/// Exactly [`CVV_LENGTH`] ASCII digits
#[derive(Debug, Clone, Default)]
pub struct CvvValidator;

impl CvvValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ValidationRule for CvvValidator {
    fn validate(&self, value: Option<&str>, field: FieldName) -> ValidationResult<()> {
        match value {
            Some(cvv) if !card::is_valid_cvv(cvv) => Err(ValidationError::format(
                field,
                format!("{} must be exactly {} digits", field.label(), CVV_LENGTH),
                "invalid_cvv",
            )),
            _ => Ok(()),
        }
    }

    fn rule_name(&self) -> &'static str {
        "cvv"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "length": CVV_LENGTH }))
    }
}
