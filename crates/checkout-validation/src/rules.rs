//! Per-field rule tables and the checkout preset

use crate::card::CardBrand;
use crate::clock::Clock;
use crate::config::CheckoutConfig;
use crate::error::ValidationError;
use crate::field::FieldName;
use crate::traits::ValidationRule;
use crate::validators::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One row of a field's rule chain
#[derive(Clone)]
pub struct RuleEntry {
    rule: Arc<dyn ValidationRule>,
    /// Stop evaluating this field's chain when this rule fails
    bail: bool,
}

impl RuleEntry {
    pub fn rule(&self) -> &dyn ValidationRule {
        self.rule.as_ref()
    }

    pub fn bails(&self) -> bool {
        self.bail
    }
}

/// Ordered rule chains keyed by field.
///
/// Rules for a field run in insertion order and every failure is collected,
/// except that a failing entry marked `bail` ends that field's chain. Other
/// fields are unaffected.
#[derive(Clone, Default)]
pub struct Rules {
    field_rules: BTreeMap<FieldName, Vec<RuleEntry>>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (field, entries) in &self.field_rules {
            let names: Vec<String> = entries
                .iter()
                .map(|e| {
                    if e.bail {
                        format!("{}!", e.rule.rule_name())
                    } else {
                        e.rule.rule_name().to_string()
                    }
                })
                .collect();
            map.entry(field, &names);
        }
        map.finish()
    }
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule whose failure lets later rules still run
    pub fn field<R>(self, field: FieldName, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.push(field, Arc::new(rule), false)
    }

    /// Append a rule whose failure skips the rest of the field's chain
    pub fn field_bail<R>(self, field: FieldName, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.push(field, Arc::new(rule), true)
    }

    fn push(mut self, field: FieldName, rule: Arc<dyn ValidationRule>, bail: bool) -> Self {
        self.field_rules
            .entry(field)
            .or_default()
            .push(RuleEntry { rule, bail });
        self
    }

    pub fn get_field_rules(&self, field: FieldName) -> &[RuleEntry] {
        self.field_rules
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rule_names(&self, field: FieldName) -> Vec<&'static str> {
        self.get_field_rules(field)
            .iter()
            .map(|e| e.rule.rule_name())
            .collect()
    }

    /// Whether the field's chain contains a `required` rule
    pub fn is_required(&self, field: FieldName) -> bool {
        self.get_field_rules(field)
            .iter()
            .any(|e| e.rule.rule_name() == "required")
    }

    pub fn is_empty(&self) -> bool {
        self.field_rules.values().all(Vec::is_empty)
    }

    /// Run one field's chain, returning failures in rule order
    pub fn validate_field(&self, field: FieldName, value: Option<&str>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for entry in self.get_field_rules(field) {
            if let Err(error) = entry.rule.validate(value, field) {
                errors.push(error);
                if entry.bail {
                    break;
                }
            }
        }
        errors
    }
}

/// Builder for the common checkout rule chains
pub struct RulesBuilder {
    rules: Rules,
}

impl RulesBuilder {
    pub fn new() -> Self {
        Self {
            rules: Rules::new(),
        }
    }

    /// required → email shape
    pub fn required_email(mut self, field: FieldName) -> Self {
        self.rules = self
            .rules
            .field_bail(field, RequiredValidator::new())
            .field(field, EmailValidator::new());
        self
    }

    /// required → length/charset/Luhn → accepted brand
    pub fn required_card_number(mut self, field: FieldName, accepted: Vec<CardBrand>) -> Self {
        self.rules = self
            .rules
            .field_bail(field, RequiredValidator::new())
            .field_bail(field, CardNumberValidator::new())
            .field(field, CardBrandValidator::new(accepted));
        self
    }

    /// required → `MM / YY` shape → not elapsed
    pub fn required_expiry(mut self, field: FieldName, century: i32, clock: Arc<dyn Clock>) -> Self {
        self.rules = self
            .rules
            .field_bail(field, RequiredValidator::new())
            .field_bail(field, ExpiryFormatValidator::new(century))
            .field(field, NotExpiredValidator::new(century, clock));
        self
    }

    /// required → exactly three digits
    pub fn required_cvv(mut self, field: FieldName) -> Self {
        self.rules = self
            .rules
            .field_bail(field, RequiredValidator::new())
            .field(field, CvvValidator::new());
        self
    }

    pub fn custom<R>(mut self, field: FieldName, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules = self.rules.field(field, rule);
        self
    }

    pub fn build(self) -> Rules {
        self.rules
    }

    /// The four-field checkout table
    pub fn checkout(config: &CheckoutConfig, clock: Arc<dyn Clock>) -> Rules {
        Self::new()
            .required_email(FieldName::Email)
            .required_card_number(
                FieldName::CardNumber,
                vec![CardBrand::Visa, CardBrand::Mastercard],
            )
            .required_expiry(FieldName::CardExpire, config.century, clock)
            .required_cvv(FieldName::Cvv)
            .build()
    }
}

impl Default for RulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
