//! Whole-form validation

use crate::card::YearMonth;
use crate::clock::{Clock, SystemClock};
use crate::config::CheckoutConfig;
use crate::error::{FieldErrors, ValidationError};
use crate::field::{FieldName, FormSnapshot};
use crate::rules::{Rules, RulesBuilder};
use serde::Serialize;
use std::sync::Arc;

/// Result of validating one snapshot. Holds nothing beyond what the
/// snapshot and the rules determine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationState {
    /// Revision of the snapshot this state was computed from
    pub revision: u64,
    pub errors: FieldErrors,
    pub is_invalid: bool,
}

impl ValidationState {
    pub fn is_valid(&self) -> bool {
        !self.is_invalid
    }

    pub fn errors_for(&self, field: FieldName) -> &[ValidationError] {
        self.errors.get_field_errors(field)
    }

    pub fn joined(&self, field: FieldName, separator: &str) -> String {
        self.errors.joined(field, separator)
    }
}

/// Runs the rule table over every field of a snapshot
#[derive(Clone)]
pub struct ValidationEngine {
    rules: Rules,
    /// Clock read by time-dependent rules, if any
    clock: Option<Arc<dyn Clock>>,
}

impl ValidationEngine {
    pub fn new(rules: Rules) -> Self {
        Self { rules, clock: None }
    }

    /// Declare the clock `rules` read, so results are only reused within
    /// one calendar month
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Checkout table against the local wall clock
    pub fn checkout(config: &CheckoutConfig) -> Self {
        Self::checkout_with_clock(config, Arc::new(SystemClock))
    }

    pub fn checkout_with_clock(config: &CheckoutConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(RulesBuilder::checkout(config, Arc::clone(&clock))).with_clock(clock)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Current month of the declared clock; `None` for clock-free rules
    pub fn current_month(&self) -> Option<YearMonth> {
        self.clock.as_ref().map(|clock| clock.current_month())
    }

    /// Validate every field; never short-circuits across fields
    pub fn validate(&self, snapshot: &FormSnapshot) -> ValidationState {
        let mut errors = FieldErrors::new();
        let mut missing_required = false;

        for (field, value) in snapshot.iter() {
            errors.extend(field, self.rules.validate_field(field, value));
            missing_required |= value.is_none() && self.rules.is_required(field);
        }

        let is_invalid = missing_required || !errors.is_empty();
        ValidationState {
            revision: snapshot.revision(),
            errors,
            is_invalid,
        }
    }
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("rules", &self.rules)
            .field("current_month", &self.current_month())
            .finish()
    }
}
