//! Checkout configuration
//!
//! Values come from `CHECKOUT_*` environment variables with built-in
//! defaults, and are checked by [`CheckoutConfig::validate`] before use.

use crate::card::DEFAULT_CENTURY;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

const CENTURY_VAR: &str = "CHECKOUT_EXPIRY_CENTURY";
const SUBMIT_TEXT_VAR: &str = "CHECKOUT_SUBMIT_TEXT";
const ERROR_SEPARATOR_VAR: &str = "CHECKOUT_ERROR_SEPARATOR";

const DEFAULT_SUBMIT_TEXT: &str = "Pay";
const DEFAULT_ERROR_SEPARATOR: &str = ", ";

const MIN_CENTURY: i32 = 100;
const MAX_CENTURY: i32 = 9900;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

impl ConfigError {
    pub fn validation_failed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Where a configuration value was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    EnvVar(String),
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Added to two-digit expiry years
    pub century: i32,
    /// Label handed through to the submit button
    pub submit_text: String,
    /// Joins a field's error messages for display
    pub error_separator: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            century: DEFAULT_CENTURY,
            submit_text: DEFAULT_SUBMIT_TEXT.to_string(),
            error_separator: DEFAULT_ERROR_SEPARATOR.to_string(),
        }
    }
}

impl CheckoutConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let century_raw = get_env_or_default(CENTURY_VAR, &DEFAULT_CENTURY.to_string());
        let century = century_raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "century".to_string(),
                value: century_raw.clone(),
                expected: "a year such as 2000".to_string(),
            })?;

        let config = Self {
            century,
            submit_text: get_env_or_default(SUBMIT_TEXT_VAR, DEFAULT_SUBMIT_TEXT),
            error_separator: get_env_or_default(ERROR_SEPARATOR_VAR, DEFAULT_ERROR_SEPARATOR),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CENTURY..=MAX_CENTURY).contains(&self.century) || self.century % 100 != 0 {
            return Err(ConfigError::validation_failed(
                "century",
                "must be a multiple of 100 between 100 and 9900",
            ));
        }

        if self.submit_text.trim().is_empty() {
            return Err(ConfigError::validation_failed(
                "submit_text",
                "must not be empty",
            ));
        }

        Ok(())
    }

    pub fn config_sources(&self) -> HashMap<String, ConfigSource> {
        [
            ("century", CENTURY_VAR),
            ("submit_text", SUBMIT_TEXT_VAR),
            ("error_separator", ERROR_SEPARATOR_VAR),
        ]
        .into_iter()
        .map(|(field, var)| {
            let source = if env::var(var).is_ok() {
                ConfigSource::EnvVar(var.to_string())
            } else {
                ConfigSource::Default
            };
            (field.to_string(), source)
        })
        .collect()
    }

    pub fn with_submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = text.into();
        self
    }

    pub fn with_error_separator(mut self, separator: impl Into<String>) -> Self {
        self.error_separator = separator.into();
        self
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
