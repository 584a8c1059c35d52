//! Structured logging setup
//!
//! The core logs under the `checkout::*` targets (`checkout::store`,
//! `checkout::sync`, `checkout::form`). Card numbers are only ever logged
//! masked, and CVVs never.

use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    /// Enable JSON structured logging (vs plain text)
    pub json_format: bool,
    /// Enable pretty printing for development
    pub pretty_print: bool,
    /// Environment filter (supports filters like "checkout=debug")
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            pretty_print: false,
            env_filter: Some("checkout=info".to_string()),
        }
    }

    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            pretty_print: true,
            env_filter: Some("checkout=trace".to_string()),
        }
    }

    /// Minimal output for test runs
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            json_format: false,
            pretty_print: false,
            env_filter: Some("checkout=error".to_string()),
        }
    }

    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Directive used when `RUST_LOG` is not set
    pub fn directive(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.directive()))?;

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).json())
            .try_init()?;
    } else if config.pretty_print {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).pretty())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout))
            .try_init()?;
    }

    tracing::info!(
        target: "checkout::logging",
        level = %config.level,
        format = if config.json_format { "json" } else { "text" },
        "logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(LoggingConfig::production().json_format);
        assert_eq!(LoggingConfig::development().directive(), "checkout=trace");
        assert_eq!(LoggingConfig::default().directive(), "info");
        assert_eq!(
            LoggingConfig::test().with_env_filter("checkout::form=warn").directive(),
            "checkout::form=warn"
        );
    }

    #[test]
    fn test_second_init_fails() {
        // The first call may already lose to another test in this binary
        let _ = init_logging(LoggingConfig::test());
        assert!(init_logging(LoggingConfig::test()).is_err());
    }
}
