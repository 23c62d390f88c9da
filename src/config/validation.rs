//! Configuration validation logic
//!
//! This module provides validation for all configuration values to ensure
//! they are within acceptable ranges and formats before the application
//! starts talking to the backend.

use tracing::{debug, warn};
use url::Url;

use super::models::AppConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::tier::TierTable;

/// Configuration validator
pub struct ConfigValidator {
    /// Strict validation mode (fails on warnings)
    strict_mode: bool,
}

/// Validation result with warnings and errors
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Fatal validation errors
    pub errors: Vec<String>,

    /// Non-fatal warnings
    pub warnings: Vec<String>,

    /// Validation passed
    pub is_valid: bool,
}

impl ConfigValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self { strict_mode: false }
    }

    /// Enable strict validation mode
    pub fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Validate the complete application configuration
    pub fn validate(&self, config: &AppConfig) -> AppResult<ValidationResult> {
        debug!("🔍 Starting configuration validation");

        let mut result = ValidationResult {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        };

        self.validate_environment(config, &mut result);
        self.validate_api(config, &mut result);
        self.validate_referral(config, &mut result);
        self.validate_payment(config, &mut result);

        result.is_valid =
            result.errors.is_empty() && (!self.strict_mode || result.warnings.is_empty());

        if result.is_valid {
            debug!("✅ Configuration validation passed");
        } else {
            warn!("❌ Configuration validation failed");
            for error in &result.errors {
                warn!("   Error: {}", error);
            }
            for warning in &result.warnings {
                warn!("   Warning: {}", warning);
            }
        }

        Ok(result)
    }

    fn validate_environment(&self, config: &AppConfig, result: &mut ValidationResult) {
        let env = &config.environment;

        if !matches!(env.name.as_str(), "development" | "staging" | "production") {
            result.warnings.push(format!(
                "Unrecognized environment name '{}', expected development/staging/production",
                env.name
            ));
        }

        if !matches!(
            env.log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            result
                .errors
                .push(format!("Invalid log level '{}'", env.log_level));
        }

        if !matches!(env.log_format.as_str(), "json" | "pretty" | "compact") {
            result
                .errors
                .push(format!("Invalid log format '{}'", env.log_format));
        }

        if env.debug_mode && env.name == "production" {
            result
                .warnings
                .push("Debug mode enabled in production environment".to_string());
        }
    }

    fn validate_api(&self, config: &AppConfig, result: &mut ValidationResult) {
        let api = &config.api;

        match Url::parse(&api.base_url) {
            Ok(url) => {
                if url.scheme() != "https" && !config.is_development() {
                    result.warnings.push(format!(
                        "Backend base URL uses '{}' outside development",
                        url.scheme()
                    ));
                }
            }
            Err(e) => {
                result
                    .errors
                    .push(format!("Invalid backend base URL '{}': {}", api.base_url, e));
            }
        }

        if api.request_timeout_ms == 0 {
            result
                .errors
                .push("Request timeout must be greater than zero".to_string());
        }

        if api.connection_timeout_ms == 0 {
            result
                .errors
                .push("Connection timeout must be greater than zero".to_string());
        }

        if api.max_retries > 10 {
            result.warnings.push(format!(
                "Retry budget of {} is unusually high",
                api.max_retries
            ));
        }
    }

    fn validate_referral(&self, config: &AppConfig, result: &mut ValidationResult) {
        if let Err(e) = TierTable::new(config.referral.tiers.clone()) {
            result.errors.push(format!("Invalid tier table: {e}"));
        }

        if config.referral.team_depth == 0 {
            result
                .errors
                .push("Team depth must be at least 1".to_string());
        }

        if config.referral.team_depth > crate::core::domain::referral::MAX_TEAM_DEPTH {
            result.errors.push(format!(
                "Team depth {} exceeds the {} levels tracked by the program",
                config.referral.team_depth,
                crate::core::domain::referral::MAX_TEAM_DEPTH
            ));
        }
    }

    fn validate_payment(&self, config: &AppConfig, result: &mut ValidationResult) {
        let payment = &config.payment;

        if payment.min_deposit >= payment.max_deposit {
            result.errors.push(format!(
                "Minimum deposit {} must be below maximum deposit {}",
                payment.min_deposit, payment.max_deposit
            ));
        }

        if payment.poll_interval_ms == 0 {
            result
                .errors
                .push("Payment poll interval must be greater than zero".to_string());
        }

        if payment.poll_max_interval_ms < payment.poll_interval_ms {
            result.errors.push(format!(
                "Maximum poll interval {}ms is below the initial interval {}ms",
                payment.poll_max_interval_ms, payment.poll_interval_ms
            ));
        }

        if payment.poll_timeout_secs * 1000 < payment.poll_interval_ms {
            result
                .errors
                .push("Poll timeout is shorter than a single poll interval".to_string());
        }

        if payment.pay_currency.is_empty() {
            result.errors.push("Pay currency must be set".to_string());
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Validate this configuration, returning the collected findings
    pub fn validate(&self) -> AppResult<ValidationResult> {
        ConfigValidator::new().validate(self)
    }

    /// Validate and reduce to a pass/fail error
    pub fn ensure_valid(&self) -> AppResult<()> {
        let result = self.validate()?;
        if result.is_valid {
            Ok(())
        } else {
            Err(AppError::config(format!(
                "Configuration validation failed: {}",
                result.errors.join("; ")
            )))
        }
    }
}
