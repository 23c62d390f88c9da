//! Configuration data structures and models
//!
//! This module defines the complete configuration structure for the
//! Sky366Trade client, including all subsystem configurations, default
//! values, and serialization logic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::tier::{Tier, DEFAULT_TIERS};

/// Main application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Referral program configuration
    #[serde(default)]
    pub referral: ReferralConfig,

    /// Task flow configuration
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Payment flow configuration
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Monitoring configuration
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

/// Environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Environment name (development, staging, production)
    #[serde(default = "default_environment_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (json, pretty, compact)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable debug mode
    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: default_environment_name(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            debug_mode: false,
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_ms: u64,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff in milliseconds
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

/// Session persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the session file; resolved against the home directory
    /// when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

/// Referral program configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralConfig {
    /// Ordered tier table; the built-in program table when unset
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,

    /// Downline depth tracked by the program
    #[serde(default = "default_team_depth")]
    pub team_depth: u8,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            team_depth: default_team_depth(),
        }
    }
}

/// Task flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Minimum wallet balance required before task interaction is allowed
    #[serde(default = "default_min_wallet_to_interact")]
    pub min_wallet_to_interact: Decimal,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            min_wallet_to_interact: default_min_wallet_to_interact(),
        }
    }
}

/// Payment flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Minimum deposit amount
    #[serde(default = "default_min_deposit")]
    pub min_deposit: Decimal,

    /// Maximum deposit amount
    #[serde(default = "default_max_deposit")]
    pub max_deposit: Decimal,

    /// Minimum withdrawal amount
    #[serde(default = "default_min_withdrawal")]
    pub min_withdrawal: Decimal,

    /// Pay currency requested for crypto invoices
    #[serde(default = "default_pay_currency")]
    pub pay_currency: String,

    /// Initial interval between status polls in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Upper bound for the backed-off poll interval in milliseconds
    #[serde(default = "default_poll_max_interval")]
    pub poll_max_interval_ms: u64,

    /// Hard timeout for the status poll in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            min_deposit: default_min_deposit(),
            max_deposit: default_max_deposit(),
            min_withdrawal: default_min_withdrawal(),
            pay_currency: default_pay_currency(),
            poll_interval_ms: default_poll_interval(),
            poll_max_interval_ms: default_poll_max_interval(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Enable backend reachability checks on startup
    #[serde(default = "default_true")]
    pub enable_health_checks: bool,

    /// Health probe timeout in milliseconds
    #[serde(default = "default_health_timeout")]
    pub health_timeout_ms: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable_health_checks: default_true(),
            health_timeout_ms: default_health_timeout(),
        }
    }
}

// Default value functions
fn default_environment_name() -> String {
    "development".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_request_timeout() -> u64 {
    30000
}
fn default_connection_timeout() -> u64 {
    10000
}
fn default_max_retries() -> u32 {
    3
}
fn default_retry_backoff() -> u64 {
    1000
}
fn default_tiers() -> Vec<Tier> {
    DEFAULT_TIERS.clone()
}
fn default_team_depth() -> u8 {
    crate::core::domain::referral::MAX_TEAM_DEPTH
}
fn default_min_wallet_to_interact() -> Decimal {
    crate::core::domain::tasks::MIN_WALLET_TO_INTERACT
}
fn default_min_deposit() -> Decimal {
    crate::core::domain::payment::MIN_DEPOSIT
}
fn default_max_deposit() -> Decimal {
    crate::core::domain::payment::MAX_DEPOSIT
}
fn default_min_withdrawal() -> Decimal {
    crate::core::domain::payment::MIN_WITHDRAWAL
}
fn default_pay_currency() -> String {
    "usdttrc20".to_string()
}
fn default_poll_interval() -> u64 {
    crate::core::domain::payment::DEFAULT_POLL_INTERVAL.as_millis() as u64
}
fn default_poll_max_interval() -> u64 {
    crate::core::domain::payment::DEFAULT_POLL_MAX_INTERVAL.as_millis() as u64
}
fn default_poll_timeout() -> u64 {
    crate::core::domain::payment::DEFAULT_POLL_TIMEOUT.as_secs()
}
fn default_health_timeout() -> u64 {
    5000
}
fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Build a configuration with defaults for the given backend URL
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            api: ApiConfig {
                base_url: base_url.into(),
                request_timeout_ms: default_request_timeout(),
                connection_timeout_ms: default_connection_timeout(),
                max_retries: default_max_retries(),
                retry_backoff_ms: default_retry_backoff(),
            },
            session: SessionConfig::default(),
            referral: ReferralConfig::default(),
            tasks: TasksConfig::default(),
            payment: PaymentConfig::default(),
            monitoring: MonitoringConfig::default(),
        }
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.name == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.name == "production"
    }

    /// Get the current environment name
    pub fn environment(&self) -> &str {
        &self.environment.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::with_base_url("https://api.sky366trade.example");

        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.api.max_retries, 3);
        assert_eq!(config.referral.team_depth, 6);
        assert_eq!(config.referral.tiers.len(), 6);
        assert_eq!(config.tasks.min_wallet_to_interact, dec!(50));
        assert!(config.payment.poll_max_interval_ms > config.payment.poll_interval_ms);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::with_base_url("https://api.sky366trade.example");
        let rendered = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.referral.tiers.len(), config.referral.tiers.len());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_src = r#"
            [api]
            base_url = "https://backend.example"
        "#;
        let parsed: AppConfig = toml::from_str(toml_src).unwrap();

        assert_eq!(parsed.api.base_url, "https://backend.example");
        assert_eq!(parsed.api.request_timeout_ms, 30000);
        assert_eq!(parsed.environment.log_level, "info");
        assert_eq!(parsed.referral.tiers.len(), 6);
    }
}
