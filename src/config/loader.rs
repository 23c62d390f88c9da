//! Configuration loader with multi-source support
//!
//! This module provides a flexible configuration loader that can load and
//! merge configuration from multiple sources: a TOML file, `SKY366_*`
//! environment variables, and command-line arguments.

use anyhow::{Context, Result};
use config::{Config, Environment};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::models::AppConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::utils::CliArgs;

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "SKY366";

/// Configuration loader with support for multiple sources
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Base configuration path
    config_path: Option<PathBuf>,

    /// CLI arguments
    cli_args: Option<CliArgs>,

    /// Enable environment variable loading
    enable_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_path: None,
            cli_args: None,
            enable_env: true,
        }
    }

    /// Set the base configuration path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set CLI arguments
    pub fn with_cli_args(mut self, args: CliArgs) -> Self {
        self.cli_args = Some(args);
        self
    }

    /// Disable environment variable loading
    pub fn without_env(mut self) -> Self {
        self.enable_env = false;
        self
    }

    /// Load and build the complete application configuration
    pub async fn load(self) -> AppResult<AppConfig> {
        info!("🔧 Starting configuration loading process");

        // Pick up a local .env file when present
        dotenvy::dotenv().ok();

        // Step 1: Load base configuration from TOML
        let mut config = self
            .load_base_config()
            .await
            .context("Failed to load base configuration")?;

        // Step 2: Apply environment variable overrides
        if self.enable_env {
            self.apply_environment_overrides(&mut config)
                .context("Failed to apply environment overrides")?;
        }

        // Step 3: Apply CLI argument overrides
        if let Some(ref cli_args) = self.cli_args {
            Self::apply_cli_overrides(&mut config, cli_args);
        }

        info!("✅ Configuration loading completed successfully");
        debug!(
            "📊 Final configuration: environment={}, base_url={}",
            config.environment.name, config.api.base_url
        );

        Ok(config)
    }

    /// Load base configuration from a TOML file, or fall back to defaults
    /// when only a base URL is supplied through the environment
    async fn load_base_config(&self) -> Result<AppConfig> {
        let config_path = self.resolve_config_path();

        if let Some(path) = config_path {
            info!("📄 Loading base configuration from: {}", path.display());

            let config_content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            let config: AppConfig = toml::from_str(&config_content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;

            debug!("✅ Base configuration loaded successfully");
            return Ok(config);
        }

        // No file found; a base URL from the environment is enough to start.
        if let Ok(base_url) = env::var(format!("{ENV_PREFIX}_API_BASE_URL")) {
            warn!("⚠️  No configuration file found, using defaults with env base URL");
            return Ok(AppConfig::with_base_url(base_url));
        }

        Err(AppError::config(
            "No configuration found: provide a config file or set SKY366_API_BASE_URL",
        )
        .into())
    }

    /// Resolve the configuration file path
    fn resolve_config_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.config_path {
            return Some(path.clone());
        }

        if let Some(ref cli_args) = self.cli_args {
            if let Some(ref path) = cli_args.config_path {
                return Some(PathBuf::from(path));
            }
        }

        if let Ok(path) = env::var(format!("{ENV_PREFIX}_CONFIG_PATH")) {
            return Some(PathBuf::from(path));
        }

        // Default paths to check
        let default_paths = [
            "configs/sky366.toml",
            "sky366.toml",
            "./sky366.toml",
            "/etc/sky366/config.toml",
        ];

        for path in &default_paths {
            let pb = PathBuf::from(path);
            if pb.exists() {
                debug!("📍 Found config file at: {}", pb.display());
                return Some(pb);
            }
        }

        None
    }

    /// Apply environment variable overrides
    ///
    /// Variables follow the `SKY366_SECTION__FIELD` convention, e.g.
    /// `SKY366_API__BASE_URL` or `SKY366_ENVIRONMENT__LOG_LEVEL`.
    fn apply_environment_overrides(&self, config: &mut AppConfig) -> Result<()> {
        debug!("🌍 Applying environment variable overrides");

        let env_source = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .ignore_empty(true),
            )
            .build()
            .context("Failed to build environment configuration")?;

        if let Ok(base_url) = env_source.get_string("api.base_url") {
            config.api.base_url = base_url;
        }
        if let Ok(timeout) = env_source.get_int("api.request_timeout_ms") {
            config.api.request_timeout_ms = timeout as u64;
        }
        if let Ok(retries) = env_source.get_int("api.max_retries") {
            config.api.max_retries = retries as u32;
        }
        if let Ok(level) = env_source.get_string("environment.log_level") {
            config.environment.log_level = level;
        }
        if let Ok(format) = env_source.get_string("environment.log_format") {
            config.environment.log_format = format;
        }
        if let Ok(name) = env_source.get_string("environment.name") {
            config.environment.name = name;
        }
        if let Ok(path) = env_source.get_string("session.store_path") {
            config.session.store_path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Apply CLI argument overrides
    fn apply_cli_overrides(config: &mut AppConfig, cli_args: &CliArgs) {
        debug!("⌨️  Applying CLI argument overrides");

        if let Some(ref base_url) = cli_args.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(ref environment) = cli_args.environment {
            config.environment.name = environment.clone();
        }
        config.environment.log_level = cli_args.log_level.clone();
        config.environment.log_format = cli_args.log_format.clone();
    }
}

/// Load configuration with default sources
pub async fn load_config() -> AppResult<AppConfig> {
    ConfigLoader::new().load().await
}

/// Load configuration merged with CLI arguments
pub async fn load_config_with_args(args: CliArgs) -> AppResult<AppConfig> {
    ConfigLoader::new().with_cli_args(args).load().await
}

/// Load configuration from an explicit file path
pub async fn load_config_from_path<P: AsRef<Path>>(path: P) -> AppResult<AppConfig> {
    ConfigLoader::new().with_config_path(path).load().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [api]
            base_url = "https://backend.example"

            [environment]
            log_level = "debug"
            "#
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_config_path(file.path())
            .without_env()
            .load()
            .await
            .unwrap();

        assert_eq!(config.api.base_url, "https://backend.example");
        assert_eq!(config.environment.log_level, "debug");
        // Untouched sections come from defaults
        assert_eq!(config.referral.tiers.len(), 6);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml at all [[[").unwrap();

        let result = ConfigLoader::new()
            .with_config_path(file.path())
            .without_env()
            .load()
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_cli_overrides_take_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [api]
            base_url = "https://backend.example"
            "#
        )
        .unwrap();

        let args = CliArgs {
            config_path: None,
            base_url: Some("https://other.example".to_string()),
            log_level: "warn".to_string(),
            log_format: "json".to_string(),
            environment: Some("staging".to_string()),
            command: None,
        };

        let config = ConfigLoader::new()
            .with_config_path(file.path())
            .with_cli_args(args)
            .without_env()
            .load()
            .await
            .unwrap();

        assert_eq!(config.api.base_url, "https://other.example");
        assert_eq!(config.environment.log_level, "warn");
        assert_eq!(config.environment.name, "staging");
    }
}
