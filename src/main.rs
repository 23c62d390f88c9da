//! Sky366Trade Client - Command Line Interface
//!
//! A typed command-line client for the Sky366Trade referral rewards
//! platform. Provides login and session management, profile and dashboard
//! views, the referral team and tier views, the task flow, and the deposit
//! and withdrawal flows.
//!
//! # Architecture
//!
//! The binary is a thin shell over the library crate:
//! - **Core**: domain types, errors, and the tier evaluator
//! - **Services**: typed backend access and business flows
//! - **Infrastructure**: session storage and observability
//! - **Application**: command dispatch

use anyhow::Result;
use clap::{CommandFactory, Parser};
use anyhow::Context;
use sky366_client::{
    application::Application,
    config::{CliArgs, ConfigLoader},
    core::error::AppError,
    infrastructure::monitoring::telemetry,
};
use std::process;
use tracing::{error, info};

/// Application entry point with error reporting and graceful exit codes
#[tokio::main]
async fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("Failed to install color-eyre: {e}");
        process::exit(1);
    }

    if let Err(e) = run().await {
        error!("Fatal application error: {:?}", e);

        // Prefer the category-specific message for our own error type.
        if let Some(app_error) = e.downcast_ref::<AppError>() {
            eprintln!("\n❌ {}", app_error.user_message());
        } else {
            eprintln!("\n❌ {e}");
        }

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("   Caused by: {err}");
            source = err.source();
        }

        process::exit(1);
    }
}

/// Main application execution logic
async fn run() -> Result<()> {
    let cli_args = CliArgs::parse();

    telemetry::init(&cli_args.log_level, &cli_args.log_format)
        .context("Failed to initialize telemetry system")?;

    let Some(command) = cli_args.command.clone() else {
        CliArgs::command().print_help()?;
        return Ok(());
    };

    let config = ConfigLoader::new()
        .with_cli_args(cli_args)
        .load()
        .await
        .context("Configuration loading failed")?;

    info!(
        "🎯 sky366 v{} ({} environment)",
        sky366_client::VERSION,
        config.environment()
    );

    let app = Application::build(config)
        .await
        .context("Application initialization failed")?;

    app.execute(command).await.map_err(Into::into)
}
