//! Sky366Trade Client Library
//!
//! Core library for the Sky366Trade command-line client: typed access to
//! the platform backend, session management, the referral tier evaluator,
//! and the task and payment flows.
//!
//! # Architecture Overview
//!
//! The library is organized using Clean Architecture principles:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │            Command dispatch • Health checks                 │
//! └─────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Services Layer                          │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐            │
//! │  │ Account │ │Referral │ │  Tasks  │ │ Payment │            │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘            │
//! │                  API client (one request wrapper)           │
//! └─────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                       │
//! │        Session storage • Telemetry • Metrics                │
//! └─────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Core Layer                             │
//! │   Errors • Types • Tier evaluator • Domain rules            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All business state lives in the backend; the client holds only the
//! session token and per-invocation copies of server data. The one pure
//! algorithm is the tier eligibility evaluator in [`core::tier`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use sky366_client::{
//!     Application,
//!     config::{AppConfig, ConfigLoader},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::new().load().await?;
//!     let app = Application::build(config).await?;
//!     // dispatch a parsed CLI command via app.execute(...)
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Core modules - Domain layer containing business entities and rules
pub mod core;

// Application layer - Command dispatch and health checks
pub mod application;

// Configuration management - Multi-source configuration loading
pub mod config;

// Infrastructure layer - Session storage and observability
pub mod infrastructure;

// Services layer - Backend integration and business flows
pub mod services;

// Utilities - Shared helper functions and CLI parsing
pub mod utils;

// Re-export commonly used types for convenience
pub use application::Application;
pub use config::{AppConfig, ConfigLoader};
pub use core::{
    error::{AppError, AppResult},
    tier::{Tier, TierStanding, TierTable},
    types::*,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
