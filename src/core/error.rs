//! Application error types and error handling utilities
//!
//! This module defines the structured error system for the Sky366Trade client.
//! Every failure the client can observe is mapped into one of the categories
//! below so that callers can distinguish transient failures (retry with
//! backoff) from permanent ones (surface to the user, or evict the session).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main application error type that encompasses all possible errors
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the failure
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<AppError>>,
    },

    /// Authentication and session errors
    ///
    /// Raising this error signals that the stored bearer token is missing,
    /// rejected, or expired. The session is evicted and the user must log
    /// in again before retrying the operation.
    #[error("Authentication error: {message}")]
    Auth {
        /// Human-readable description of the failure
        message: String,
        /// Username the failed request was issued for, if known
        username: Option<String>,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<AppError>>,
    },

    /// Network and transport errors
    #[error("Network error: {message}")]
    Network {
        /// Human-readable description of the failure
        message: String,
        /// Endpoint path the request targeted, if known
        endpoint: Option<String>,
        /// Number of retries already performed for this operation
        retry_count: u32,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<AppError>>,
    },

    /// Backend API errors (non-auth HTTP failures and malformed responses)
    #[error("API error: {message}")]
    Api {
        /// Human-readable description of the failure
        message: String,
        /// Endpoint path the request targeted
        endpoint: String,
        /// HTTP status code returned by the backend, if the request completed
        status_code: Option<u16>,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<AppError>>,
    },

    /// Payment flow errors
    ///
    /// Reported when a deposit or withdrawal cannot complete: the gateway
    /// rejected the payment, the invoice expired, or the status poll ended
    /// in a failed state. These are user-actionable and never retried
    /// automatically.
    #[error("Payment error: {message}")]
    Payment {
        /// Human-readable description of the failure
        message: String,
        /// Gateway payment identifier, if one was issued
        payment_id: Option<String>,
        /// Client order identifier, if one was generated
        order_id: Option<String>,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<AppError>>,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the failure
        message: String,
        /// Field or argument that failed validation
        field: Option<String>,
        /// Offending value, if safe to echo back
        value: Option<String>,
    },

    /// Session storage errors (reading or writing the persisted session file)
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable description of the failure
        message: String,
        /// Path of the file involved, if known
        path: Option<String>,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<AppError>>,
    },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout {
        /// Human-readable description of the failure
        message: String,
        /// Name of the operation that timed out
        operation: String,
        /// Time budget that was exceeded, in milliseconds
        duration_ms: u64,
    },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable description of the failure
        message: String,
        /// Component where the error originated, if known
        component: Option<String>,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<AppError>>,
    },
}

/// Error severity levels for logging and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Low impact errors that don't affect core functionality
    Low,
    /// Medium impact errors that may affect some features
    Medium,
    /// High impact errors that affect core functionality
    High,
    /// Critical errors that require immediate attention
    Critical,
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Configuration and setup errors
    Configuration,
    /// Authentication and session errors
    Authentication,
    /// Network and communication errors
    Network,
    /// Backend API integration errors
    Integration,
    /// Payment flow errors
    Payment,
    /// Validation and input errors
    Validation,
    /// Local persistence errors
    Persistence,
    /// Performance and timeout errors
    Performance,
    /// System and infrastructure errors
    System,
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new authentication error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
            username: None,
            source: None,
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            endpoint: None,
            retry_count: 0,
            source: None,
        }
    }

    /// Create a new API error for the given endpoint
    pub fn api<S: Into<String>>(message: S, endpoint: S) -> Self {
        Self::Api {
            message: message.into(),
            endpoint: endpoint.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new API error carrying an HTTP status code
    pub fn api_status<S: Into<String>>(message: S, endpoint: S, status_code: u16) -> Self {
        Self::Api {
            message: message.into(),
            endpoint: endpoint.into(),
            status_code: Some(status_code),
            source: None,
        }
    }

    /// Create a new payment error
    pub fn payment<S: Into<String>>(message: S) -> Self {
        Self::Payment {
            message: message.into(),
            payment_id: None,
            order_id: None,
            source: None,
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            value: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field<S: Into<String>>(message: S, field: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
            value: None,
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S, operation: S, duration_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            component: None,
            source: None,
        }
    }

    /// Get the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } => ErrorKind::Configuration,
            Self::Auth { .. } => ErrorKind::Authentication,
            Self::Network { .. } => ErrorKind::Network,
            Self::Api { .. } => ErrorKind::Integration,
            Self::Payment { .. } => ErrorKind::Payment,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Storage { .. } => ErrorKind::Persistence,
            Self::Timeout { .. } => ErrorKind::Performance,
            Self::Internal { .. } => ErrorKind::System,
        }
    }

    /// Get the error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation { .. } => ErrorSeverity::Low,
            Self::Network { .. } | Self::Timeout { .. } | Self::Api { .. } => ErrorSeverity::Medium,
            Self::Auth { .. } | Self::Payment { .. } => ErrorSeverity::High,
            Self::Config { .. } | Self::Storage { .. } | Self::Internal { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Check if this error is retryable
    ///
    /// Auth, Validation, and Payment errors are never retryable: retrying
    /// without a new token, corrected input, or a fresh invoice would only
    /// repeat the same failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Api { status_code, .. } => {
                matches!(status_code, Some(code) if *code >= 500 || *code == 429)
            }
            _ => false,
        }
    }

    /// Get suggested retry delay in seconds
    pub fn retry_delay_seconds(&self) -> Option<u64> {
        match self {
            Self::Network { retry_count, .. } => {
                // Exponential backoff: 1s, 2s, 4s, 8s, ... capped at 60s
                Some(2_u64.pow(*retry_count).min(60))
            }
            Self::Timeout { .. } => Some(5),
            Self::Api {
                status_code: Some(code),
                ..
            } if *code >= 500 || *code == 429 => Some(10),
            _ => None,
        }
    }

    /// Check whether this error must terminate the current session
    pub fn evicts_session(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Add source error
    pub fn with_source(mut self, source: AppError) -> Self {
        match &mut self {
            Self::Config { source: s, .. }
            | Self::Auth { source: s, .. }
            | Self::Network { source: s, .. }
            | Self::Api { source: s, .. }
            | Self::Payment { source: s, .. }
            | Self::Storage { source: s, .. }
            | Self::Internal { source: s, .. } => {
                *s = Some(Box::new(source));
            }
            _ => {}
        }
        self
    }

    /// Short user-facing message for the failure category
    ///
    /// The backend reports every failure shape through one generic channel;
    /// these messages keep the user-visible categories distinct.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth { .. } => "Your session has expired. Please log in again.".to_string(),
            Self::Network { .. } | Self::Timeout { .. } => {
                "The server could not be reached. Check your connection and try again.".to_string()
            }
            Self::Validation { message, .. } => message.clone(),
            Self::Payment { message, .. } => format!("Payment could not be completed: {message}"),
            _ => "Something went wrong. Please try again later.".to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout(
                format!("HTTP request timed out: {err}"),
                "http_request".to_string(),
                0,
            );
        }
        let mut error = Self::network(format!("HTTP request error: {err}"));
        if let (Self::Network { endpoint, .. }, Some(url)) = (&mut error, err.url()) {
            *endpoint = Some(url.path().to_string());
        }
        error
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("JSON serialization error: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("IO error: {err}"))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        Self::config(format!("Invalid URL: {err}"))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::timeout("Operation timed out".to_string(), "unknown".to_string(), 0)
    }
}

/// Result type alias for the application
pub type AppResult<T> = std::result::Result<T, AppError>;
