//! Result type definitions and utilities for the application
//!
//! This module provides convenient result type aliases and utility functions
//! for working with results throughout the Sky366Trade client.

use crate::core::error::AppError;

/// Application result type alias
///
/// This is the primary result type used throughout the application.
/// It wraps the standard `Result<T, E>` with our custom `AppError` type.
///
/// # Examples
///
/// ```rust
/// use sky366_client::core::result::AppResult;
/// use sky366_client::core::error::AppError;
///
/// fn example_function() -> AppResult<String> {
///     Ok("Success".to_string())
/// }
///
/// fn failing_function() -> AppResult<()> {
///     Err(AppError::validation("Invalid input"))
/// }
/// ```
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Extension trait for `Result` to provide additional utility methods
pub trait ResultExt<T> {
    /// Map an error to a configuration error with additional context
    fn map_config_err<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;

    /// Map an error to an authentication error
    fn map_auth_err<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;

    /// Map an error to a network error with endpoint context
    fn map_network_err<F>(self, endpoint: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;

    /// Map an error to a payment error with order context
    fn map_payment_err<F>(self, order_id: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;

    /// Map an error to a validation error with field context
    fn map_validation_err<F>(self, field: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;

    /// Map an error to a storage error with path context
    fn map_storage_err<F>(self, path: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;

    /// Add context to any error
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn map_config_err<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|_| AppError::config(f()))
    }

    fn map_auth_err<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|_| AppError::auth(f()))
    }

    fn map_network_err<F>(self, endpoint: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|_| {
            let mut error = AppError::network(f());
            if let AppError::Network { endpoint: ep, .. } = &mut error {
                *ep = endpoint;
            }
            error
        })
    }

    fn map_payment_err<F>(self, order_id: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|_| {
            let mut error = AppError::payment(f());
            if let AppError::Payment { order_id: oid, .. } = &mut error {
                *oid = order_id;
            }
            error
        })
    }

    fn map_validation_err<F>(self, field: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|_| {
            let mut error = AppError::validation(f());
            if let AppError::Validation { field: fld, .. } = &mut error {
                *fld = field;
            }
            error
        })
    }

    fn map_storage_err<F>(self, path: Option<String>, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|_| {
            let mut error = AppError::storage(f());
            if let AppError::Storage { path: p, .. } = &mut error {
                *p = path;
            }
            error
        })
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|_| AppError::internal(f()))
    }
}

/// Utility functions for working with results
pub mod utils {
    use super::*;
    use std::future::Future;
    use tokio::time::{timeout, Duration};

    /// Execute a future with a timeout, converting timeout to AppError
    pub async fn with_timeout<F, T>(duration: Duration, operation: &str, future: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match timeout(duration, future).await {
            Ok(result) => result,
            Err(_) => Err(AppError::timeout(
                format!("Operation '{operation}' timed out"),
                operation.to_string(),
                duration.as_millis() as u64,
            )),
        }
    }

    /// Retry an operation with exponential backoff
    ///
    /// Non-retryable errors (auth, validation, payment) abort immediately.
    pub async fn retry_with_backoff<F, Fut, T>(
        mut operation: F,
        max_retries: u32,
        initial_delay: Duration,
        operation_name: &str,
    ) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !error.is_retryable() || attempt == max_retries {
                        return Err(error);
                    }

                    let delay = initial_delay * 2_u32.pow(attempt);
                    tracing::warn!(
                        "Operation '{}' failed (attempt {}/{}), retrying in {:?}: {}",
                        operation_name,
                        attempt + 1,
                        max_retries + 1,
                        delay,
                        error
                    );

                    tokio::time::sleep(delay).await;
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::internal(format!("Retry operation '{operation_name}' failed"))
        }))
    }

    /// Collect results, returning the first error encountered
    pub fn collect_results<T>(results: Vec<AppResult<T>>) -> AppResult<Vec<T>> {
        results.into_iter().collect()
    }

    /// Collect results, ignoring errors and returning successful values
    pub fn collect_ok<T>(results: Vec<AppResult<T>>) -> Vec<T> {
        results.into_iter().filter_map(|r| r.ok()).collect()
    }
}

/// Return early with a configuration error
#[macro_export]
macro_rules! bail_config {
    ($msg:expr) => {
        return Err($crate::core::error::AppError::config($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::core::error::AppError::config(format!($fmt, $($arg)*)))
    };
}

/// Return early with a payment error
#[macro_export]
macro_rules! bail_payment {
    ($msg:expr) => {
        return Err($crate::core::error::AppError::payment($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::core::error::AppError::payment(format!($fmt, $($arg)*)))
    };
}

/// Return early with a validation error
#[macro_export]
macro_rules! bail_validation {
    ($msg:expr) => {
        return Err($crate::core::error::AppError::validation($msg))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::core::error::AppError::validation(format!($fmt, $($arg)*)))
    };
}

/// Return early with the given error when a condition does not hold
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
