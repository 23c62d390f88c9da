//! Core domain layer containing business entities, value objects, and domain rules
//!
//! This module defines the fundamental building blocks of the Sky366Trade
//! client domain. It contains error types, result definitions, common types,
//! the tier eligibility evaluator, and the domain rules used throughout the
//! application.
//!
//! # Design Principles
//!
//! 1. **Independence**: Core domain should not depend on external services
//! 2. **Immutability**: Value objects should be immutable where possible
//! 3. **Type Safety**: Use strong types to prevent invalid states
//! 4. **Domain Rules**: Encode business rules in the type system

pub mod error;
pub mod result;
pub mod tier;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorKind, ErrorSeverity};
pub use result::AppResult;
pub use tier::{Tier, TierStanding, TierTable};
pub use types::*;

/// Domain constants and business rules
pub mod domain {
    use rust_decimal::Decimal;
    use std::time::Duration;

    /// Referral program rules
    pub mod referral {
        /// Downline depth tracked by the program (levels of indirection)
        pub const MAX_TEAM_DEPTH: u8 = 6;
    }

    /// Task flow rules
    pub mod tasks {
        use super::*;

        /// Minimum wallet balance required before task interaction is allowed
        pub const MIN_WALLET_TO_INTERACT: Decimal = rust_decimal_macros::dec!(50);

        /// Lowest accepted task rating
        pub const MIN_RATING: u8 = 1;

        /// Highest accepted task rating
        pub const MAX_RATING: u8 = 5;

        /// Maximum accepted feedback length in characters
        pub const MAX_FEEDBACK_LENGTH: usize = 500;
    }

    /// Payment flow rules
    pub mod payment {
        use super::*;

        /// Minimum deposit amount accepted by the platform
        pub const MIN_DEPOSIT: Decimal = rust_decimal_macros::dec!(10);

        /// Maximum deposit amount accepted by the platform
        pub const MAX_DEPOSIT: Decimal = rust_decimal_macros::dec!(100000);

        /// Minimum withdrawal amount accepted by the platform
        pub const MIN_WITHDRAWAL: Decimal = rust_decimal_macros::dec!(10);

        /// Initial interval between crypto payment status polls
        pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

        /// Upper bound for the backed-off poll interval
        pub const DEFAULT_POLL_MAX_INTERVAL: Duration = Duration::from_secs(60);

        /// Hard timeout after which an unfinished crypto payment is abandoned
        pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(1800);
    }

    /// Performance and timing rules
    pub mod performance {
        use super::*;

        /// Connection timeout for the backend
        pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

        /// Request timeout for backend calls
        pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

        /// Maximum number of retries for transient request failures
        pub const MAX_RETRIES: u32 = 3;
    }
}

/// Domain validation rules and helpers
pub mod validation {
    use anyhow::{anyhow, Result};
    use rust_decimal::Decimal;

    /// Validate a platform username
    ///
    /// Usernames are 3 to 32 characters of ASCII letters, digits, and
    /// underscores, matching what the registration endpoint accepts.
    pub fn validate_username(username: &str) -> Result<()> {
        if username.len() < 3 || username.len() > 32 {
            return Err(anyhow!(
                "Username must be 3-32 characters, got {}",
                username.len()
            ));
        }

        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(anyhow!("Username may contain only letters, digits and underscores"));
        }

        Ok(())
    }

    /// Validate a wallet amount reported by the backend
    pub fn validate_wallet_amount(amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(anyhow!("Wallet amount cannot be negative: {}", amount));
        }
        Ok(())
    }

    /// Validate a task rating
    pub fn validate_rating(rating: u8) -> Result<()> {
        use super::domain::tasks::*;

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(anyhow!(
                "Rating out of range: {} (valid range: {}-{})",
                rating,
                MIN_RATING,
                MAX_RATING
            ));
        }
        Ok(())
    }

    /// Validate task feedback text
    pub fn validate_feedback(feedback: &str) -> Result<()> {
        use super::domain::tasks::MAX_FEEDBACK_LENGTH;

        if feedback.trim().is_empty() {
            return Err(anyhow!("Feedback cannot be empty"));
        }
        if feedback.chars().count() > MAX_FEEDBACK_LENGTH {
            return Err(anyhow!(
                "Feedback too long: {} characters (max {})",
                feedback.chars().count(),
                MAX_FEEDBACK_LENGTH
            ));
        }
        Ok(())
    }
}
