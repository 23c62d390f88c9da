//! Core type definitions and value objects for the domain model
//!
//! This module contains strongly-typed wrappers around primitive types
//! to ensure type safety and prevent invalid states in the domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Platform username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(pub String);

impl Username {
    /// Create a new username with validation
    pub fn new(name: String) -> Result<Self, crate::core::error::AppError> {
        crate::core::validation::validate_username(&name)
            .map_err(|e| crate::core::error::AppError::validation(e.to_string()))?;
        Ok(Self(name))
    }

    /// Create without validation (use with caution)
    pub fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the inner string value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = crate::core::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

/// Opaque bearer token issued by the backend on login
///
/// The token is never inspected client-side; it is stored, attached to
/// authorized requests, and evicted when the backend rejects it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(pub String);

impl AuthToken {
    /// Create a new token
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Get the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the inner string value
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check if the token value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Tokens never appear in logs or debug output.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(***)")
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

/// Wallet balance with proper decimal handling
///
/// Balances are non-negative; the backend owns the ledger and this client
/// only carries read copies, so a negative value always means a bug or a
/// malformed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WalletBalance(pub Decimal);

impl WalletBalance {
    /// Create a new balance with validation
    pub fn new(amount: Decimal) -> Result<Self, crate::core::error::AppError> {
        crate::core::validation::validate_wallet_amount(amount)
            .map_err(|e| crate::core::error::AppError::validation(e.to_string()))?;
        Ok(Self(amount))
    }

    /// Create a zero balance
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the inner decimal value
    pub fn into_inner(self) -> Decimal {
        self.0
    }

    /// Get the inner decimal value by reference
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the balance is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check whether the balance covers the given amount
    pub fn covers(&self, amount: Decimal) -> bool {
        self.0 >= amount
    }
}

impl fmt::Display for WalletBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Backend task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a new task identifier
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the inner string value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.to_string()))
    }
}

/// Client-generated order identifier for payment flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Create a new random order ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID value
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Gateway-issued payment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub String);

impl PaymentId {
    /// Create a new payment identifier
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the inner string value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task lifecycle state as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is available and has not been completed
    Pending,
    /// Task has been completed and its reward credited
    Completed,
}

impl TaskStatus {
    /// Check whether the task can still be interacted with
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = crate::core::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" | "complete" => Ok(Self::Completed),
            _ => Err(crate::core::error::AppError::validation(format!(
                "Invalid task status: {s}"
            ))),
        }
    }
}

/// Crypto payment status reported by the payment gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Invoice created, waiting for funds to arrive
    Waiting,
    /// Transaction seen, waiting for confirmations
    Confirming,
    /// Transaction confirmed on chain
    Confirmed,
    /// Funds being forwarded to the merchant
    Sending,
    /// Less than the invoiced amount was received
    PartiallyPaid,
    /// Payment completed in full
    Finished,
    /// Payment failed
    Failed,
    /// Payment refunded to the sender
    Refunded,
    /// Invoice expired before funds arrived
    Expired,
}

impl PaymentStatus {
    /// Check whether this status ends the polling loop
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finished | Self::Failed | Self::Refunded | Self::Expired
        )
    }

    /// Check whether this status represents a successful payment
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Waiting => "waiting",
            Self::Confirming => "confirming",
            Self::Confirmed => "confirmed",
            Self::Sending => "sending",
            Self::PartiallyPaid => "partially_paid",
            Self::Finished => "finished",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Expired => "expired",
        };
        write!(f, "{label}")
    }
}

impl FromStr for PaymentStatus {
    type Err = crate::core::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "waiting" => Ok(Self::Waiting),
            "confirming" => Ok(Self::Confirming),
            "confirmed" => Ok(Self::Confirmed),
            "sending" => Ok(Self::Sending),
            "partially_paid" => Ok(Self::PartiallyPaid),
            "finished" => Ok(Self::Finished),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            "expired" => Ok(Self::Expired),
            _ => Err(crate::core::error::AppError::validation(format!(
                "Invalid payment status: {s}"
            ))),
        }
    }
}

/// Timestamp wrapper for consistent time handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp for the current moment
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a DateTime<Utc>
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Get the inner DateTime<Utc> value
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }

    /// Get seconds since Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    /// Get duration since another timestamp
    pub fn duration_since(&self, other: Timestamp) -> chrono::Duration {
        self.0 - other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_username() {
        let name = Username::new("alice_366".to_string()).unwrap();
        assert_eq!(name.as_str(), "alice_366");

        assert!(Username::new("ab".to_string()).is_err());
        assert!(Username::new("has spaces".to_string()).is_err());
    }

    #[test]
    fn test_auth_token_redaction() {
        let token = AuthToken::new("secret-bearer-token".to_string());
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(token.to_string(), "***");
        assert_eq!(token.as_str(), "secret-bearer-token");
    }

    #[test]
    fn test_wallet_balance() {
        let balance = WalletBalance::new(dec!(125.50)).unwrap();
        assert!(balance.covers(dec!(100)));
        assert!(!balance.covers(dec!(200)));

        let zero = WalletBalance::zero();
        assert!(zero.is_zero());

        assert!(WalletBalance::new(dec!(-1)).is_err());
    }

    #[test]
    fn test_order_id() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2);

        let parsed = OrderId::from_str(&id1.to_string()).unwrap();
        assert_eq!(id1, parsed);
    }

    #[test]
    fn test_task_status() {
        assert!(TaskStatus::from_str("pending").unwrap().is_pending());
        assert!(!TaskStatus::from_str("completed").unwrap().is_pending());
        assert!(TaskStatus::from_str("unknown").is_err());
    }

    #[test]
    fn test_payment_status() {
        assert!(PaymentStatus::from_str("finished").unwrap().is_terminal());
        assert!(PaymentStatus::from_str("finished").unwrap().is_success());
        assert!(PaymentStatus::from_str("expired").unwrap().is_terminal());
        assert!(!PaymentStatus::from_str("expired").unwrap().is_success());
        assert!(!PaymentStatus::from_str("waiting").unwrap().is_terminal());

        let json = serde_json::to_string(&PaymentStatus::PartiallyPaid).unwrap();
        assert_eq!(json, "\"partially_paid\"");
    }
}
