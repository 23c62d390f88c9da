//! Wire types for the Sky366Trade backend
//!
//! Request and response shapes exactly as the backend serializes them,
//! kept separate from the domain types the services expose. Field renames
//! follow the backend's mixed camelCase/snake_case conventions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Platform username
    pub username: String,
    /// Account password, sent once over TLS and never stored
    pub password: String,
}

/// Login response body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests
    pub token: String,
}

/// Profile response body
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    /// Platform username
    pub username: String,
    /// Account email address
    pub email: String,
    /// Account phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Current wallet balance
    pub wallet: Decimal,
    /// Registration date
    #[serde(rename = "joinDate")]
    pub join_date: String,
}

/// Single task entry as returned by the task listing
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDto {
    /// Backend task identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Task title
    pub title: String,
    /// Task category label
    #[serde(rename = "type")]
    pub task_type: String,
    /// Reward credited on completion
    pub reward: Decimal,
    /// Lifecycle state (pending or completed)
    pub status: String,
}

/// Task listing response body
#[derive(Debug, Clone, Deserialize)]
pub struct TaskListResponse {
    /// All tasks visible to the account
    pub tasks: Vec<TaskDto>,
}

/// Task completion response body
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteTaskResponse {
    /// Updated wallet balance after the reward was credited
    pub wallet: Decimal,
}

/// Team details request body
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetailsRequest {
    /// Username whose downline is requested
    pub username: String,
}

/// Single downline member entry
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMemberDto {
    /// Member username
    pub username: String,
    /// Member email address
    #[serde(default)]
    pub email: Option<String>,
    /// Member wallet balance
    #[serde(default)]
    pub wallet: Decimal,
    /// Member registration date
    #[serde(rename = "joinDate", default)]
    pub join_date: Option<String>,
}

/// Downline members grouped by referral depth
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamLevelsDto {
    /// Direct referrals
    #[serde(default)]
    pub level1: Vec<TeamMemberDto>,
    /// Second-level referrals
    #[serde(default)]
    pub level2: Vec<TeamMemberDto>,
    /// Third-level referrals
    #[serde(default)]
    pub level3: Vec<TeamMemberDto>,
    /// Fourth-level referrals
    #[serde(default)]
    pub level4: Vec<TeamMemberDto>,
    /// Fifth-level referrals
    #[serde(default)]
    pub level5: Vec<TeamMemberDto>,
    /// Sixth-level referrals
    #[serde(default)]
    pub level6: Vec<TeamMemberDto>,
}

/// Team details response body
#[derive(Debug, Clone, Deserialize)]
pub struct TeamDetailsResponse {
    /// Downline grouped by depth
    pub teams: TeamLevelsDto,
}

/// Team aggregate request body
#[derive(Debug, Clone, Serialize)]
pub struct ShowDetailsRequest {
    /// Username whose aggregates are requested
    pub username: String,
}

/// Team aggregate response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregateResponse {
    /// Total downline member count across all depths
    pub total_members: u32,
    /// Sum of downline wallet balances
    pub total_wallet: Decimal,
    /// Count of direct referrals
    #[serde(default)]
    pub direct_members: u32,
}

/// Wallet update request body
#[derive(Debug, Clone, Serialize)]
pub struct UpdateWalletRequest {
    /// Amount to credit
    pub amount: Decimal,
}

/// Wallet snapshot response body
#[derive(Debug, Clone, Deserialize)]
pub struct WalletResponse {
    /// Current wallet balance
    pub wallet: Decimal,
}

/// Crypto payment creation request body
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    /// Deposit amount in platform currency
    pub amount: Decimal,
    /// Client-generated order identifier
    pub order_id: String,
    /// Currency the payer will send
    pub pay_currency: String,
}

/// Crypto payment creation response body
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentResponse {
    /// Gateway payment identifier, used for status polling
    pub payment_id: String,
    /// Address the payer must send funds to
    pub pay_address: String,
    /// Exact amount to send in the pay currency
    pub pay_amount: Decimal,
}

/// Crypto payment status response body
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentStatusResponse {
    /// Gateway payment status string
    pub payment_status: String,
}

/// Hosted checkout order creation request body
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    /// Deposit amount in platform currency
    pub amount: Decimal,
}

/// Hosted checkout order as created by the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutOrderDto {
    /// Gateway order identifier
    pub id: String,
    /// Order amount in minor units
    pub amount: Decimal,
    /// Order currency code
    #[serde(default)]
    pub currency: Option<String>,
}

/// Hosted checkout order creation response body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    /// The created order
    pub order: CheckoutOrderDto,
}

/// Hosted checkout verification request body
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentRequest {
    /// Gateway order identifier
    pub order_id: String,
    /// Gateway payment identifier returned by the checkout widget
    pub payment_id: String,
    /// Gateway signature over order and payment identifiers
    pub signature: String,
}

/// Hosted checkout verification response body
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentResponse {
    /// Whether the gateway signature checked out
    pub verified: bool,
}

/// Withdrawal request body
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalRequestBody {
    /// Amount to withdraw
    pub amount: Decimal,
    /// Destination address
    pub address: String,
}

/// Single withdrawal history entry
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalDto {
    /// Withdrawn amount
    pub amount: Decimal,
    /// Destination address
    pub address: String,
    /// Processing status label
    pub status: String,
    /// When the withdrawal was requested
    #[serde(rename = "requestedAt", default)]
    pub requested_at: Option<String>,
}

/// Withdrawal history response body
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalInfoResponse {
    /// All withdrawals requested by the account
    #[serde(default)]
    pub withdrawals: Vec<WithdrawalDto>,
}

/// Referral parent assignment request body
#[derive(Debug, Clone, Serialize)]
pub struct SetParentRequest {
    /// Username being linked
    pub username: String,
    /// Referrer username
    pub parent: String,
}

/// Team creation request body
#[derive(Debug, Clone, Serialize)]
pub struct CreateTeamRequest {
    /// Username the team is created for
    pub username: String,
}

/// Generic acknowledgement response body
#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    /// Whether the operation succeeded
    #[serde(default)]
    pub success: bool,
    /// Optional backend message
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape the backend uses for failed requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Backend failure message
    #[serde(default)]
    pub message: Option<String>,
}
