//! Services layer module
//!
//! This module contains all business services: the backend API client, the
//! account and referral services, the task flow, and the payment flows.

pub mod account;
pub mod api;
pub mod payment;
pub mod referral;
pub mod tasks;

// Re-export commonly used types
pub use account::{AccountService, UserProfile};
pub use api::ApiClient;
pub use payment::{CheckoutService, CryptoPaymentService, WithdrawalService};
pub use referral::{ReferralService, TeamSnapshot};
pub use tasks::{Task, TaskFeedback, TaskService};

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::result::AppResult;
use crate::infrastructure::storage::SessionContext;

/// Services collection for dependency injection
#[derive(Debug, Clone)]
pub struct ServiceContainer {
    /// Shared backend API client
    pub api: Arc<ApiClient>,
    /// Account operations
    pub account: AccountService,
    /// Referral program operations
    pub referral: ReferralService,
    /// Task flow
    pub tasks: TaskService,
    /// Hosted checkout deposits
    pub checkout: CheckoutService,
    /// Address-based crypto deposits
    pub crypto: CryptoPaymentService,
    /// Withdrawals
    pub withdrawals: WithdrawalService,
}

impl ServiceContainer {
    /// Initialize all services against one shared API client and session
    pub fn initialize(config: &AppConfig, session: Arc<SessionContext>) -> AppResult<Self> {
        tracing::info!("🚀 Initializing service container");

        let api = Arc::new(ApiClient::new(&config.api, session.clone())?);

        let account = AccountService::new(api.clone(), session.clone());
        let referral = ReferralService::new(api.clone(), session.clone(), &config.referral)?;
        let tasks = TaskService::new(api.clone(), &config.tasks);
        let checkout = CheckoutService::new(api.clone(), &config.payment);
        let crypto = CryptoPaymentService::new(api.clone(), &config.payment);
        let withdrawals = WithdrawalService::new(api.clone(), &config.payment);

        tracing::info!("✅ Service container initialized successfully");

        Ok(Self {
            api,
            account,
            referral,
            tasks,
            checkout,
            crypto,
            withdrawals,
        })
    }
}
