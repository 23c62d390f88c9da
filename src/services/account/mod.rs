//! Account service: login, profile, and referral linking
//!
//! Thin typed layer over the backend's account endpoints. The login call is
//! the only place a password passes through the client; it is sent once and
//! never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::{AuthToken, Username, WalletBalance};
use crate::infrastructure::storage::SessionContext;
use crate::services::api::types::{
    AckResponse, CreateTeamRequest, LoginRequest, LoginResponse, ProfileResponse, SetParentRequest,
};
use crate::services::api::ApiClient;
use crate::utils::time::parse_date_flexible;

/// Account profile as held by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform username
    pub username: Username,
    /// Account email address
    pub email: String,
    /// Account phone number, when one was registered
    pub phone: Option<String>,
    /// Current wallet balance
    pub wallet: WalletBalance,
    /// Registration date
    pub join_date: DateTime<Utc>,
}

/// Account operations service
#[derive(Debug, Clone)]
pub struct AccountService {
    api: Arc<ApiClient>,
    session: Arc<SessionContext>,
}

impl AccountService {
    /// Create the service
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionContext>) -> Self {
        Self { api, session }
    }

    /// Log in and persist the issued session
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Username> {
        let username = Username::new(username.to_string())?;

        if password.is_empty() {
            return Err(AppError::validation_field(
                "Password cannot be empty".to_string(),
                "password".to_string(),
            ));
        }

        let request = LoginRequest {
            username: username.as_str().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.api.post("/login", &request).await?;

        if response.token.is_empty() {
            return Err(AppError::auth("Backend returned an empty token"));
        }

        self.session
            .establish(AuthToken::new(response.token), username.clone())
            .await?;

        info!("👤 Logged in as {}", username);
        Ok(username)
    }

    /// Discard the stored session
    pub async fn logout(&self) -> AppResult<()> {
        self.session.evict().await
    }

    /// Fetch the account profile
    #[instrument(skip(self))]
    pub async fn profile(&self) -> AppResult<UserProfile> {
        let response: ProfileResponse = self.api.get_authorized("/profile").await?;
        Self::map_profile(response)
    }

    /// Link this account under a referrer
    #[instrument(skip(self))]
    pub async fn set_parent(&self, parent: &str) -> AppResult<()> {
        let parent = Username::new(parent.to_string())?;
        let username = self.session.username().await?;

        let request = SetParentRequest {
            username: username.into_inner(),
            parent: parent.into_inner(),
        };
        let ack: AckResponse = self.api.post_authorized("/setParent", &request).await?;
        Self::check_ack(ack, "/setParent")
    }

    /// Create the referral team record for this account
    #[instrument(skip(self))]
    pub async fn create_team(&self) -> AppResult<()> {
        let username = self.session.username().await?;

        let request = CreateTeamRequest {
            username: username.into_inner(),
        };
        let ack: AckResponse = self.api.post_authorized("/create-team", &request).await?;
        Self::check_ack(ack, "/create-team")
    }

    fn map_profile(response: ProfileResponse) -> AppResult<UserProfile> {
        let join_date = parse_date_flexible(&response.join_date).map_err(|e| {
            AppError::api(
                format!("Unparseable join date '{}': {e}", response.join_date),
                "/profile".to_string(),
            )
        })?;

        Ok(UserProfile {
            username: Username::new_unchecked(response.username),
            email: response.email,
            phone: response.phone,
            wallet: WalletBalance::new(response.wallet)?,
            join_date,
        })
    }

    fn check_ack(ack: AckResponse, endpoint: &str) -> AppResult<()> {
        if ack.success {
            Ok(())
        } else {
            Err(AppError::api(
                ack.message
                    .unwrap_or_else(|| "Backend reported failure".to_string()),
                endpoint.to_string(),
            ))
        }
    }
}
