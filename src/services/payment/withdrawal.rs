//! Withdrawal flow
//!
//! One canonical request/history pair against the backend's withdrawal
//! endpoints. The backend owns approval and processing; the client only
//! validates the request locally and reads the history back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::models::PaymentConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::WalletBalance;
use crate::services::api::types::{
    AckResponse, WithdrawalDto, WithdrawalInfoResponse, WithdrawalRequestBody,
};
use crate::services::api::ApiClient;
use crate::utils::time::parse_date_flexible;
use crate::utils::validation::validate_payout_address;

/// One withdrawal from the account's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    /// Withdrawn amount
    pub amount: Decimal,
    /// Destination address
    pub address: String,
    /// Processing status label as reported by the backend
    pub status: String,
    /// When the withdrawal was requested, when parseable
    pub requested_at: Option<DateTime<Utc>>,
}

impl From<WithdrawalDto> for WithdrawalRecord {
    fn from(dto: WithdrawalDto) -> Self {
        Self {
            amount: dto.amount,
            address: dto.address,
            status: dto.status,
            requested_at: dto.requested_at.and_then(|d| parse_date_flexible(&d).ok()),
        }
    }
}

/// Withdrawal operations service
#[derive(Debug, Clone)]
pub struct WithdrawalService {
    api: Arc<ApiClient>,
    min_withdrawal: Decimal,
}

impl WithdrawalService {
    /// Create the service
    pub fn new(api: Arc<ApiClient>, config: &PaymentConfig) -> Self {
        Self {
            api,
            min_withdrawal: config.min_withdrawal,
        }
    }

    /// Request a withdrawal to the given address
    ///
    /// The amount must meet the platform minimum and be covered by the
    /// current wallet balance; both are checked before the request is sent.
    #[instrument(skip(self))]
    pub async fn request(
        &self,
        amount: Decimal,
        address: &str,
        current_wallet: WalletBalance,
    ) -> AppResult<()> {
        if amount < self.min_withdrawal {
            return Err(AppError::validation_field(
                format!(
                    "Withdrawal amount {amount} is below the minimum of {}",
                    self.min_withdrawal
                ),
                "amount".to_string(),
            ));
        }

        if !current_wallet.covers(amount) {
            return Err(AppError::validation_field(
                format!(
                    "Withdrawal amount {amount} exceeds the wallet balance {}",
                    current_wallet.value()
                ),
                "amount".to_string(),
            ));
        }

        validate_payout_address(address)
            .map_err(|e| AppError::validation_field(e.to_string(), "address".to_string()))?;

        let request = WithdrawalRequestBody {
            amount,
            address: address.to_string(),
        };
        let ack: AckResponse = self
            .api
            .post_authorized("/withdrawalRequest", &request)
            .await?;

        if !ack.success {
            return Err(AppError::Payment {
                message: ack
                    .message
                    .unwrap_or_else(|| "Withdrawal request rejected".to_string()),
                payment_id: None,
                order_id: None,
                source: None,
            });
        }

        info!("🏦 Withdrawal of {} to {} requested", amount, address);
        Ok(())
    }

    /// Fetch the account's withdrawal history
    #[instrument(skip(self))]
    pub async fn history(&self) -> AppResult<Vec<WithdrawalRecord>> {
        let response: WithdrawalInfoResponse = self.api.get_authorized("/withdrawalInfo").await?;
        Ok(response
            .withdrawals
            .into_iter()
            .map(WithdrawalRecord::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::ApiConfig;
    use crate::core::types::{AuthToken, Username};
    use crate::infrastructure::storage::{SessionContext, TokenStore};
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service(server: &MockServer, dir: &tempfile::TempDir) -> WithdrawalService {
        let session = SessionContext::open(TokenStore::new(dir.path().join("session.json")))
            .await
            .unwrap();
        session
            .establish(
                AuthToken::new("tok".to_string()),
                Username::new_unchecked("alice".to_string()),
            )
            .await
            .unwrap();

        let config = ApiConfig {
            base_url: server.uri(),
            request_timeout_ms: 5000,
            connection_timeout_ms: 5000,
            max_retries: 0,
            retry_backoff_ms: 1,
        };
        let api = Arc::new(ApiClient::new(&config, session).unwrap());
        WithdrawalService::new(api, &PaymentConfig::default())
    }

    fn wallet(amount: Decimal) -> WalletBalance {
        WalletBalance::new(amount).unwrap()
    }

    #[tokio::test]
    async fn test_request_validates_locally() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let withdrawals = service(&server, &dir).await;

        // Below platform minimum
        let err = withdrawals
            .request(dec!(5), "TXYZexampleaddressvalue", wallet(dec!(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        // Exceeds balance
        let err = withdrawals
            .request(dec!(150), "TXYZexampleaddressvalue", wallet(dec!(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        // Bad address
        let err = withdrawals
            .request(dec!(50), "??", wallet(dec!(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_successful_request() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let withdrawals = service(&server, &dir).await;

        Mock::given(method("POST"))
            .and(path("/withdrawalRequest"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        withdrawals
            .request(dec!(50), "TXYZexampleaddressvalue", wallet(dec!(100)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejected_request_is_a_payment_error() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let withdrawals = service(&server, &dir).await;

        Mock::given(method("POST"))
            .and(path("/withdrawalRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"success": false, "message": "daily limit reached"}),
            ))
            .mount(&server)
            .await;

        let err = withdrawals
            .request(dec!(50), "TXYZexampleaddressvalue", wallet(dec!(100)))
            .await
            .unwrap_err();
        match err {
            AppError::Payment { message, .. } => assert_eq!(message, "daily limit reached"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_history_maps_records() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let withdrawals = service(&server, &dir).await;

        Mock::given(method("GET"))
            .and(path("/withdrawalInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "withdrawals": [
                    {"amount": 75, "address": "TXYZexampleaddressvalue", "status": "pending", "requestedAt": "2025-06-01"},
                    {"amount": 20, "address": "TXYZexampleaddressvalue", "status": "paid"}
                ]
            })))
            .mount(&server)
            .await;

        let history = withdrawals.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].amount, dec!(75));
        assert!(history[0].requested_at.is_some());
        assert!(history[1].requested_at.is_none());
    }
}
