//! Hosted checkout deposit flow
//!
//! The backend creates a gateway order; the user pays it in the gateway's
//! hosted page, which hands back a payment id and a signature. Verifying
//! that signature against the order completes the deposit and credits the
//! wallet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::models::PaymentConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::WalletBalance;
use crate::services::api::types::{
    CreateOrderRequest, CreateOrderResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::services::api::ApiClient;

/// A gateway order awaiting payment in the hosted page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutOrder {
    /// Gateway order identifier
    pub order_id: String,
    /// Deposit amount in platform currency
    pub amount: Decimal,
    /// Order currency code, when the gateway reports one
    pub currency: Option<String>,
}

/// Hosted checkout operations service
#[derive(Debug, Clone)]
pub struct CheckoutService {
    api: Arc<ApiClient>,
    min_deposit: Decimal,
    max_deposit: Decimal,
}

impl CheckoutService {
    /// Create the service
    pub fn new(api: Arc<ApiClient>, config: &PaymentConfig) -> Self {
        Self {
            api,
            min_deposit: config.min_deposit,
            max_deposit: config.max_deposit,
        }
    }

    /// Create a gateway order for the given deposit amount
    #[instrument(skip(self))]
    pub async fn create_order(&self, amount: Decimal) -> AppResult<CheckoutOrder> {
        super::validate_deposit_amount(amount, self.min_deposit, self.max_deposit)?;

        let request = CreateOrderRequest { amount };
        let response: CreateOrderResponse = self
            .api
            .post_authorized("/payment/create-order", &request)
            .await?;

        info!("🧾 Checkout order {} created for {}", response.order.id, amount);
        Ok(CheckoutOrder {
            order_id: response.order.id,
            amount,
            currency: response.order.currency,
        })
    }

    /// Verify the gateway's signature and credit the wallet
    ///
    /// `payment_id` and `signature` are the values the hosted page hands
    /// back after a successful payment. Returns the updated wallet balance.
    #[instrument(skip(self, signature))]
    pub async fn verify_and_credit(
        &self,
        order: &CheckoutOrder,
        payment_id: &str,
        signature: &str,
    ) -> AppResult<WalletBalance> {
        if payment_id.is_empty() || signature.is_empty() {
            return Err(AppError::validation(
                "Payment id and signature are required to verify a checkout",
            ));
        }

        let request = VerifyPaymentRequest {
            order_id: order.order_id.clone(),
            payment_id: payment_id.to_string(),
            signature: signature.to_string(),
        };
        let response: VerifyPaymentResponse = self
            .api
            .post_authorized("/payment/verify-payment", &request)
            .await?;

        if !response.verified {
            return Err(AppError::Payment {
                message: "Gateway signature verification failed".to_string(),
                payment_id: Some(payment_id.to_string()),
                order_id: Some(order.order_id.clone()),
                source: None,
            });
        }

        let wallet = super::credit_wallet(&self.api, order.amount).await?;
        info!(
            "💰 Checkout order {} verified, wallet now {}",
            order.order_id, wallet
        );
        Ok(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::ApiConfig;
    use crate::core::types::{AuthToken, Username};
    use crate::infrastructure::storage::{SessionContext, TokenStore};
    use rust_decimal_macros::dec;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service(server: &MockServer, dir: &tempfile::TempDir) -> CheckoutService {
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
        CheckoutService::new(api, &PaymentConfig::default())
    }

    #[tokio::test]
    async fn test_create_order_validates_amount() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let checkout = service(&server, &dir).await;

        let err = checkout.create_order(dec!(1)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_full_checkout_flow() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let checkout = service(&server, &dir).await;

        Mock::given(method("POST"))
            .and(path("/payment/create-order"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "order": {"id": "order_9", "amount": 100, "currency": "USD"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/payment/verify-payment"))
            .and(body_json(serde_json::json!({
                "order_id": "order_9",
                "payment_id": "pay_1",
                "signature": "sig"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"verified": true})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/update-wallet"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"wallet": 350})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let order = checkout.create_order(dec!(100)).await.unwrap();
        assert_eq!(order.order_id, "order_9");

        let wallet = checkout
            .verify_and_credit(&order, "pay_1", "sig")
            .await
            .unwrap();
        assert_eq!(wallet.value(), dec!(350));
    }

    #[tokio::test]
    async fn test_failed_verification_does_not_credit() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let checkout = service(&server, &dir).await;

        Mock::given(method("POST"))
            .and(path("/payment/verify-payment"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"verified": false})),
            )
            .mount(&server)
            .await;
        // No /update-wallet mock: a credit attempt would fail the test.

        let order = CheckoutOrder {
            order_id: "order_9".to_string(),
            amount: dec!(100),
            currency: None,
        };
        let err = checkout
            .verify_and_credit(&order, "pay_1", "bad-sig")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Payment { .. }));
    }
}
