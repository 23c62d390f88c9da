//! Address-based crypto deposit flow
//!
//! The backend creates a gateway invoice with a pay address; the user sends
//! funds externally while the client watches the payment status. The watch
//! is a cancellable task: polls back off exponentially up to a configured
//! ceiling, a hard timeout abandons the invoice, and cancelling the token
//! stops the loop immediately. Only a `finished` status credits the wallet.

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::models::PaymentConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::{OrderId, PaymentId, PaymentStatus, WalletBalance};
use crate::infrastructure::monitoring::metrics;
use crate::services::api::types::{
    CreatePaymentRequest, CreatePaymentResponse, PaymentStatusResponse,
};
use crate::services::api::ApiClient;

/// A crypto invoice awaiting payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoInvoice {
    /// Client-generated order identifier
    pub order_id: OrderId,
    /// Gateway payment identifier, used for status polling
    pub payment_id: PaymentId,
    /// Address the payer must send funds to
    pub pay_address: String,
    /// Exact amount to send in the pay currency
    pub pay_amount: Decimal,
    /// Deposit amount in platform currency
    pub amount: Decimal,
}

/// Address-based crypto deposit service
#[derive(Debug, Clone)]
pub struct CryptoPaymentService {
    api: Arc<ApiClient>,
    config: PaymentConfig,
}

impl CryptoPaymentService {
    /// Create the service
    pub fn new(api: Arc<ApiClient>, config: &PaymentConfig) -> Self {
        Self {
            api,
            config: config.clone(),
        }
    }

    /// Create a gateway invoice for the given deposit amount
    #[instrument(skip(self))]
    pub async fn create_invoice(&self, amount: Decimal) -> AppResult<CryptoInvoice> {
        super::validate_deposit_amount(amount, self.config.min_deposit, self.config.max_deposit)?;

        let order_id = OrderId::new();
        let request = CreatePaymentRequest {
            amount,
            order_id: order_id.to_string(),
            pay_currency: self.config.pay_currency.clone(),
        };
        let response: CreatePaymentResponse =
            self.api.post_authorized("/create-payment", &request).await?;

        info!(
            "🪙 Invoice {} created: send {} to {}",
            response.payment_id, response.pay_amount, response.pay_address
        );
        Ok(CryptoInvoice {
            order_id,
            payment_id: PaymentId::new(response.payment_id),
            pay_address: response.pay_address,
            pay_amount: response.pay_amount,
            amount,
        })
    }

    /// Poll the gateway status of a payment once
    #[instrument(skip(self))]
    pub async fn poll_status(&self, payment_id: &PaymentId) -> AppResult<PaymentStatus> {
        let response: PaymentStatusResponse = self
            .api
            .get_authorized(&format!("/payment-status/{}", payment_id.as_str()))
            .await?;

        let status = PaymentStatus::from_str(&response.payment_status).map_err(|e| {
            AppError::api(
                format!("Unrecognized payment status: {e}"),
                "/payment-status".to_string(),
            )
        })?;

        metrics::record_payment_poll(&status.to_string());
        Ok(status)
    }

    /// Watch an invoice until it reaches a terminal status, then credit
    /// the wallet
    ///
    /// The loop honors three exits: a terminal gateway status, the hard
    /// timeout of the backoff schedule, and the cancellation token. Polls
    /// that fail transiently are logged and the watch continues; auth
    /// failures abort it.
    #[instrument(skip(self, cancel), fields(payment_id = %invoice.payment_id))]
    pub async fn watch_and_credit(
        &self,
        invoice: &CryptoInvoice,
        cancel: CancellationToken,
    ) -> AppResult<WalletBalance> {
        let mut schedule = ExponentialBackoff {
            initial_interval: Duration::from_millis(self.config.poll_interval_ms),
            max_interval: Duration::from_millis(self.config.poll_max_interval_ms),
            max_elapsed_time: Some(Duration::from_secs(self.config.poll_timeout_secs)),
            ..ExponentialBackoff::default()
        };

        loop {
            match self.poll_status(&invoice.payment_id).await {
                Ok(status) if status.is_success() => {
                    let wallet = super::credit_wallet(&self.api, invoice.amount).await?;
                    info!(
                        "💰 Payment {} finished, wallet now {}",
                        invoice.payment_id, wallet
                    );
                    return Ok(wallet);
                }
                Ok(status) if status.is_terminal() => {
                    return Err(AppError::Payment {
                        message: format!("Payment ended in status '{status}'"),
                        payment_id: Some(invoice.payment_id.as_str().to_string()),
                        order_id: Some(invoice.order_id.to_string()),
                        source: None,
                    });
                }
                Ok(status) => {
                    debug!("⏳ Payment {} still {}", invoice.payment_id, status);
                }
                Err(e) if e.evicts_session() => return Err(e),
                Err(e) => {
                    // Transient poll failures ride out the schedule.
                    warn!("⚠️  Status poll failed, will retry: {}", e);
                }
            }

            let delay = match schedule.next_backoff() {
                Some(delay) => delay,
                None => {
                    return Err(AppError::timeout(
                        format!(
                            "Payment {} not finished within the watch window",
                            invoice.payment_id
                        ),
                        "payment_watch".to_string(),
                        self.config.poll_timeout_secs * 1000,
                    ))
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("🛑 Payment watch for {} cancelled", invoice.payment_id);
                    return Err(AppError::Payment {
                        message: "Payment watch cancelled".to_string(),
                        payment_id: Some(invoice.payment_id.as_str().to_string()),
                        order_id: Some(invoice.order_id.to_string()),
                        source: None,
                    });
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
