//! Payment flows: deposits and withdrawals
//!
//! Two deposit paths end in the same wallet-credit call: the hosted
//! checkout (order created backend-side, paid in the gateway's page,
//! verified by signature) and the address-based crypto payment (invoice
//! with a pay address, watched until the gateway reports a terminal
//! status). Withdrawals go through a single request/history pair.

pub mod checkout;
pub mod crypto;
pub mod withdrawal;

pub use checkout::{CheckoutOrder, CheckoutService};
pub use crypto::{CryptoInvoice, CryptoPaymentService};
pub use withdrawal::{WithdrawalRecord, WithdrawalService};

use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::WalletBalance;
use crate::services::api::types::{UpdateWalletRequest, WalletResponse};
use crate::services::api::ApiClient;

/// Credit a completed deposit to the wallet
///
/// Shared tail of both deposit paths.
pub(crate) async fn credit_wallet(api: &ApiClient, amount: Decimal) -> AppResult<WalletBalance> {
    let request = UpdateWalletRequest { amount };
    let response: WalletResponse = api.post_authorized("/update-wallet", &request).await?;
    WalletBalance::new(response.wallet)
}

/// Validate a deposit amount against the configured bounds
pub(crate) fn validate_deposit_amount(
    amount: Decimal,
    min_deposit: Decimal,
    max_deposit: Decimal,
) -> AppResult<()> {
    if amount < min_deposit {
        return Err(AppError::validation_field(
            format!("Deposit amount {amount} is below the minimum of {min_deposit}"),
            "amount".to_string(),
        ));
    }
    if amount > max_deposit {
        return Err(AppError::validation_field(
            format!("Deposit amount {amount} exceeds the maximum of {max_deposit}"),
            "amount".to_string(),
        ));
    }
    Ok(())
}
