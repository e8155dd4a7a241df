//! Wallet balance and withdrawal requests.

use drwise_core::{Credits, TransactionId};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// The signed-in user's credits wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub balance: Credits,
    #[serde(default)]
    pub lifetime_earnings: Credits,
}

/// Acknowledgement of a withdrawal request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalReceipt {
    #[serde(rename = "_id")]
    pub id: TransactionId,
    pub amount: Credits,
    pub status: String,
}

#[derive(Serialize)]
struct WithdrawalRequest {
    amount: Credits,
}

impl ApiClient {
    /// Fetch the wallet balance.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_wallet(&self) -> Result<Wallet, ApiError> {
        let envelope: Envelope<Wallet> = self.get("wallet").await?;
        Ok(envelope.into_inner())
    }

    /// Request a withdrawal of credits to the user's bank account.
    ///
    /// The backend validates the balance and bank verification state;
    /// the client does not pre-check either.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the withdrawal is refused.
    pub async fn request_withdrawal(
        &self,
        amount: Credits,
    ) -> Result<WithdrawalReceipt, ApiError> {
        let envelope: Envelope<WithdrawalReceipt> = self
            .post("wallet/withdrawals", &WithdrawalRequest { amount })
            .await?;
        Ok(envelope.into_inner())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use drwise_core::Decimal;

    #[test]
    fn test_wallet_decodes_numbers_and_strings() {
        let wallet: Wallet =
            serde_json::from_str(r#"{"balance": 1250.5, "lifetimeEarnings": "4300.00"}"#).unwrap();
        assert_eq!(wallet.balance.to_string(), "1250.50");
        assert_eq!(wallet.lifetime_earnings.to_string(), "4300.00");
    }

    #[test]
    fn test_wallet_lifetime_defaults_to_zero() {
        let wallet: Wallet = serde_json::from_str(r#"{"balance": 0}"#).unwrap();
        assert!(wallet.lifetime_earnings.is_zero());
    }

    #[test]
    fn test_withdrawal_request_serializes_amount() {
        let request = WithdrawalRequest {
            amount: Credits::new(Decimal::new(5005, 1)),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["amount"], "500.5");
    }

    #[test]
    fn test_receipt_decodes() {
        let json = r#"{"_id": "w-1", "amount": 500, "status": "processing"}"#;
        let receipt: WithdrawalReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.id, TransactionId::new("w-1"));
        assert_eq!(receipt.status, "processing");
    }
}
