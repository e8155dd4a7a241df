//! Payment gateway orders and confirmation.
//!
//! Subscription purchases settle through the backend's payment gateway:
//! create an order, hand its id to the gateway SDK in the mobile shell,
//! then confirm with the gateway's payment id and signature. The backend
//! verifies the signature server-side.

use drwise_core::{Credits, PaymentId};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// A pending payment order created on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    #[serde(rename = "_id")]
    pub id: PaymentId,
    pub amount: Credits,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Public key the mobile shell passes to the gateway SDK.
    #[serde(default)]
    pub gateway_key: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Gateway result handed back for server-side verification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub order: PaymentId,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
}

/// Outcome of a confirmed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub verified: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
struct OrderRequest {
    amount: Credits,
}

impl ApiClient {
    /// Create a payment order for the given amount.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn create_payment_order(&self, amount: Credits) -> Result<PaymentOrder, ApiError> {
        let envelope: Envelope<PaymentOrder> =
            self.post("payments/orders", &OrderRequest { amount }).await?;
        Ok(envelope.into_inner())
    }

    /// Confirm a gateway payment against its order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the signature does not
    /// verify.
    pub async fn confirm_payment(
        &self,
        confirmation: &PaymentConfirmation,
    ) -> Result<PaymentResult, ApiError> {
        let envelope: Envelope<PaymentResult> =
            self.post("payments/confirm", confirmation).await?;
        Ok(envelope.into_inner())
    }
}
