//! Wallet transaction history.

use chrono::{DateTime, Utc};
use drwise_core::{Credits, TransactionId, TransactionKind};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// A single credit or debit entry in the wallet ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount: Credits,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    /// List the signed-in user's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let envelope: Envelope<Vec<Transaction>> = self.get("transactions").await?;
        Ok(envelope.into_inner())
    }
}
