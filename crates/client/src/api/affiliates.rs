//! Affiliate partner programs (external offers with tracking links).

use drwise_core::AffiliateId;
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// An affiliate partner offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affiliate {
    #[serde(rename = "_id")]
    pub id: AffiliateId,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Outbound tracking link the shell opens in a browser.
    #[serde(default)]
    pub tracking_url: Option<String>,
}

impl ApiClient {
    /// List affiliate partner offers.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_affiliates(&self) -> Result<Vec<Affiliate>, ApiError> {
        let envelope: Envelope<Vec<Affiliate>> = self.get("affiliates").await?;
        Ok(envelope.into_inner())
    }
}
