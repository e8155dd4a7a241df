//! Referral leads: customers referred to a product by the signed-in user.

use chrono::{DateTime, Utc};
use drwise_core::{LeadId, LeadStatus, PhoneNumber, ProductId};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// Payload for submitting a new lead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub product: ProductId,
    pub customer_name: String,
    pub customer_phone: PhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A submitted lead and its lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: LeadId,
    #[serde(default)]
    pub product: Option<ProductId>,
    pub customer_name: String,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    /// Submit a new lead.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the lead is rejected.
    pub async fn create_lead(&self, lead: &NewLead) -> Result<Lead, ApiError> {
        let envelope: Envelope<Lead> = self.post("leads", lead).await?;
        Ok(envelope.into_inner())
    }

    /// List the signed-in user's leads.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_leads(&self) -> Result<Vec<Lead>, ApiError> {
        let envelope: Envelope<Vec<Lead>> = self.get("leads").await?;
        Ok(envelope.into_inner())
    }

    /// Fetch a single lead by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the lead does not exist.
    pub async fn get_lead(&self, id: &LeadId) -> Result<Lead, ApiError> {
        let envelope: Envelope<Lead> = self.get(&format!("leads/{id}")).await?;
        Ok(envelope.into_inner())
    }
}
