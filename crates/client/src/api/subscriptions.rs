//! Subscription plans and the user's active subscription.

use chrono::{DateTime, Utc};
use drwise_core::{Credits, PlanId, SubscriptionId};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// A purchasable subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "_id")]
    pub id: PlanId,
    pub name: String,
    pub price: Credits,
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// The user's subscription to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: SubscriptionId,
    #[serde(default)]
    pub plan: Option<PlanId>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct SubscribeRequest<'a> {
    plan: &'a PlanId,
}

impl ApiClient {
    /// List available subscription plans.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        let envelope: Envelope<Vec<Plan>> = self.get("subscriptions/plans").await?;
        Ok(envelope.into_inner())
    }

    /// Subscribe the signed-in user to a plan.
    ///
    /// Payment is settled separately through
    /// [`ApiClient::create_payment_order`]; the backend activates the
    /// subscription once payment confirms.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the plan does not exist.
    pub async fn subscribe(&self, plan: &PlanId) -> Result<Subscription, ApiError> {
        let envelope: Envelope<Subscription> =
            self.post("subscriptions", &SubscribeRequest { plan }).await?;
        Ok(envelope.into_inner())
    }
}
