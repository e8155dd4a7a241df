//! Financial product categories (loans, insurance, cards, investments).

use drwise_core::CategoryId;
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// A product category shown on the home grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

impl ApiClient {
    /// List all product categories.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let envelope: Envelope<Vec<Category>> = self.get("categories").await?;
        Ok(envelope.into_inner())
    }

    /// Fetch a single category by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the category does not exist.
    pub async fn get_category(&self, id: &CategoryId) -> Result<Category, ApiError> {
        let envelope: Envelope<Category> = self.get(&format!("categories/{id}")).await?;
        Ok(envelope.into_inner())
    }
}
