//! Financial products within a category.

use drwise_core::{CategoryId, Credits, ProductId};
use serde::{Deserialize, Serialize};

use crate::http::{ApiClient, ApiError};
use crate::models::Envelope;

/// A referrable financial product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub description: Option<String>,
    /// Partner institution offering the product.
    #[serde(default)]
    pub partner: Option<String>,
    /// Credits earned per converted referral.
    #[serde(default)]
    pub commission: Option<Credits>,
}

impl ApiClient {
    /// List products belonging to a category.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_products_by_category(
        &self,
        category: &CategoryId,
    ) -> Result<Vec<Product>, ApiError> {
        let envelope: Envelope<Vec<Product>> = self
            .get_with_query("products", &[("category", category.as_str())])
            .await?;
        Ok(envelope.into_inner())
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the product does not exist.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let envelope: Envelope<Product> = self.get(&format!("products/{id}")).await?;
        Ok(envelope.into_inner())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use drwise_core::Decimal;

    #[test]
    fn test_product_decodes() {
        let json = r#"{
            "_id": "p-1",
            "name": "Gold Credit Card",
            "category": "cat-2",
            "partner": "HDFC Bank",
            "commission": 250
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("p-1"));
        assert_eq!(product.category, Some(CategoryId::new("cat-2")));
        assert_eq!(product.partner.as_deref(), Some("HDFC Bank"));
        assert_eq!(
            product.commission,
            Some(Credits::new(Decimal::from(250)))
        );
    }

    #[test]
    fn test_product_decodes_without_commission() {
        let product: Product =
            serde_json::from_str(r#"{"_id": "p-2", "name": "Term Insurance"}"#).unwrap();
        assert!(product.commission.is_none());
        assert!(product.category.is_none());
    }
}
