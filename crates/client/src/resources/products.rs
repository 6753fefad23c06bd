//! Products resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::params::QueryParams;
use crate::resources::prices::Price;
use crate::types::{CustomData, Status};

/// A product snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Paddle ID, prefixed `pro_`.
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub tax_category: String,
    pub image_url: Option<String>,
    pub custom_data: Option<CustomData>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    /// Prices for this product; present only when requested via an
    /// `include` flag.
    #[serde(default)]
    pub prices: Option<Vec<Price>>,
}

/// Filters for [`Products::list`].
#[derive(Debug, Clone, Default)]
pub struct ListProductsParams {
    /// Embed each product's prices in the response.
    pub include_prices: bool,
    pub ids: Vec<String>,
    pub status: Vec<Status>,
    pub tax_category: Vec<String>,
}

impl ListProductsParams {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.set_list("id", &self.ids);
        if self.include_prices {
            q.set("include", "prices");
        }
        q.set_list("status", self.status.iter().map(Status::as_str));
        q.set_list("tax_category", &self.tax_category);
        q
    }
}

/// Access to the products endpoints.
pub struct Products<'c> {
    client: &'c Client,
}

impl<'c> Products<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Lists products matching `params`, fetching every page.
    pub async fn list(&self, params: &ListProductsParams) -> Result<Vec<Product>> {
        self.client
            .list_all(&params.to_query().append_to("products"))
            .await
    }

    /// Fetches a single product, optionally embedding its prices.
    pub async fn get(&self, id: &str, include_prices: bool) -> Result<Product> {
        let mut path = format!("products/{id}");
        if include_prices {
            path.push_str("?include=prices");
        }
        self.client.get_item(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_query() {
        let params = ListProductsParams {
            include_prices: true,
            status: vec![Status::Active, Status::Archived],
            ..Default::default()
        };
        assert_eq!(
            params.to_query().append_to("products"),
            "products?include=prices&status=active%2Carchived"
        );
    }

    #[test]
    fn test_product_decode_without_prices() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": "pro_1",
                "name": "Team plan",
                "description": null,
                "tax_category": "standard",
                "image_url": null,
                "custom_data": null,
                "status": "active",
                "created_at": "2023-08-21T09:59:12Z"
            }"#,
        )
        .unwrap();
        assert_eq!(product.name, "Team plan");
        assert!(product.prices.is_none());
    }
}
