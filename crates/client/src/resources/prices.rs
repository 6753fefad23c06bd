//! Prices resource.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::params::QueryParams;
use crate::resources::products::Product;
use crate::resources::subscriptions::ScheduledChangeAction;
use crate::types::{CurrencyPrice, CustomData, MinMax, PaymentCollectionMode, Status, TimeInterval};

/// A per-country price override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyPriceOverride {
    pub country_codes: Vec<String>,
    pub unit_price: CurrencyPrice,
}

/// A price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    /// Paddle ID, prefixed `pri_`.
    pub id: String,
    pub product_id: String,
    pub description: String,
    pub name: Option<String>,
    /// Recurring billing cycle; absent for one-time prices.
    pub billing_cycle: Option<TimeInterval>,
    pub trial_period: Option<TimeInterval>,
    pub tax_mode: String,
    pub unit_price: CurrencyPrice,
    #[serde(default)]
    pub unit_price_overrides: Vec<CurrencyPriceOverride>,
    pub custom_data: Option<CustomData>,
    pub status: Status,
    pub quantity: MinMax,
    /// The owning product; present only when requested via an `include`
    /// flag.
    #[serde(default)]
    pub product: Option<Product>,
}

/// Filters for [`Prices::list`].
#[derive(Debug, Clone, Default)]
pub struct ListPricesParams {
    /// Embed each price's product in the response.
    pub include_product: bool,
    pub ids: Vec<String>,
    pub customer_ids: Vec<String>,
    pub address_ids: Vec<String>,
    pub collection_mode: Option<PaymentCollectionMode>,
    pub scheduled_change_action: Vec<ScheduledChangeAction>,
    pub status: Vec<Status>,
}

impl ListPricesParams {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        if self.include_product {
            q.set("include", "product");
        }
        q.set_list("id", &self.ids);
        q.set_list("customer_id", &self.customer_ids);
        q.set_list("address_id", &self.address_ids);
        if let Some(mode) = self.collection_mode {
            q.set("collection_mode", mode.as_str());
        }
        q.set_list(
            "scheduled_change_action",
            self.scheduled_change_action
                .iter()
                .map(ScheduledChangeAction::as_str),
        );
        q.set_list("status", self.status.iter().map(Status::as_str));
        q
    }
}

/// Access to the prices endpoints.
pub struct Prices<'c> {
    client: &'c Client,
}

impl<'c> Prices<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Lists prices matching `params`, fetching every page.
    pub async fn list(&self, params: &ListPricesParams) -> Result<Vec<Price>> {
        self.client
            .list_all(&params.to_query().append_to("prices"))
            .await
    }

    /// Fetches a single price, optionally embedding its product.
    pub async fn get(&self, id: &str, include_product: bool) -> Result<Price> {
        let mut path = format!("prices/{id}");
        if include_product {
            path.push_str("?include=product");
        }
        self.client.get_item(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_query() {
        let params = ListPricesParams {
            include_product: true,
            ids: vec!["pri_1".to_string()],
            collection_mode: Some(PaymentCollectionMode::Automatic),
            ..Default::default()
        };
        assert_eq!(
            params.to_query().append_to("prices"),
            "prices?include=product&id=pri_1&collection_mode=automatic"
        );
    }

    #[test]
    fn test_price_decode() {
        let price: Price = serde_json::from_str(
            r#"{
                "id": "pri_1",
                "product_id": "pro_1",
                "description": "Monthly",
                "name": "Monthly plan",
                "billing_cycle": {"frequency": 1, "interval": "month"},
                "trial_period": null,
                "tax_mode": "account_setting",
                "unit_price": {"amount": "1099", "currency_code": "USD"},
                "unit_price_overrides": [],
                "custom_data": null,
                "status": "active",
                "quantity": {"minimum": 1, "maximum": 100}
            }"#,
        )
        .unwrap();
        assert_eq!(price.unit_price.amount, "1099");
        assert!(price.billing_cycle.is_some());
        assert!(price.product.is_none());
    }
}
