//! Customers resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::params::{Patch, QueryParams};
use crate::types::{CustomData, Status};

/// A customer snapshot.
///
/// Entities are immutable value snapshots; every change goes back through
/// an explicit [`Customers::update`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Paddle ID, prefixed `ctm_`.
    pub id: String,
    pub status: Status,
    pub custom_data: Option<CustomData>,
    /// Full name, if provided.
    pub name: Option<String>,
    pub email: String,
    pub marketing_consent: bool,
    pub locale: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for [`Customers::list`].
#[derive(Debug, Clone, Default)]
pub struct ListCustomersParams {
    /// Restrict to these customer IDs.
    pub ids: Vec<String>,
    /// Restrict to these statuses.
    pub status: Vec<Status>,
    /// Full-text search over names and emails.
    pub search: Option<String>,
}

impl ListCustomersParams {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.set_list("id", &self.ids);
        q.set_list("status", self.status.iter().map(Status::as_str));
        if let Some(search) = &self.search {
            q.set("search", search.as_str());
        }
        q
    }
}

/// Body for [`Customers::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCustomerParams {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Body for [`Customers::update`].
///
/// `Keep` fields are omitted from the PATCH body and left unchanged by the
/// API; `Clear` sends an explicit `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCustomerParams {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub email: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub custom_data: Patch<CustomData>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub locale: Patch<String>,
}

/// Access to the customers endpoints.
pub struct Customers<'c> {
    client: &'c Client,
}

impl<'c> Customers<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Lists customers matching `params`, fetching every page.
    pub async fn list(&self, params: &ListCustomersParams) -> Result<Vec<Customer>> {
        self.client
            .list_all(&params.to_query().append_to("customers"))
            .await
    }

    /// Fetches a single customer.
    pub async fn get(&self, id: &str) -> Result<Customer> {
        self.client.get_item(&format!("customers/{id}")).await
    }

    /// Creates a customer.
    pub async fn create(&self, params: &CreateCustomerParams) -> Result<Customer> {
        self.client.post_item("customers", params).await
    }

    /// Partially updates a customer.
    pub async fn update(&self, id: &str, params: &UpdateCustomerParams) -> Result<Customer> {
        self.client
            .patch_item(&format!("customers/{id}"), params)
            .await
    }
}
