//! Subscriptions resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;
use crate::params::{Patch, QueryParams};
use crate::resources::prices::Price;
use crate::resources::transactions::{Transaction, TransactionDetails};
use crate::types::{CurrencyPrice, CustomData, PaymentCollectionMode, TimeInterval, TimePeriod};

/// Subscription lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Paused,
    Trialing,
}

impl SubscriptionStatus {
    /// Wire tag, as used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Trialing => "trialing",
        }
    }
}

/// A change scheduled to take effect at a future billing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledChangeAction {
    Cancel,
    Pause,
    Resume,
}

impl ScheduledChangeAction {
    /// Wire tag, as used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduledChangeAction::Cancel => "cancel",
            ScheduledChangeAction::Pause => "pause",
            ScheduledChangeAction::Resume => "resume",
        }
    }
}

/// How a subscription change is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationBillingMode {
    ProratedImmediately,
    ProratedNextBillingPeriod,
    FullImmediately,
    FullNextBillingPeriod,
    DoNotBill,
}

/// When a requested change takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveFrom {
    Immediately,
    NextBillingPeriod,
}

/// A discount applied to a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionDiscount {
    pub id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Invoicing details for manually-collected subscriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionBillingDetails {
    pub enable_checkout: bool,
    pub purchase_order_number: String,
    pub additional_information: Option<String>,
    pub payment_terms: TimeInterval,
}

/// A pending scheduled change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionScheduledChange {
    pub action: ScheduledChangeAction,
    pub effective_at: DateTime<Utc>,
    /// Only set when `action` is `pause`.
    pub resume_at: Option<DateTime<Utc>>,
}

/// Customer-facing management URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionManagementUrls {
    pub update_payment_method: Option<String>,
    pub cancel: String,
}

/// A line on a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub status: String,
    pub quantity: u32,
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub previously_billed_at: Option<DateTime<Utc>>,
    pub next_billed_at: Option<DateTime<Utc>>,
    pub trial_dates: Option<TimePeriod>,
    pub price: Price,
}

/// A subscription snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Paddle ID, prefixed `sub_`.
    pub id: String,
    pub status: SubscriptionStatus,
    pub customer_id: String,
    pub address_id: String,
    pub business_id: Option<String>,
    pub currency_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub first_billed_at: Option<DateTime<Utc>>,
    pub next_billed_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub discount: Option<SubscriptionDiscount>,
    pub collection_mode: PaymentCollectionMode,
    pub billing_details: Option<SubscriptionBillingDetails>,
    pub current_billing_period: Option<TimePeriod>,
    pub billing_cycle: TimeInterval,
    pub scheduled_change: Option<SubscriptionScheduledChange>,
    #[serde(default)]
    pub items: Vec<SubscriptionItem>,
    pub custom_data: Option<CustomData>,
    pub management_urls: Option<SubscriptionManagementUrls>,
}

/// Whether a previewed change credits or charges the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionChangeResultAction {
    Credit,
    Charge,
}

/// A transaction that a previewed update would create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionUpdateTransactionPreview {
    pub billing_period: TimePeriod,
    pub details: TransactionDetails,
    #[serde(default)]
    pub adjustments: Vec<serde_json::Value>,
}

/// Net result of a previewed update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyPriceAction {
    pub amount: String,
    pub currency_code: String,
    pub action: SubscriptionChangeResultAction,
}

/// Credit/charge summary for a previewed update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionUpdatePreviewSummary {
    pub credit: CurrencyPrice,
    pub charge: CurrencyPrice,
    pub result: CurrencyPriceAction,
}

/// Result of previewing an update without applying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionUpdatePreview {
    pub next_billed_at: Option<DateTime<Utc>>,
    pub update_summary: SubscriptionUpdatePreviewSummary,
    pub recurring_transaction_details: TransactionDetails,
    pub next_transaction: Option<SubscriptionUpdateTransactionPreview>,
    pub immediate_transaction: Option<SubscriptionUpdateTransactionPreview>,
}

/// Filters for [`Subscriptions::list`].
#[derive(Debug, Clone, Default)]
pub struct ListSubscriptionsParams {
    pub ids: Vec<String>,
    pub collection_mode: Option<PaymentCollectionMode>,
    pub status: Vec<SubscriptionStatus>,
    pub search: Option<String>,
}

impl ListSubscriptionsParams {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.set_list("id", &self.ids);
        if let Some(mode) = self.collection_mode {
            q.set("collection_mode", mode.as_str());
        }
        q.set_list("status", self.status.iter().map(SubscriptionStatus::as_str));
        if let Some(search) = &self.search {
            q.set("search", search.as_str());
        }
        q
    }
}

/// Body for [`Subscriptions::cancel`].
#[derive(Debug, Clone, Serialize)]
pub struct CancelSubscriptionParams {
    pub effective_from: EffectiveFrom,
}

/// An item line for a subscription update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionItem {
    pub price_id: String,
    pub quantity: u32,
}

/// A discount to apply in a subscription update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionDiscount {
    #[serde(rename = "id")]
    pub discount_id: String,
    pub effective_from: EffectiveFrom,
}

/// Body for [`Subscriptions::update`] and [`Subscriptions::preview_update`].
///
/// `Keep` fields are omitted from the PATCH body; `Clear` sends an explicit
/// `null` (used, for example, to drop a scheduled change).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSubscriptionParams {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub customer_id: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub address_id: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub business_id: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub currency_code: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub next_billed_at: Patch<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub discount: Patch<UpdateSubscriptionDiscount>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub collection_mode: Patch<PaymentCollectionMode>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub billing_details: Patch<SubscriptionBillingDetails>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub scheduled_change: Patch<SubscriptionScheduledChange>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub items: Patch<Vec<UpdateSubscriptionItem>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub custom_data: Patch<CustomData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proration_billing_mode: Option<ProrationBillingMode>,
}

/// Access to the subscriptions endpoints.
pub struct Subscriptions<'c> {
    client: &'c Client,
}

impl<'c> Subscriptions<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Lists subscriptions matching `params`, fetching every page.
    pub async fn list(&self, params: &ListSubscriptionsParams) -> Result<Vec<Subscription>> {
        self.client
            .list_all(&params.to_query().append_to("subscriptions"))
            .await
    }

    /// Fetches a single subscription.
    pub async fn get(&self, id: &str) -> Result<Subscription> {
        self.client.get_item(&format!("subscriptions/{id}")).await
    }

    /// Partially updates a subscription.
    pub async fn update(
        &self,
        id: &str,
        params: &UpdateSubscriptionParams,
    ) -> Result<Subscription> {
        self.client
            .patch_item(&format!("subscriptions/{id}"), params)
            .await
    }

    /// Previews an update without applying it.
    pub async fn preview_update(
        &self,
        id: &str,
        params: &UpdateSubscriptionParams,
    ) -> Result<SubscriptionUpdatePreview> {
        self.client
            .patch_item(&format!("subscriptions/{id}/preview"), params)
            .await
    }

    /// Cancels a subscription.
    pub async fn cancel(
        &self,
        id: &str,
        params: &CancelSubscriptionParams,
    ) -> Result<Subscription> {
        self.client
            .post_item(&format!("subscriptions/{id}/cancel"), params)
            .await
    }

    /// Drops a pending scheduled cancellation by patching
    /// `scheduled_change` to `null`.
    pub async fn remove_scheduled_cancellation(&self, id: &str) -> Result<Subscription> {
        let params = UpdateSubscriptionParams {
            scheduled_change: Patch::Clear,
            ..Default::default()
        };
        self.update(id, &params).await
    }

    /// Fetches the zero-amount transaction used to collect a new payment
    /// method for this subscription.
    pub async fn get_update_payment_method_transaction(&self, id: &str) -> Result<Transaction> {
        self.client
            .get_item(&format!("subscriptions/{id}/update-payment-method-transaction"))
            .await
    }
}
