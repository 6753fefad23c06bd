//! Transactions resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::params::QueryParams;
use crate::resources::customers::Customer;
use crate::resources::payments::{TaxRate, TransactionPaymentAttempt};
use crate::resources::prices::Price;
use crate::resources::products::Product;
use crate::types::{CurrencyPrice, CustomData, PaymentCollectionMode, TimeInterval, TimePeriod};

/// Transaction lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Draft,
    Ready,
    Billed,
    Paid,
    Completed,
    Canceled,
    PastDue,
}

impl TransactionStatus {
    /// Wire tag, as used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Draft => "draft",
            TransactionStatus::Ready => "ready",
            TransactionStatus::Billed => "billed",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Canceled => "canceled",
            TransactionStatus::PastDue => "past_due",
        }
    }
}

/// How a charge was prorated across a billing period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proration {
    pub rate: String,
    pub billing_period: TimePeriod,
}

/// An item line on a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItem {
    pub price: Price,
    pub quantity: u32,
    pub proration: Option<Proration>,
}

/// Invoicing details for manually-collected transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionBillingDetails {
    pub enable_checkout: bool,
    pub payment_terms: TimeInterval,
    pub purchase_order_number: String,
    pub additional_information: Option<String>,
}

/// Transaction-level totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionTotals {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    pub credit: String,
    pub balance: String,
    pub grand_total: String,
    pub fee: Option<String>,
    pub earnings: Option<String>,
    pub currency_code: String,
}

/// Totals after adjustments were applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionAdjustedTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub grand_total: String,
    pub fee: Option<String>,
    pub earnings: Option<String>,
    pub currency_code: String,
}

/// Totals converted into the payout currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPayoutTotals {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    pub credit: String,
    pub balance: String,
    pub grand_total: String,
    pub fee: String,
    pub earnings: String,
    pub currency_code: String,
}

/// Chargeback fee within adjusted payout totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionChargebackFee {
    pub amount: String,
    pub original: Option<CurrencyPrice>,
}

/// Payout totals after adjustments were applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionAdjustedPayoutTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub fee: String,
    pub chargeback_fee: TransactionChargebackFee,
    pub earnings: String,
    pub currency_code: String,
}

/// Totals for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLineItemTotals {
    pub subtotal: String,
    pub tax: String,
    pub discount: String,
    pub total: String,
}

/// A calculated line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLineItem {
    pub id: String,
    pub price_id: String,
    pub quantity: u32,
    pub proration: Option<Proration>,
    pub tax_rate: String,
    pub totals: TransactionLineItemTotals,
    pub unit_totals: TransactionLineItemTotals,
    pub product: Product,
}

/// Calculated details for a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetails {
    #[serde(default)]
    pub tax_rates_used: Vec<TaxRate>,
    pub totals: TransactionTotals,
    pub adjusted_totals: Option<TransactionAdjustedTotals>,
    pub payout_totals: Option<TransactionPayoutTotals>,
    pub adjusted_payout_totals: Option<TransactionAdjustedPayoutTotals>,
    #[serde(default)]
    pub line_items: Vec<TransactionLineItem>,
}

/// Checkout details for a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkout {
    pub url: Option<String>,
}

/// A transaction snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Paddle ID, prefixed `txn_`.
    pub id: String,
    pub status: TransactionStatus,

    pub customer_id: Option<String>,
    pub address_id: Option<String>,
    pub business_id: Option<String>,
    pub subscription_id: Option<String>,
    pub discount_id: Option<String>,
    pub invoice_id: Option<String>,
    pub invoice_number: Option<String>,

    pub currency_code: String,
    pub origin: String,

    pub collection_mode: PaymentCollectionMode,
    pub billing_details: Option<TransactionBillingDetails>,
    pub billing_period: Option<TimePeriod>,

    #[serde(default)]
    pub items: Vec<TransactionItem>,
    pub details: TransactionDetails,
    #[serde(default)]
    pub payments: Vec<TransactionPaymentAttempt>,
    pub checkout: Option<Checkout>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub billed_at: Option<DateTime<Utc>>,

    pub custom_data: Option<CustomData>,

    // Adjustments and related entities are passed through undecoded; their
    // schemas are only present under `include` flags.
    #[serde(default)]
    pub adjustments: Vec<Value>,
    #[serde(default)]
    pub adjustments_totals: Option<Value>,

    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub business: Option<Value>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub discount: Option<Value>,
}

/// Related entities to embed in a transaction response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionInclude {
    pub address: bool,
    pub adjustment: bool,
    pub adjustment_totals: bool,
    pub business: bool,
    pub customer: bool,
    pub discount: bool,
}

impl TransactionInclude {
    /// The comma-joined `include` query value; empty when nothing is
    /// selected.
    pub fn to_query_value(&self) -> String {
        let mut includes = Vec::new();
        if self.address {
            includes.push("address");
        }
        if self.adjustment {
            includes.push("adjustment");
        }
        if self.adjustment_totals {
            includes.push("adjustment_totals");
        }
        if self.business {
            includes.push("business");
        }
        if self.customer {
            includes.push("customer");
        }
        if self.discount {
            includes.push("discount");
        }
        includes.join(",")
    }

    fn is_empty(&self) -> bool {
        *self == TransactionInclude::default()
    }
}

/// Filters for [`Transactions::list`].
#[derive(Debug, Clone, Default)]
pub struct ListTransactionsParams {
    pub ids: Vec<String>,
    pub include: Option<TransactionInclude>,
    pub collection_mode: Option<PaymentCollectionMode>,
    pub customer_ids: Vec<String>,
    pub subscription_ids: Vec<String>,
    pub invoice_numbers: Vec<String>,
    pub status: Vec<TransactionStatus>,
    /// RFC 3339 instant or comparison filter, passed through verbatim.
    pub created_at: Option<String>,
    /// RFC 3339 instant or comparison filter, passed through verbatim.
    pub billed_at: Option<String>,
}

impl ListTransactionsParams {
    fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.set_list("id", &self.ids);
        if let Some(include) = &self.include {
            let value = include.to_query_value();
            if !value.is_empty() {
                q.set("include", value);
            }
        }
        if let Some(mode) = self.collection_mode {
            q.set("collection_mode", mode.as_str());
        }
        q.set_list("customer_id", &self.customer_ids);
        q.set_list("subscription_id", &self.subscription_ids);
        q.set_list("status", self.status.iter().map(TransactionStatus::as_str));
        q.set_list("invoice_number", &self.invoice_numbers);
        if let Some(created_at) = &self.created_at {
            q.set("created_at", created_at.as_str());
        }
        if let Some(billed_at) = &self.billed_at {
            q.set("billed_at", billed_at.as_str());
        }
        q
    }
}

/// Access to the transactions endpoints.
pub struct Transactions<'c> {
    client: &'c Client,
}

impl<'c> Transactions<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Lists transactions matching `params`, fetching every page.
    pub async fn list(&self, params: &ListTransactionsParams) -> Result<Vec<Transaction>> {
        self.client
            .list_all(&params.to_query().append_to("transactions"))
            .await
    }

    /// Fetches a single transaction, optionally embedding related
    /// entities.
    pub async fn get(&self, id: &str, include: Option<&TransactionInclude>) -> Result<Transaction> {
        let mut q = QueryParams::new();
        if let Some(include) = include {
            if !include.is_empty() {
                q.set("include", include.to_query_value());
            }
        }
        self.client
            .get_item(&q.append_to(&format!("transactions/{id}")))
            .await
    }
}
