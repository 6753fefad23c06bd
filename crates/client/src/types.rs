//! Wire types shared across resources.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form key/value metadata attached to a resource.
pub type CustomData = HashMap<String, serde_json::Value>;

/// Catalog entity status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Archived,
}

impl Status {
    /// Wire tag, as used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Archived => "archived",
        }
    }
}

/// How payment is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCollectionMode {
    /// Charged automatically against a stored payment method.
    Automatic,
    /// Invoiced and paid manually.
    Manual,
}

impl PaymentCollectionMode {
    /// Wire tag, as used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentCollectionMode::Automatic => "automatic",
            PaymentCollectionMode::Manual => "manual",
        }
    }
}

/// Billing interval unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriodInterval {
    Day,
    Week,
    Month,
    Year,
}

/// A billing frequency, e.g. every 1 month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub frequency: u32,
    pub interval: TimePeriodInterval,
}

/// A bounded period of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Inclusive quantity bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinMax {
    pub minimum: u32,
    pub maximum: u32,
}

/// An amount in a currency's lowest denomination, e.g. `"1099"` USD cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPrice {
    pub amount: String,
    pub currency_code: String,
}
