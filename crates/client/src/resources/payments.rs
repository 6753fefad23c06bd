//! Payment attempt and tax types embedded in transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card details for a card payment method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(rename = "type")]
    pub card_type: String,
    pub last4: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cardholder_name: String,
}

/// The payment method used for an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub method_type: String,
    pub card: Option<CardDetails>,
}

/// A single attempt to collect payment for a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPaymentAttempt {
    pub payment_attempt_id: String,
    pub stored_payment_method_id: String,
    pub amount: String,
    pub status: String,
    pub error_code: Option<String>,
    pub method_details: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub captured_at: Option<DateTime<Utc>>,
}

/// Totals attributed to a single tax rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRateTotals {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
}

/// A tax rate applied to a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRate {
    pub tax_rate: String,
    pub totals: TaxRateTotals,
}
