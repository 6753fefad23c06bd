//! The webhook event envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WebhookResult;

/// A decoded webhook event.
///
/// `data` is the resource snapshot the event describes. Its schema depends
/// on `event_type`, which this crate does not interpret; use [`WebhookEvent::data_as`]
/// to decode it once the caller has dispatched on the type string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Unique event ID.
    pub event_id: String,
    /// Event type string, e.g. `subscription.updated`.
    pub event_type: String,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
    /// ID of the notification delivering this event.
    #[serde(default)]
    pub notification_id: String,
    /// The event payload, left undecoded.
    #[serde(default)]
    pub data: Value,
}

impl WebhookEvent {
    /// Decodes the opaque `data` payload into a concrete type.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> WebhookResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}
