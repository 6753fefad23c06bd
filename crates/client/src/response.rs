//! The standard response envelope shared by every API endpoint.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::{ApiError, Error, Result};

/// Cursor pagination metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    /// Number of items per page.
    #[serde(default)]
    pub per_page: u64,
    /// Absolute URL of the next page.
    #[serde(default)]
    pub next: String,
    /// Whether another page exists. The sole termination signal for
    /// pagination.
    #[serde(default)]
    pub has_more: bool,
    /// Server estimate of the total item count.
    #[serde(default)]
    pub estimated_total: u64,
}

/// Response metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    /// Server-assigned request ID.
    #[serde(default)]
    pub request_id: String,
    /// Present on list endpoints.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// The decoded response envelope.
///
/// `data` and `error` are mutually exclusive: the transport returns
/// [`Error::Api`] for any envelope with a non-null `error`, so an
/// `ApiResponse` reaching the caller always represents success.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    /// The untyped payload, decoded on demand.
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
    /// The error object, if the request failed.
    #[serde(default)]
    pub error: Option<ApiError>,
    /// Response metadata.
    #[serde(default)]
    pub meta: Meta,

    // HTTP context, filled in by the transport.
    #[serde(skip)]
    pub(crate) status: u16,
    #[serde(skip)]
    pub(crate) body: String,
}

impl ApiResponse {
    /// Decodes `data` into `T`, attaching the HTTP status and raw body on
    /// failure. An absent `data` decodes as JSON `null`.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self.data.as_deref().map(RawValue::get).unwrap_or("null");
        serde_json::from_str(raw).map_err(|source| Error::Decode {
            status: self.status,
            body: self.body.clone(),
            source,
        })
    }
}
