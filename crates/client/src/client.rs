//! The API client: transport core and pagination engine.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use paddle_webhooks::Verifier;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resources::{Customers, Prices, Products, Subscriptions, Transactions};
use crate::response::ApiResponse;

/// Typed async client for the Paddle Billing API.
///
/// Cheap to clone; clones share the underlying connection pool. The client
/// holds no mutable state, so a single instance can serve many concurrent
/// tasks. Cancellation is cooperative: dropping an in-flight future aborts
/// the request, and timeouts configured on the HTTP client surface as
/// [`Error::Transport`] with [`Error::is_timeout`] set.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    webhook_secret: Option<Vec<u8>>,
}

impl Client {
    /// Creates a client from the given configuration.
    pub fn new(config: Config) -> Self {
        let base_url = config.resolved_base_url();
        Self {
            http: config.http_client.unwrap_or_default(),
            base_url,
            api_key: config.api_key,
            webhook_secret: config.webhook_secret.map(String::into_bytes),
        }
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ==================== Resources ====================

    /// Access to the customers endpoints.
    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    /// Access to the products endpoints.
    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Access to the prices endpoints.
    pub fn prices(&self) -> Prices<'_> {
        Prices::new(self)
    }

    /// Access to the subscriptions endpoints.
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    /// Access to the transactions endpoints.
    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(self)
    }

    /// Returns a webhook verifier bound to the configured signing secret.
    pub fn webhook_verifier(&self) -> Result<Verifier> {
        match &self.webhook_secret {
            Some(secret) => Ok(Verifier::new(secret.clone())),
            None => Err(Error::config("webhook secret is not configured")),
        }
    }

    /// Issues a cheap authenticated request to validate the API key.
    pub async fn test_authentication(&self) -> Result<()> {
        self.send(Method::GET, "event-types", None).await.map(|_| ())
    }

    // ==================== Transport core ====================

    /// Executes a request and returns the decoded envelope.
    ///
    /// `path` is resolved against the base URL and may already carry a
    /// query string. The bearer credential is attached to every request; a
    /// JSON content type only when a body is supplied. An envelope with a
    /// non-null `error` becomes [`Error::Api`], enriched with the request
    /// method, path, and HTTP status; its `data` is never decoded.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<ApiResponse> {
        let url = reqwest::Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| Error::config(format!("invalid request url: {e}")))?;

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", self.api_key));
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!(method = %method, path, status, "api request");

        let mut res: ApiResponse = serde_json::from_str(&text).map_err(|source| Error::Decode {
            status,
            body: text.clone(),
            source,
        })?;
        res.status = status;
        res.body = text;

        if let Some(mut api_err) = res.error.take() {
            api_err.method = method.to_string();
            api_err.path = path.to_string();
            api_err.status = status;
            return Err(Error::Api(api_err));
        }

        Ok(res)
    }

    /// Executes a request and decodes the envelope's `data` into `T`.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(Error::Encode)?;
        let res = self.send(method, path, body).await?;
        res.decode_data()
    }

    /// GET a single item.
    pub async fn get_item<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// POST a body and decode the returned item.
    pub async fn post_item<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PATCH a body and decode the returned item.
    pub async fn patch_item<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    // ==================== Pagination engine ====================

    /// Fetches every page of a list endpoint.
    ///
    /// Follows the server's `next` cursor until `has_more` is false,
    /// accumulating items in server order. The next request path is the
    /// `next` URL with the base-URL prefix stripped, so every page goes
    /// through this client's auth and routing. Pages are fetched strictly
    /// sequentially; the first failure aborts the listing and discards
    /// anything accumulated.
    pub async fn list_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut current = path.to_string();

        loop {
            let res = self.send(Method::GET, &current, None).await?;
            // An absent or empty page is an empty contribution, not a
            // termination signal; only `has_more` ends the loop.
            let page: Option<Vec<T>> = res.decode_data()?;
            items.extend(page.unwrap_or_default());

            match res.meta.pagination {
                Some(p) if p.has_more => {
                    current = p
                        .next
                        .strip_prefix(&self.base_url)
                        .unwrap_or(&p.next)
                        .to_string();
                }
                _ => break,
            }
        }

        Ok(items)
    }
}
