//! Client configuration.

use crate::error::{Error, Result};

/// Paddle API environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// The live API.
    #[default]
    Production,
    /// The sandbox API for test accounts.
    Sandbox,
}

impl Environment {
    /// Base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.paddle.com/",
            Environment::Sandbox => "https://sandbox-api.paddle.com/",
        }
    }
}

/// Client configuration.
///
/// Immutable once the client is built; shared read-only by every call.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Environment to route requests to.
    pub environment: Environment,
    /// Bearer credential sent with every request.
    pub api_key: String,
    /// Signing secret for inbound webhooks.
    pub webhook_secret: Option<String>,
    /// Base URL override for tests and proxies. Takes precedence over
    /// `environment` when set.
    pub base_url: Option<String>,
    /// HTTP client override; a default client is built when absent.
    pub http_client: Option<reqwest::Client>,
}

impl Config {
    /// Creates a production configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Returns a configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Loads configuration from the environment.
    ///
    /// Reads `PADDLE_API_KEY` (required), `PADDLE_WEBHOOK_SECRET`, and
    /// `PADDLE_SANDBOX` (`1` or `true` selects the sandbox).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PADDLE_API_KEY")
            .map_err(|_| Error::config("PADDLE_API_KEY is not set"))?;
        let webhook_secret = std::env::var("PADDLE_WEBHOOK_SECRET").ok();
        let sandbox = std::env::var("PADDLE_SANDBOX")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            environment: if sandbox {
                Environment::Sandbox
            } else {
                Environment::Production
            },
            api_key,
            webhook_secret,
            base_url: None,
            http_client: None,
        })
    }

    /// The effective base URL, normalized to end with a slash.
    pub(crate) fn resolved_base_url(&self) -> String {
        let mut base = self
            .base_url
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string());
        if !base.ends_with('/') {
            base.push('/');
        }
        base
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = api_key.into();
        self
    }

    /// Sets the environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Routes requests to the sandbox environment.
    pub fn sandbox(self) -> Self {
        self.environment(Environment::Sandbox)
    }

    /// Sets the webhook signing secret.
    pub fn webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.webhook_secret = Some(secret.into());
        self
    }

    /// Overrides the base URL. Intended for tests and proxies.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Supplies a preconfigured HTTP client, e.g. one with timeouts.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.config.http_client = Some(client);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}
