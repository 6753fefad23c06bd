//! # Paddle Client
//!
//! Typed async client for the Paddle Billing API:
//! - Bearer-authenticated JSON transport with typed error decoding
//! - Transparent cursor pagination for list endpoints
//! - Typed resources: customers, products, prices, subscriptions,
//!   transactions
//! - Webhook verification via the re-exported [`webhooks`] crate
//!
//! ## Example
//!
//! ```rust,ignore
//! use paddle_client::{Client, Config};
//!
//! let client = Client::new(
//!     Config::builder()
//!         .api_key(std::env::var("PADDLE_API_KEY")?)
//!         .sandbox()
//!         .build(),
//! );
//!
//! let customers = client.customers().list(&Default::default()).await?;
//! let subscription = client.subscriptions().get("sub_123").await?;
//! ```

mod client;
mod config;
mod error;
mod params;
mod response;
mod types;

pub mod resources;

pub use client::Client;
pub use config::{Config, ConfigBuilder, Environment};
pub use error::{ApiError, Error, ErrorType, Result};
pub use params::{Patch, QueryParams};
pub use response::{ApiResponse, Meta, Pagination};
pub use resources::*;
pub use types::{
    CurrencyPrice, CustomData, MinMax, PaymentCollectionMode, Status, TimeInterval, TimePeriod,
    TimePeriodInterval,
};

pub use paddle_webhooks as webhooks;
