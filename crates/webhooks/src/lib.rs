//! # Paddle Webhooks
//!
//! Verification of inbound Paddle Billing webhook notifications:
//! - Parsing of the `Paddle-Signature` header (`ts=<unix-seconds>;h1=<hex-digest>`)
//! - HMAC-SHA256 recomputation over `"<ts>:" + body` with the signing secret
//! - Constant-time digest comparison
//! - Decoding of the event envelope once the signature checks out
//!
//! ## Example
//!
//! ```rust,ignore
//! use paddle_webhooks::Verifier;
//!
//! let verifier = Verifier::new(signing_secret);
//! let event = verifier.parse_event(signature_header, &body)?;
//! match event.event_type.as_str() {
//!     "subscription.canceled" => { /* ... */ }
//!     _ => {}
//! }
//! ```

mod error;
mod event;
mod signature;
mod verifier;

pub use error::{WebhookError, WebhookResult};
pub use event::WebhookEvent;
pub use signature::Signature;
pub use verifier::{MAX_BODY_BYTES, Verifier, WebhookRequest};
