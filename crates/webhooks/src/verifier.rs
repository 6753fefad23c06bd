//! Webhook verifier for authenticating inbound notifications.

use crate::error::{WebhookError, WebhookResult};
use crate::event::WebhookEvent;
use crate::signature::Signature;

/// Maximum number of body bytes fed to the HMAC.
///
/// Bytes beyond the cap are ignored, not rejected; the cap bounds the
/// worst-case memory and hashing cost of an untrusted request.
pub const MAX_BODY_BYTES: usize = 65536;

/// Verifies inbound webhook requests against a signing secret.
///
/// Stateless per call: parse the signature header, recompute the HMAC over
/// the raw body, compare, and only then decode the event envelope.
pub struct Verifier {
    secret: Vec<u8>,
}

impl Verifier {
    /// Creates a verifier with the raw signing secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature header against the raw body.
    pub fn verify(&self, signature_header: &str, body: &[u8]) -> WebhookResult<()> {
        let sig = Signature::parse(signature_header)?;
        sig.verify(&self.secret, capped(body))
    }

    /// Verifies the signature and decodes the event envelope.
    pub fn parse_event(&self, signature_header: &str, body: &[u8]) -> WebhookResult<WebhookEvent> {
        let body = capped(body);
        let sig = Signature::parse(signature_header)?;
        sig.verify(&self.secret, body)?;
        Ok(serde_json::from_slice(body)?)
    }

    /// Verifies a request through a [`WebhookRequest`] adapter.
    pub fn verify_request<R: WebhookRequest>(&self, req: &R) -> WebhookResult<()> {
        let signature = req.signature().ok_or(WebhookError::InvalidHeader)?;
        self.verify(signature, req.body())
    }

    /// Verifies and decodes a request through a [`WebhookRequest`] adapter.
    pub fn parse_request<R: WebhookRequest>(&self, req: &R) -> WebhookResult<WebhookEvent> {
        let signature = req.signature().ok_or(WebhookError::InvalidHeader)?;
        self.parse_event(signature, req.body())
    }
}

/// Adapter trait for extracting webhook data from an HTTP request.
///
/// Implementations must hand over a re-readable copy of the body so that
/// the original stream stays available to other consumers.
pub trait WebhookRequest {
    /// The `Paddle-Signature` header value, if present.
    fn signature(&self) -> Option<&str>;

    /// The raw body bytes.
    fn body(&self) -> &[u8];
}

fn capped(body: &[u8]) -> &[u8] {
    &body[..body.len().min(MAX_BODY_BYTES)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    fn header_for(secret: &[u8], timestamp: &str, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        format!("ts={timestamp};h1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_verify_ok() {
        let secret = b"pdl_ntfset_secret";
        let body = br#"{"event_id":"evt_1"}"#;
        let verifier = Verifier::new(secret.as_slice());

        let header = header_for(secret, "1718193600", body);
        assert!(verifier.verify(&header, body).is_ok());
    }

    #[test]
    fn test_parse_event_ok() {
        let secret = b"pdl_ntfset_secret";
        let body = br#"{
            "event_id": "evt_1",
            "event_type": "subscription.canceled",
            "occurred_at": "2024-06-12T09:59:12Z",
            "notification_id": "ntf_1",
            "data": {"id": "sub_1"}
        }"#;
        let verifier = Verifier::new(secret.as_slice());

        let header = header_for(secret, "1718193600", body);
        let event = verifier.parse_event(&header, body).unwrap();
        assert_eq!(event.event_type, "subscription.canceled");
        assert_eq!(event.data["id"], "sub_1");
    }

    #[test]
    fn test_parse_event_rejects_before_decoding() {
        // A malformed header must fail before the body is ever decoded.
        let verifier = Verifier::new(b"secret".as_slice());
        assert_eq!(
            verifier.parse_event("garbage", b"not json at all"),
            Err(WebhookError::InvalidHeader)
        );
    }

    #[test]
    fn test_parse_event_invalid_payload() {
        let secret = b"secret";
        let body = b"not json";
        let verifier = Verifier::new(secret.as_slice());

        let header = header_for(secret, "1718193600", body);
        assert!(matches!(
            verifier.parse_event(&header, body),
            Err(WebhookError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_body_truncated_at_cap() {
        // A body longer than the cap is hashed over its first
        // MAX_BODY_BYTES bytes only.
        let secret = b"secret";
        let mut body = vec![b'a'; MAX_BODY_BYTES + 1024];
        let verifier = Verifier::new(secret.as_slice());

        let header = header_for(secret, "1718193600", &body[..MAX_BODY_BYTES]);
        assert!(verifier.verify(&header, &body).is_ok());

        // Tampering within the cap is still detected.
        body[0] = b'b';
        assert_eq!(
            verifier.verify(&header, &body),
            Err(WebhookError::InvalidSignature)
        );
    }

    #[test]
    fn test_bytes_beyond_cap_do_not_affect_verification() {
        let secret = b"secret";
        let body = vec![b'a'; MAX_BODY_BYTES];
        let header = header_for(secret, "1718193600", &body);
        let verifier = Verifier::new(secret.as_slice());

        let mut extended = body.clone();
        extended.extend_from_slice(b"trailing garbage");
        assert!(verifier.verify(&header, &extended).is_ok());
    }

    struct FakeRequest {
        signature: Option<String>,
        body: Vec<u8>,
    }

    impl WebhookRequest for FakeRequest {
        fn signature(&self) -> Option<&str> {
            self.signature.as_deref()
        }

        fn body(&self) -> &[u8] {
            &self.body
        }
    }

    #[test]
    fn test_verify_request_missing_header() {
        let verifier = Verifier::new(b"secret".as_slice());
        let req = FakeRequest {
            signature: None,
            body: b"{}".to_vec(),
        };
        assert_eq!(
            verifier.verify_request(&req),
            Err(WebhookError::InvalidHeader)
        );
    }

    #[test]
    fn test_parse_request_ok() {
        let secret = b"secret";
        let body = br#"{
            "event_id": "evt_9",
            "event_type": "price.updated",
            "occurred_at": "2024-06-12T09:59:12Z",
            "notification_id": "ntf_9",
            "data": {}
        }"#
        .to_vec();
        let verifier = Verifier::new(secret.as_slice());
        let req = FakeRequest {
            signature: Some(header_for(secret, "1718193600", &body)),
            body,
        };

        let event = verifier.parse_request(&req).unwrap();
        assert_eq!(event.event_id, "evt_9");
    }
}
