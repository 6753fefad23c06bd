//! Parsing and HMAC validation of the `Paddle-Signature` header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{WebhookError, WebhookResult};

type HmacSha256 = Hmac<Sha256>;

/// A parsed `Paddle-Signature` header value.
///
/// The header carries two `;`-separated `key=value` elements,
/// `ts=<unix-seconds>;h1=<hex-digest>`. Parsing is positional: the first
/// value is taken as the timestamp and the second as the digest, without
/// checking the literal keys. The timestamp is kept verbatim as a string;
/// it is an HMAC input, not a number this crate interprets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    timestamp: String,
    provided: String,
}

impl Signature {
    /// Parses a raw header value.
    pub fn parse(raw: &str) -> WebhookResult<Self> {
        let elements: Vec<&str> = raw.split(';').collect();
        if elements.len() != 2 {
            return Err(WebhookError::InvalidHeader);
        }
        let ts: Vec<&str> = elements[0].split('=').collect();
        let h1: Vec<&str> = elements[1].split('=').collect();
        if ts.len() != 2 || h1.len() != 2 {
            return Err(WebhookError::InvalidHeader);
        }
        Ok(Signature {
            timestamp: ts[1].to_string(),
            provided: h1[1].to_string(),
        })
    }

    /// Recomputes the HMAC-SHA256 of `"<timestamp>:" + body` with `key`
    /// and compares it to the provided digest.
    pub fn verify(&self, key: &[u8], body: &[u8]) -> WebhookResult<()> {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
        mac.update(self.timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        let expected = hex::encode(mac.finalize().into_bytes());

        if !constant_time_eq(expected.as_bytes(), self.provided.as_bytes()) {
            tracing::debug!("webhook signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }
        Ok(())
    }

    /// The timestamp element, verbatim.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(key: &[u8], timestamp: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(key).unwrap();
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_parse_valid_header() {
        let sig = Signature::parse("ts=1718193600;h1=abcdef0123456789").unwrap();
        assert_eq!(sig.timestamp(), "1718193600");
        assert_eq!(sig.provided, "abcdef0123456789");
    }

    #[test]
    fn test_parse_ignores_literal_keys() {
        // Positional parsing: unexpected keys still yield a signature.
        let sig = Signature::parse("foo=123;bar=cafe").unwrap();
        assert_eq!(sig.timestamp(), "123");
        assert_eq!(sig.provided, "cafe");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(
            Signature::parse("ts=123"),
            Err(WebhookError::InvalidHeader)
        );
    }

    #[test]
    fn test_parse_rejects_extra_elements() {
        assert_eq!(
            Signature::parse("ts=1;h1=2;h2=3"),
            Err(WebhookError::InvalidHeader)
        );
    }

    #[test]
    fn test_parse_rejects_missing_equals() {
        assert_eq!(
            Signature::parse("ts123;h1=2"),
            Err(WebhookError::InvalidHeader)
        );
        assert_eq!(
            Signature::parse("ts=123;h12"),
            Err(WebhookError::InvalidHeader)
        );
    }

    #[test]
    fn test_parse_rejects_double_equals() {
        assert_eq!(
            Signature::parse("ts=1=2;h1=3"),
            Err(WebhookError::InvalidHeader)
        );
    }

    #[test]
    fn test_parse_empty_header() {
        assert_eq!(Signature::parse(""), Err(WebhookError::InvalidHeader));
    }

    #[test]
    fn test_verify_roundtrip() {
        let key = b"secret-key";
        let body = b"{\"event_id\":\"evt_1\"}";
        let digest = sign(key, "1718193600", body);

        let sig = Signature::parse(&format!("ts=1718193600;h1={digest}")).unwrap();
        assert!(sig.verify(key, body).is_ok());
    }

    #[test]
    fn test_verify_rejects_tampered_body() {
        let key = b"secret-key";
        let digest = sign(key, "1718193600", b"original");

        let sig = Signature::parse(&format!("ts=1718193600;h1={digest}")).unwrap();
        assert_eq!(
            sig.verify(key, b"originaX"),
            Err(WebhookError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_rejects_tampered_timestamp() {
        let key = b"secret-key";
        let body = b"payload";
        let digest = sign(key, "1718193600", body);

        let sig = Signature::parse(&format!("ts=1718193601;h1={digest}")).unwrap();
        assert_eq!(sig.verify(key, body), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_verify_rejects_tampered_digest() {
        let key = b"secret-key";
        let body = b"payload";
        let mut digest = sign(key, "1718193600", body);
        // Flip the last hex character.
        let last = digest.pop().unwrap();
        digest.push(if last == '0' { '1' } else { '0' });

        let sig = Signature::parse(&format!("ts=1718193600;h1={digest}")).unwrap();
        assert_eq!(sig.verify(key, body), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let body = b"payload";
        let digest = sign(b"key-a", "1718193600", body);

        let sig = Signature::parse(&format!("ts=1718193600;h1={digest}")).unwrap();
        assert_eq!(sig.verify(b"key-b", body), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_verify_rejects_uppercase_digest() {
        // Digest comparison is against the lowercase hex encoding.
        let key = b"secret-key";
        let body = b"payload";
        let digest = sign(key, "1718193600", body).to_uppercase();

        let sig = Signature::parse(&format!("ts=1718193600;h1={digest}")).unwrap();
        assert_eq!(sig.verify(key, body), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }
}
