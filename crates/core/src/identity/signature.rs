//! Webhook signature verification.
//!
//! The identity provider signs `"{id}.{timestamp}.{payload}"` with
//! HMAC-SHA256 under a pre-shared secret (`whsec_` + base64 key) and sends
//! the MAC base64-encoded in a `v1,<mac>` header entry. Verification fails
//! closed: any missing header, malformed field, stale timestamp, or MAC
//! mismatch rejects the event before it is processed.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SECRET_PREFIX: &str = "whsec_";
const VERSION_PREFIX: &str = "v1,";

/// Accept timestamps at most this many seconds away from now, to bound
/// replay of captured deliveries.
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("webhook secret is malformed")]
    MalformedSecret,

    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    #[error("timestamp is not a unix epoch value")]
    MalformedTimestamp,

    #[error("timestamp outside tolerance window")]
    TimestampOutOfRange,

    #[error("no signature matched")]
    Mismatch,
}

/// Verifies provider signatures under one pre-shared secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    key: Vec<u8>,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    /// Build a verifier from the provider-issued secret string.
    pub fn new(secret: &str) -> Result<Self, SignatureError> {
        let encoded = secret
            .strip_prefix(SECRET_PREFIX)
            .ok_or(SignatureError::MalformedSecret)?;
        let key = BASE64
            .decode(encoded)
            .map_err(|_| SignatureError::MalformedSecret)?;
        Ok(Self { key })
    }

    /// Verify one delivery against the current wall clock.
    pub fn verify(
        &self,
        msg_id: &str,
        timestamp: &str,
        signature_header: &str,
        payload: &[u8],
    ) -> Result<(), SignatureError> {
        self.verify_at(
            msg_id,
            timestamp,
            signature_header,
            payload,
            chrono::Utc::now().timestamp(),
        )
    }

    /// Clock-injected variant of [`verify`](Self::verify).
    pub fn verify_at(
        &self,
        msg_id: &str,
        timestamp: &str,
        signature_header: &str,
        payload: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| SignatureError::MalformedTimestamp)?;
        if (now - ts).abs() > TIMESTAMP_TOLERANCE_SECS {
            return Err(SignatureError::TimestampOutOfRange);
        }

        let mut signed_content = Vec::with_capacity(msg_id.len() + timestamp.len() + payload.len() + 2);
        signed_content.extend_from_slice(msg_id.as_bytes());
        signed_content.push(b'.');
        signed_content.extend_from_slice(timestamp.as_bytes());
        signed_content.push(b'.');
        signed_content.extend_from_slice(payload);

        // The header may carry several space-separated signatures (e.g.
        // after a secret rotation); any one matching accepts.
        for entry in signature_header.split_ascii_whitespace() {
            let Some(encoded) = entry.strip_prefix(VERSION_PREFIX) else {
                continue;
            };
            let Ok(candidate) = BASE64.decode(encoded) else {
                continue;
            };
            let mut mac = HmacSha256::new_from_slice(&self.key)
                .map_err(|_| SignatureError::MalformedSecret)?;
            mac.update(&signed_content);
            // Constant-time comparison.
            if mac.verify_slice(&candidate).is_ok() {
                return Ok(());
            }
        }
        Err(SignatureError::Mismatch)
    }

    /// Produce the `v1,<mac>` entry for a delivery. Used by tests and by
    /// operators replaying events against a local instance.
    pub fn sign(&self, msg_id: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("hmac accepts any key length");
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        format!("{VERSION_PREFIX}{}", BASE64.encode(mac.finalize().into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "test-signing-key" base64-encoded.
    const SECRET: &str = "whsec_dGVzdC1zaWduaW5nLWtleQ==";

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SECRET).unwrap()
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn valid_signature_verifies() {
        let v = verifier();
        let ts = now().to_string();
        let payload = br#"{"type":"user.created","data":{"id":"u1"}}"#;
        let sig = v.sign("msg_1", &ts, payload);
        assert_eq!(v.verify("msg_1", &ts, &sig, payload), Ok(()));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let v = verifier();
        let ts = now().to_string();
        let sig = v.sign("msg_1", &ts, b"original");
        assert_eq!(
            v.verify("msg_1", &ts, &sig, b"tampered"),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let ts = now().to_string();
        let sig = verifier().sign("msg_1", &ts, b"payload");
        // "other-key" base64-encoded.
        let other = WebhookVerifier::new("whsec_b3RoZXIta2V5").unwrap();
        assert_eq!(
            other.verify("msg_1", &ts, &sig, b"payload"),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn any_matching_signature_in_header_accepts() {
        let v = verifier();
        let ts = now().to_string();
        let good = v.sign("msg_1", &ts, b"payload");
        let header = format!("v1,Zm9ybWVyLXNlY3JldC1tYWM= {good}");
        assert_eq!(v.verify("msg_1", &ts, &header, b"payload"), Ok(()));
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let v = verifier();
        let stale = (now() - TIMESTAMP_TOLERANCE_SECS - 10).to_string();
        let sig = v.sign("msg_1", &stale, b"payload");
        assert_eq!(
            v.verify("msg_1", &stale, &sig, b"payload"),
            Err(SignatureError::TimestampOutOfRange)
        );
    }

    #[test]
    fn non_numeric_timestamp_is_rejected() {
        let v = verifier();
        assert_eq!(
            v.verify("msg_1", "yesterday", "v1,AAAA", b"payload"),
            Err(SignatureError::MalformedTimestamp)
        );
    }

    #[test]
    fn secret_without_prefix_is_rejected() {
        assert_eq!(
            WebhookVerifier::new("dGVzdA==").unwrap_err(),
            SignatureError::MalformedSecret
        );
    }

    #[test]
    fn header_with_no_v1_entries_is_rejected() {
        let v = verifier();
        let ts = now().to_string();
        assert_eq!(
            v.verify("msg_1", &ts, "v2,abcd garbage", b"payload"),
            Err(SignatureError::Mismatch)
        );
    }
}
