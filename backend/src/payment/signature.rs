//! Gateway callback signatures
//!
//! The gateway signs `order_id|payment_id` with HMAC-SHA256 under the key
//! secret and sends the digest hex-encoded.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> Result<HmacSha256, ApiError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .map_err(|e| ApiError::InternalError(format!("HMAC key rejected: {}", e)))?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(mac)
}

/// Hex signature for an order/payment pair
pub fn sign(secret: &str, order_id: &str, payment_id: &str) -> Result<String, ApiError> {
    let mac = mac_for(secret, order_id, payment_id)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a hex signature.
/// Only the exact lowercase digest produced by `sign` verifies; case or
/// whitespace variants are rejected.
pub fn verify(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    if !is_lowercase_hex(signature) {
        return false;
    }
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    match mac_for(secret, order_id, payment_id) {
        Ok(mac) => mac.verify_slice(&expected).is_ok(),
        Err(_) => false,
    }
}

fn is_lowercase_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_key_secret";

    #[test]
    fn test_sign_produces_verifiable_hex() {
        let signature = sign(SECRET, "order_1", "pay_1").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(verify(SECRET, "order_1", "pay_1", &signature));
    }

    #[test]
    fn test_separator_is_part_of_message() {
        assert_ne!(
            sign(SECRET, "order_1", "pay_1").unwrap(),
            sign(SECRET, "order_1pay", "_1").unwrap()
        );
    }

    #[test]
    fn test_rejects_tampered_inputs() {
        let signature = sign(SECRET, "order_1", "pay_1").unwrap();
        assert!(!verify(SECRET, "order_1", "pay_2", &signature));
        assert!(!verify(SECRET, "order_2", "pay_1", &signature));
        assert!(!verify("other_secret", "order_1", "pay_1", &signature));
    }

    #[test]
    fn test_rejects_non_hex_and_truncated() {
        let signature = sign(SECRET, "order_1", "pay_1").unwrap();
        assert!(!verify(SECRET, "order_1", "pay_1", "not-hex"));
        assert!(!verify(SECRET, "order_1", "pay_1", &signature[..32]));
        assert!(!verify(SECRET, "order_1", "pay_1", ""));
    }

    #[test]
    fn test_rejects_case_and_whitespace_variants() {
        let signature = sign(SECRET, "order_1", "pay_1").unwrap();
        assert!(!verify(SECRET, "order_1", "pay_1", &signature.to_uppercase()));
        assert!(!verify(SECRET, "order_1", "pay_1", &format!(" {}", signature)));
        assert!(!verify(SECRET, "order_1", "pay_1", &format!("{}\n", signature)));
        assert!(!verify(SECRET, "order_1", "pay_1", &format!("  {}\n", signature.to_uppercase())));
    }
}
