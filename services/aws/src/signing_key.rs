use std::fmt;
use std::fmt::Debug;

use awssign_core::hash::hex_encode;
use awssign_core::hash::hmac_sha256;
use awssign_core::Error;
use awssign_core::Result;

use crate::constants::AWS4_KEY_PREFIX;

/// SigningKey is the secret derived for one credential scope.
///
/// It is valid for a single (date, region, service, terminator) tuple and
/// must never be sent or logged.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex of the key, for comparing against published vectors.
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

/// Derive the SigV4 signing key.
///
/// ```text
/// k_date    = HMAC("AWS4" + secret, date)
/// k_region  = HMAC(k_date, region)
/// k_service = HMAC(k_region, service)
/// k_signing = HMAC(k_service, terminator)
/// ```
///
/// `date` must be the 8 digit scope date, not the full timestamp.
pub fn derive_signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
    terminator: &str,
) -> Result<SigningKey> {
    check_date8(date)?;
    check_scope_part("region", region)?;
    check_scope_part("service", service)?;
    check_scope_part("terminator", terminator)?;

    let secret = format!("{AWS4_KEY_PREFIX}{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign terminator
    let sign_request = hmac_sha256(sign_service.as_slice(), terminator.as_bytes());

    Ok(SigningKey(sign_request))
}

/// Take the scope date out of an ISO8601 timestamp like `20130524T000000Z`.
pub fn scope_date(timestamp: &str) -> Result<&str> {
    let date = timestamp
        .get(..8)
        .ok_or_else(|| Error::request_invalid(format!("timestamp {timestamp} is too short")))?;
    check_date8(date)?;
    Ok(date)
}

pub(crate) fn check_date8(date: &str) -> Result<()> {
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::request_invalid(format!(
            "scope date must be 8 digits like 20130524, got {date:?}"
        )));
    }
    Ok(())
}

pub(crate) fn check_scope_part(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::request_invalid(format!("{name} must not be empty")));
    }
    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(Error::request_invalid(format!(
            "{name} must not contain '/' or whitespace, got {value:?}"
        )));
    }
    Ok(())
}
