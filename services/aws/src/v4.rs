//! AWS Signature Version 4.
//!
//! - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)

use awssign_core::hash::hex_hmac_sha256;
use awssign_core::time::format_iso8601;
use awssign_core::time::now;
use awssign_core::time::DateTime;
use awssign_core::Error;
use awssign_core::RequestDescription;
use awssign_core::Result;
use log::debug;

use crate::canonical::canonicalize;
use crate::canonical::CanonicalRequest;
use crate::canonical::CredentialScope;
use crate::constants::AUTHORIZATION;
use crate::constants::AWS4_HMAC_SHA256;
use crate::constants::AWS4_REQUEST;
use crate::constants::X_AMZ_DATE;
use crate::signing_key::derive_signing_key;
use crate::signing_key::scope_date;
use crate::Config;
use crate::Credential;

/// RequestSigner that implement AWS SigV4.
///
/// It keeps the service and region of the target API and signs every
/// request with the current time.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for AWS V4.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Create a signer from the service and region of `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.service()?, config.region()?))
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Service this signer targets.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region this signer targets.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Append `X-Amz-Date` and `Authorization` to `req`.
    pub fn sign(&self, req: &mut RequestDescription, cred: &Credential) -> Result<()> {
        cred.check()?;

        let now = self.time.unwrap_or_else(now);
        add_signature_v4(
            req,
            &self.service,
            &self.region,
            &cred.access_key_id,
            &cred.secret_access_key,
            now,
        )
    }
}

/// Sign `req` in place with SigV4.
///
/// 1. Append `X-Amz-Date: <YYYYMMDDTHHMMSSZ>`.
/// 2. Canonicalize the request, including that header.
/// 3. Build the credential scope and the string to sign.
/// 4. Append `Authorization`.
///
/// All inputs are validated before the request is touched, so a failed call
/// leaves `req` unchanged.
pub fn add_signature_v4(
    req: &mut RequestDescription,
    service: &str,
    region: &str,
    access_key_id: &str,
    secret_access_key: &str,
    now: DateTime,
) -> Result<()> {
    if access_key_id.is_empty() {
        return Err(Error::credential_invalid("access key id must not be empty"));
    }

    let timestamp = format_iso8601(now);
    let scope = CredentialScope::new(scope_date(&timestamp)?, region, service)?;
    debug!("calculated scope: {scope}");

    req.header_push(X_AMZ_DATE, timestamp.as_str());

    let creq = canonicalize(req);
    debug!("calculated canonical request: {creq}");

    let string_to_sign = string_to_sign(&timestamp, &scope, &creq);
    debug!("calculated string to sign: {string_to_sign}");

    let signature = sign_v4(
        &string_to_sign,
        secret_access_key,
        scope.date(),
        scope.region(),
        scope.service(),
    )?;

    req.header_push(
        AUTHORIZATION,
        authorization_header(access_key_id, &scope, creq.signed_headers(), &signature),
    );
    Ok(())
}

/// Build the SigV4 string to sign.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20130524T000000Z
/// 20130524/us-east-1/s3/aws4_request
/// <hashed canonical request>
/// ```
pub fn string_to_sign(timestamp: &str, scope: &CredentialScope, creq: &CanonicalRequest) -> String {
    [
        AWS4_HMAC_SHA256.to_string(),
        timestamp.to_string(),
        scope.to_string(),
        creq.hashed(),
    ]
    .join("\n")
}

/// Sign `string_to_sign` with the key derived for the given scope.
///
/// Returns the lowercase hex signature.
pub fn sign_v4(
    string_to_sign: &str,
    secret_access_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<String> {
    let key = derive_signing_key(secret_access_key, date, region, service, AWS4_REQUEST)?;
    Ok(hex_hmac_sha256(key.as_bytes(), string_to_sign.as_bytes()))
}

/// Build the `Authorization` header value.
///
/// `AWS4-HMAC-SHA256 Credential=<id>/<scope>, SignedHeaders=<headers>, Signature=<sig>`
pub fn authorization_header(
    access_key_id: &str,
    scope: &CredentialScope,
    signed_headers: &str,
    signature: &str,
) -> String {
    let fields = [
        format!("Credential={access_key_id}/{scope}"),
        format!("SignedHeaders={signed_headers}"),
        format!("Signature={signature}"),
    ];
    format!("{AWS4_HMAC_SHA256} {}", fields.join(", "))
}
