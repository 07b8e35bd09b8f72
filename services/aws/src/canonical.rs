//! Canonical request and credential scope for SigV4.
//!
//! - [Create a canonical request](https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html#create-canonical-request)

use std::fmt;
use std::fmt::Display;

use awssign_core::encode::uri_encode;
use awssign_core::hash::hex_sha256;
use awssign_core::time::format_date;
use awssign_core::time::DateTime;
use awssign_core::RequestDescription;

use crate::constants::AWS4_REQUEST;
use crate::signing_key::check_date8;
use crate::signing_key::check_scope_part;

/// CanonicalRequest is the normalized form of a request that gets hashed.
///
/// ```text
/// <method>\n
/// <path>\n
/// <canonical query>\n
/// <canonical headers>\n
/// <signed headers>\n
/// <payload hash>
/// ```
///
/// Every header line in `<canonical headers>` ends with `\n`, so a request
/// with headers shows an empty line before `<signed headers>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: String,
    path: String,
    query: String,
    headers: Vec<(String, String)>,
    signed_headers: String,
    payload_hash: String,
}

impl CanonicalRequest {
    /// `;` joined lowercase header names in canonical order.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// Normalized and sorted header pairs.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// `key:value\n` for every header.
    pub fn canonical_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(k, v)| format!("{k}:{v}\n"))
            .collect()
    }

    /// Encoded and sorted query string.
    pub fn canonical_query(&self) -> &str {
        &self.query
    }

    /// Hex encoded SHA256 of the payload.
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// Hex encoded SHA256 of the whole canonical request.
    pub fn hashed(&self) -> String {
        hex_sha256(self.to_string().as_bytes())
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self.canonical_headers();
        let fragments: [&str; 6] = [
            self.method.as_str(),
            self.path.as_str(),
            self.query.as_str(),
            headers.as_str(),
            self.signed_headers.as_str(),
            self.payload_hash.as_str(),
        ];
        f.write_str(&fragments.join("\n"))
    }
}

/// Build the canonical request of `req`.
///
/// The request must already carry its `X-Amz-Date` header.
pub fn canonicalize(req: &RequestDescription) -> CanonicalRequest {
    let headers = normalize_headers(&req.headers);
    let signed_headers = headers
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");

    CanonicalRequest {
        method: req.method.to_string(),
        path: req.path_or_root().to_string(),
        query: canonical_query_string(&req.query),
        headers,
        signed_headers,
        payload_hash: hex_sha256(&req.payload),
    }
}

/// Lowercase header names, trim values and sort the pairs.
///
/// Only ASCII whitespace is trimmed; interior whitespace and non-ASCII
/// spaces like U+00A0 are kept. Duplicated names produce one pair each.
pub fn normalize_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    let mut headers = headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), trim_ascii_whitespace(v).to_string()))
        .collect::<Vec<_>>();
    headers.sort();
    headers
}

fn trim_ascii_whitespace(v: &str) -> &str {
    v.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'))
}

/// Sort query pairs by (key, value) and encode them as `k=v&k=v`.
pub fn canonical_query_string(query: &[(String, String)]) -> String {
    let mut query = query.iter().collect::<Vec<_>>();
    query.sort();

    query
        .into_iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// CredentialScope binds a signature to a date, region and service.
///
/// Displayed as `20130524/us-east-1/s3/aws4_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScope {
    date: String,
    region: String,
    service: String,
}

impl CredentialScope {
    /// Create a scope from an 8 digit date like `20130524`.
    pub fn new(date: &str, region: &str, service: &str) -> awssign_core::Result<Self> {
        check_date8(date)?;
        check_scope_part("region", region)?;
        check_scope_part("service", service)?;

        Ok(Self {
            date: date.to_string(),
            region: region.to_string(),
            service: service.to_string(),
        })
    }

    /// Create a scope for the day of `time`.
    pub fn from_time(time: DateTime, region: &str, service: &str) -> awssign_core::Result<Self> {
        Self::new(&format_date(time), region, service)
    }

    /// Scope date, `YYYYMMDD`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Scope region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Scope service.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.date, self.region, self.service, AWS4_REQUEST
        )
    }
}
