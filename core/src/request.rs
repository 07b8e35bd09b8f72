use std::fmt;
use std::fmt::Debug;
use std::mem;

use bytes::Bytes;
use http::header::HeaderName;
use http::header::AUTHORIZATION;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderValue;
use http::Method;
use http::Uri;

use crate::encode::uri_encode;
use crate::encode::uri_encode_path;
use crate::utils::Redact;
use crate::Error;
use crate::Result;

/// RequestDescription is the unsigned request handed to a signer.
///
/// Query parameters and headers are kept as ordered pairs. Duplicates are
/// allowed and the order doesn't matter for signing since both lists are
/// sorted during canonicalization.
///
/// Signers only ever append to `headers` (or `query` for V2) and never
/// rewrite existing entries.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestDescription {
    /// HTTP method.
    pub method: Method,
    /// Relative URI path, already percent encoded. Empty means `/`.
    pub path: String,
    /// Query parameters, not encoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    pub payload: Bytes,
}

impl RequestDescription {
    /// Create an empty request with given method.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            path: String::new(),
            query: Vec::new(),
            headers: Vec::new(),
            payload: Bytes::new(),
        }
    }

    /// Create an empty request from a method name like `"GET"`.
    pub fn with_method_str(method: &str) -> Result<Self> {
        if method.is_empty() {
            return Err(Error::request_invalid("method must not be empty"));
        }

        Ok(Self::new(Method::from_bytes(method.as_bytes())?))
    }

    /// Set the already encoded path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the path from raw segments, percent encoding everything but `/`.
    pub fn with_raw_path(mut self, path: &str) -> Self {
        self.path = uri_encode_path(path);
        self
    }

    /// Append a query pair.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_push(key, value);
        self
    }

    /// Append a header pair.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_push(key, value);
        self
    }

    /// Set the payload.
    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Path used for signing: `/` when the path is empty.
    #[inline]
    pub fn path_or_root(&self) -> &str {
        if self.path.is_empty() {
            "/"
        } else {
            &self.path
        }
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Push a new header pair into header list.
    #[inline]
    pub fn header_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.push((key.into(), value.into()));
    }

    /// Get the last header value matching `key`, ignoring ASCII case.
    pub fn header_get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Get the last query value matching `key`.
    pub fn query_get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Encode query pairs as `k=v&k=v` in their current order.
    pub fn query_to_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Build a request description from an `http::Request`.
    ///
    /// The query string is decoded with `application/x-www-form-urlencoded`
    /// rules and headers are copied in iteration order.
    pub fn from_http(req: http::Request<Bytes>) -> Result<Self> {
        let (parts, payload) = req.into_parts();

        let (path, query) = match parts.uri.path_and_query() {
            Some(paq) => (
                paq.path().to_string(),
                paq.query()
                    .map(|v| {
                        form_urlencoded::parse(v.as_bytes())
                            .map(|(k, v)| (k.into_owned(), v.into_owned()))
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            None => (String::new(), Vec::new()),
        };

        let mut headers = Vec::with_capacity(parts.headers.len());
        for (k, v) in parts.headers.iter() {
            headers.push((k.as_str().to_string(), v.to_str()?.to_string()));
        }

        Ok(Self {
            method: parts.method,
            path,
            query,
            headers,
            payload,
        })
    }

    /// Convert into an `http::Request` targeting `scheme://authority`.
    ///
    /// The `Authorization` header is marked sensitive.
    pub fn into_http(mut self, scheme: Scheme, authority: Authority) -> Result<http::Request<Bytes>> {
        let paq = if self.query.is_empty() {
            self.path_or_root().to_string()
        } else {
            format!("{}?{}", self.path_or_root(), self.query_to_string())
        };
        let uri = Uri::builder()
            .scheme(scheme)
            .authority(authority)
            .path_and_query(paq.parse::<PathAndQuery>()?)
            .build()?;

        let mut builder = http::Request::builder().method(self.method.clone()).uri(uri);
        for (k, v) in mem::take(&mut self.headers) {
            let name = HeaderName::from_bytes(k.as_bytes())?;
            let mut value = HeaderValue::from_str(&v)?;
            if name == AUTHORIZATION {
                value.set_sensitive(true);
            }
            builder = builder.header(name, value);
        }

        Ok(builder.body(self.payload)?)
    }
}

impl Debug for RequestDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, String)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                    (k.as_str(), Redact::from(v).to_string())
                } else {
                    (k.as_str(), v.clone())
                }
            })
            .collect();

        f.debug_struct("RequestDescription")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("headers", &headers)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}
