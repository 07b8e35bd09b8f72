use awssign_core::encode::uri_encode;
use awssign_core::time::DateTime;
use awssign_core::Error;
use awssign_core::RequestDescription;
use awssign_core::Result;
use bytes::Bytes;
use http::uri::Authority;
use http::uri::Scheme;
use http::Method;
use log::debug;

use crate::constants::*;
use crate::v4::add_signature_v4;
use crate::Config;
use crate::Credential;

/// ServiceEndpoint builds signed requests for a regional AWS query API.
///
/// The host is `<service>.<region>.amazonaws.com`. Requests target the root
/// path and carry parameters either in the query (`GET`) or as a form
/// encoded body (`POST`).
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    service: String,
    region: String,
    protocol: String,
    host: String,
    credential: Credential,
}

impl ServiceEndpoint {
    /// Create an endpoint for `service` in `region` over https.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.to_string(),
            region: region.to_string(),
            protocol: "https".to_string(),
            host: format!("{service}.{region}.amazonaws.com"),
            credential: Credential::default(),
        }
    }

    /// Create an endpoint from config, including its credential.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.service()?, config.region()?)
            .with_protocol(&config.protocol)
            .with_credential(config.credential()?))
    }

    /// Set the protocol, like `http` or `https`.
    pub fn with_protocol(mut self, protocol: &str) -> Self {
        self.protocol = protocol.to_string();
        self
    }

    /// Set the credential used to sign requests.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Host name of the service.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Base URI of the service: `https://sqs.us-east-1.amazonaws.com/`.
    pub fn uri(&self) -> String {
        format!("{}://{}/", self.protocol, self.host)
    }

    /// Build and sign a `GET` carrying `params` in the query string.
    pub fn sign_get(&self, params: Vec<(String, String)>, now: DateTime) -> Result<RequestDescription> {
        let mut req = RequestDescription::new(Method::GET).with_header(HOST, self.host.as_str());
        req.query = params;

        self.sign(&mut req, now)?;
        Ok(req)
    }

    /// Build and sign a `POST` carrying `params` as a form encoded body.
    ///
    /// Values are percent encoded, keys are written as given.
    pub fn sign_post(&self, params: Vec<(String, String)>, now: DateTime) -> Result<RequestDescription> {
        let payload = params
            .iter()
            .map(|(k, v)| format!("{k}={}", uri_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut req = RequestDescription::new(Method::POST)
            .with_header(HOST, self.host.as_str())
            .with_header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .with_payload(payload);

        self.sign(&mut req, now)?;
        Ok(req)
    }

    /// Convert a signed request into an `http::Request` for this endpoint.
    pub fn into_http(&self, req: RequestDescription) -> Result<http::Request<Bytes>> {
        let scheme = self
            .protocol
            .parse::<Scheme>()
            .map_err(|e| Error::config_invalid(format!("invalid protocol {}", self.protocol)).with_source(e))?;
        let authority = self.host.parse::<Authority>()?;

        req.into_http(scheme, authority)
    }

    fn sign(&self, req: &mut RequestDescription, now: DateTime) -> Result<()> {
        self.credential.check()?;

        add_signature_v4(
            req,
            &self.service,
            &self.region,
            &self.credential.access_key_id,
            &self.credential.secret_access_key,
            now,
        )?;
        debug!("signed request for {}: {req:?}", self.host);
        Ok(())
    }
}
