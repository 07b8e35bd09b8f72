use awssign_core::utils::Redact;
use awssign_core::Env;
use awssign_core::Error;
use log::debug;
use std::fmt::{Debug, Formatter};

use crate::constants::*;
use crate::Credential;

/// Config for aws services.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    pub region: Option<String>,
    /// `service` like `s3` or `sqs`. Never loaded from env.
    pub service: Option<String>,
    /// Scheme used to reach the service endpoint.
    ///
    /// Default to `https`.
    pub protocol: String,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            service: None,
            protocol: "https".to_string(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("service", &self.service)
            .field("protocol", &self.protocol)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set keep their value.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if self.region.is_none() {
            self.region = env.var(AWS_REGION).or_else(|| env.var(AWS_DEFAULT_REGION));
        }
        if self.access_key_id.is_none() {
            self.access_key_id = env.var(AWS_ACCESS_KEY_ID);
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = env.var(AWS_SECRET_ACCESS_KEY);
        }

        debug!("config loaded from env: {self:?}");
        self
    }

    /// Get the configured region or fail.
    pub fn region(&self) -> awssign_core::Result<&str> {
        match self.region.as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(Error::config_invalid("region is required")),
        }
    }

    /// Get the configured service or fail.
    pub fn service(&self) -> awssign_core::Result<&str> {
        match self.service.as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(Error::config_invalid("service is required")),
        }
    }

    /// Build the static credential carried by this config.
    pub fn credential(&self) -> awssign_core::Result<Credential> {
        let (Some(ak), Some(sk)) = (&self.access_key_id, &self.secret_access_key) else {
            return Err(Error::config_invalid(
                "access_key_id and secret_access_key are required",
            ));
        };

        let cred = Credential::new(ak.as_str(), sk.as_str());
        cred.check()?;
        Ok(cred)
    }
}
