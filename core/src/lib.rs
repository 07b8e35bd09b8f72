//! Core components for signing AWS API requests.
//!
//! This crate holds the pieces that don't depend on a particular signature
//! version:
//!
//! - [`RequestDescription`]: the request a signer works on.
//! - [`encode`]: the percent encoding used in canonical requests.
//! - [`hash`]: digest, HMAC, hex and base64 helpers.
//! - [`time`]: timestamp formatting.
//! - [`Env`]: environment access used by configuration loaders.
//! - [`Error`]: the error type shared by all signers.
//!
//! ## Example
//!
//! ```
//! use awssign_core::hash::hex_sha256;
//! use awssign_core::RequestDescription;
//! use http::Method;
//!
//! let req = RequestDescription::new(Method::GET)
//!     .with_header("Host", "examplebucket.s3.amazonaws.com");
//!
//! assert_eq!(req.path_or_root(), "/");
//! assert_eq!(hex_sha256(&req.payload).len(), 64);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod encode;
pub mod hash;
pub mod time;
pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod request;
pub use request::RequestDescription;
