// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash related utils.
//!
//! Every encoder sizes its output from the input length. The `*_to_slice`
//! variants write into a caller-owned buffer and fail with
//! [`ErrorKind::EncodingOverflow`](crate::ErrorKind::EncodingOverflow) instead
//! of truncating.

use std::fmt;
use std::str::FromStr;

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha1::Sha1;
use sha2::Digest;
use sha2::Sha256;

/// Unkeyed digest algorithms available to signers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-1, 20 bytes.
    Sha1,
    /// SHA-256, 32 bytes.
    Sha256,
}

impl DigestAlgorithm {
    /// Length of the raw digest in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SHA1" | "SHA-1" => Ok(DigestAlgorithm::Sha1),
            "SHA256" | "SHA-256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(Error::unsupported_algorithm(format!(
                "digest algorithm {s} is not supported"
            ))),
        }
    }
}

/// Keyed hash algorithms, named the way AWS query APIs spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacAlgorithm {
    /// `HmacSHA1`
    Sha1,
    /// `HmacSHA256`
    Sha256,
}

impl HmacAlgorithm {
    /// Wire name used in `SignatureMethod`.
    pub fn as_str(self) -> &'static str {
        match self {
            HmacAlgorithm::Sha1 => "HmacSHA1",
            HmacAlgorithm::Sha256 => "HmacSHA256",
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HmacAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "HmacSHA1" => Ok(HmacAlgorithm::Sha1),
            "HmacSHA256" => Ok(HmacAlgorithm::Sha256),
            _ => Err(Error::unsupported_algorithm(format!(
                "hmac algorithm {s} is not supported"
            ))),
        }
    }
}

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Lowercase hex encode
pub fn hex_encode(content: &[u8]) -> String {
    hex::encode(content)
}

/// Base64 encode into `out`, returning the number of bytes written.
pub fn base64_encode_to_slice(content: &[u8], out: &mut [u8]) -> crate::Result<usize> {
    BASE64_STANDARD.encode_slice(content, out).map_err(|e| {
        Error::encoding_overflow(format!(
            "base64 of {} bytes doesn't fit in {} bytes",
            content.len(),
            out.len()
        ))
        .with_source(e)
    })
}

/// Lowercase hex encode into `out`, returning the number of bytes written.
pub fn hex_encode_to_slice(content: &[u8], out: &mut [u8]) -> crate::Result<usize> {
    let needed = content.len() * 2;
    if out.len() < needed {
        return Err(Error::encoding_overflow(format!(
            "hex of {} bytes needs {needed} bytes but buffer has {}",
            content.len(),
            out.len()
        )));
    }

    hex::encode_to_slice(content, &mut out[..needed])
        .map_err(|e| Error::unexpected("hex encode failed").with_source(e))?;
    Ok(needed)
}

/// Raw digest of `content`.
pub fn digest(algorithm: DigestAlgorithm, content: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha1 => Sha1::digest(content).to_vec(),
        DigestAlgorithm::Sha256 => Sha256::digest(content).to_vec(),
    }
}

/// Raw HMAC of `content` under `key`.
pub fn hmac(algorithm: HmacAlgorithm, key: &[u8], content: &[u8]) -> Vec<u8> {
    match algorithm {
        HmacAlgorithm::Sha1 => hmac_sha1(key, content),
        HmacAlgorithm::Sha256 => hmac_sha256(key, content),
    }
}

/// SHA256 hash.
pub fn sha256(content: &[u8]) -> Vec<u8> {
    Sha256::digest(content).to_vec()
}

/// Hex encoded SHA256 hash.
///
/// Use this function instead of `hex::encode(sha256(content))` can reduce
/// extra copy.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content).as_slice())
}

/// HMAC with SHA1 hash.
pub fn hmac_sha1(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha1>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// Hex encoded HMAC with SHA256 hash.
///
/// Use this function instead of `hex::encode(hmac_sha256(key, content))` can
/// reduce extra copy.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    hex::encode(h.finalize().into_bytes())
}

/// Base64 encoded HMAC with SHA1 hash.
pub fn base64_hmac_sha1(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha1>::new_from_slice(key).unwrap();
    h.update(content);

    base64_encode(&h.finalize().into_bytes())
}
