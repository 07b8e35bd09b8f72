//! AWS Signature Version 2, used by legacy query APIs.
//!
//! - [Signature Version 2 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-2.html)

use awssign_core::hash::base64_encode;
use awssign_core::hash::base64_hmac_sha1;
use awssign_core::hash::hmac;
use awssign_core::hash::HmacAlgorithm;
use awssign_core::time::format_iso8601_with_separator;
use awssign_core::time::DateTime;
use awssign_core::Error;
use awssign_core::RequestDescription;
use awssign_core::Result;
use log::debug;

use crate::canonical::canonical_query_string;
use crate::constants::*;

/// Sign `string_to_sign` with HMAC-SHA1, returning base64.
pub fn sign_v2(string_to_sign: &str, secret_access_key: &str) -> String {
    base64_hmac_sha1(secret_access_key.as_bytes(), string_to_sign.as_bytes())
}

/// Sign `string_to_sign` with the given HMAC algorithm, returning base64.
pub fn sign_v2_with(
    algorithm: HmacAlgorithm,
    string_to_sign: &str,
    secret_access_key: &str,
) -> String {
    base64_encode(&hmac(
        algorithm,
        secret_access_key.as_bytes(),
        string_to_sign.as_bytes(),
    ))
}

/// Build the SigV2 string to sign.
///
/// ```text
/// GET
/// sdb.amazonaws.com
/// /
/// AWSAccessKeyId=...&Action=...&SignatureMethod=HmacSHA1&...
/// ```
pub fn string_to_sign_v2(req: &RequestDescription, host: &str) -> String {
    [
        req.method.to_string(),
        host.to_ascii_lowercase(),
        req.path_or_root().to_string(),
        canonical_query_string(&req.query),
    ]
    .join("\n")
}

/// Sign `req` in place with SigV2 query parameters.
///
/// Appends `AWSAccessKeyId`, `SignatureMethod`, `SignatureVersion`,
/// `Timestamp` and finally `Signature` to the query list.
pub fn add_signature_v2(
    req: &mut RequestDescription,
    host: &str,
    access_key_id: &str,
    secret_access_key: &str,
    algorithm: HmacAlgorithm,
    now: DateTime,
) -> Result<()> {
    if host.is_empty() {
        return Err(Error::request_invalid("host must not be empty"));
    }
    if access_key_id.is_empty() || secret_access_key.is_empty() {
        return Err(Error::credential_invalid(
            "access key id and secret access key must not be empty",
        ));
    }

    req.query_push(AWS_ACCESS_KEY_ID_PARAM, access_key_id);
    req.query_push(SIGNATURE_METHOD, algorithm.as_str());
    req.query_push(SIGNATURE_VERSION, "2");
    req.query_push(TIMESTAMP, format_iso8601_with_separator(now));

    let string_to_sign = string_to_sign_v2(req, host);
    debug!("calculated string to sign: {string_to_sign}");

    let signature = sign_v2_with(algorithm, &string_to_sign, secret_access_key);
    req.query_push(SIGNATURE, signature);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use awssign_core::time::parse_iso8601;
    use awssign_core::ErrorKind;
    use http::Method;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn list_domains() -> RequestDescription {
        RequestDescription::new(Method::GET)
            .with_query("Action", "ListDomains")
            .with_query("Version", "2009-04-15")
    }

    #[test]
    fn test_sign_v2_known_value() {
        assert_eq!(sign_v2("foo", "bar"), "hdFVxV7ShqMAvRzxJN4I2H6RTzo=");
        assert_eq!(
            sign_v2_with(HmacAlgorithm::Sha1, "foo", "bar"),
            sign_v2("foo", "bar")
        );
    }

    #[test]
    fn test_sign_v2_is_deterministic() {
        assert_eq!(sign_v2("GET\n/\n", SECRET), sign_v2("GET\n/\n", SECRET));
        assert_ne!(sign_v2("GET\n/\n", SECRET), sign_v2("PUT\n/\n", SECRET));
    }

    #[test_case(HmacAlgorithm::Sha1, "27Wv5IIfvgPq5j8vcqRDzb4tHyo="; "hmac sha1")]
    #[test_case(HmacAlgorithm::Sha256, "HBsOqdRG7i8ynQz6nNtv1PJ0pr7sATYB2J2sQYoVEkg="; "hmac sha256")]
    fn test_add_signature_v2(algorithm: HmacAlgorithm, expected: &str) {
        let now = parse_iso8601("20150830T123600Z").unwrap();
        let mut req = list_domains();
        add_signature_v2(&mut req, "SDB.amazonaws.com", "AKIDEXAMPLE", SECRET, algorithm, now)
            .unwrap();

        assert_eq!(req.query_get("Timestamp"), Some("2015-08-30T12:36:00Z"));
        assert_eq!(req.query_get("SignatureMethod"), Some(algorithm.as_str()));
        assert_eq!(req.query.last().unwrap().0, "Signature");
        assert_eq!(req.query_get("Signature"), Some(expected));
    }

    #[test]
    fn test_string_to_sign_v2() {
        let req = list_domains();
        assert_eq!(
            string_to_sign_v2(&req, "sdb.amazonaws.com"),
            "GET\nsdb.amazonaws.com\n/\nAction=ListDomains&Version=2009-04-15"
        );
    }

    #[test]
    fn test_add_signature_v2_rejects_missing_input() {
        let now = parse_iso8601("20150830T123600Z").unwrap();

        let mut req = list_domains();
        let err = add_signature_v2(&mut req, "", "ak", SECRET, HmacAlgorithm::Sha1, now)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = add_signature_v2(&mut req, "sdb.amazonaws.com", "", SECRET, HmacAlgorithm::Sha1, now)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert_eq!(req, list_domains());
    }
}
