use std::time::SystemTime;

use super::{init_logger, signature_of, test_time, ACCESS_KEY_ID, SECRET_ACCESS_KEY};
use aws_credential_types::Credentials;
use aws_sigv4::http_request::SignableBody;
use aws_sigv4::http_request::SignableRequest;
use aws_sigv4::http_request::SigningSettings;
use aws_sigv4::sign::v4;
use awssign_aws::add_signature_v4;
use awssign_core::RequestDescription;
use bytes::Bytes;
use http::Method;

/// (name, method, uri, headers, body)
type TestCase = (
    &'static str,
    Method,
    &'static str,
    &'static [(&'static str, &'static str)],
    &'static str,
);

fn test_cases() -> Vec<TestCase> {
    vec![
        (
            "get_request",
            Method::GET,
            "http://127.0.0.1:9000/hello",
            &[("host", "127.0.0.1:9000")],
            "",
        ),
        (
            "get_request_with_query",
            Method::GET,
            "http://127.0.0.1:9000/hello?list-type=2&max-keys=3&prefix=CI/&start-after=ExampleGuide.pdf",
            &[("host", "127.0.0.1:9000")],
            "",
        ),
        (
            "get_request_virtual_host",
            Method::GET,
            "http://hello.s3.test.example.com/",
            &[("host", "hello.s3.test.example.com")],
            "",
        ),
        (
            "put_request",
            Method::PUT,
            "http://127.0.0.1:9000/hello",
            &[
                ("host", "127.0.0.1:9000"),
                ("content-length", "12"),
                ("content-type", "text/plain"),
            ],
            "Hello,World!",
        ),
    ]
}

fn expected_signature(method: &Method, uri: &str, headers: &[(&str, &str)], body: &str) -> String {
    let id = Credentials::new(
        ACCESS_KEY_ID,
        SECRET_ACCESS_KEY,
        None,
        None,
        "hardcoded-credentials",
    )
    .into();
    let sp = v4::SigningParams::builder()
        .identity(&id)
        .region("test")
        .name("s3")
        .time(SystemTime::from(test_time()))
        .settings(SigningSettings::default())
        .build()
        .expect("signing params must be valid");

    let output = aws_sigv4::http_request::sign(
        SignableRequest::new(
            method.as_str(),
            uri,
            headers.iter().copied(),
            SignableBody::Bytes(body.as_bytes()),
        )
        .expect("signable request must be valid"),
        &sp.into(),
    )
    .expect("signing must succeed");
    let (_, signature) = output.into_parts();
    signature
}

#[test]
fn test_signature_matches_aws_sigv4() {
    init_logger();

    for (name, method, uri, headers, body) in test_cases() {
        let expected = expected_signature(&method, uri, headers, body);

        let mut http_req = http::Request::builder().method(method).uri(uri);
        for (k, v) in headers.iter() {
            http_req = http_req.header(*k, *v);
        }
        let http_req = http_req
            .body(Bytes::from_static(body.as_bytes()))
            .expect("request must be valid");

        let mut req = RequestDescription::from_http(http_req).expect("request must convert");
        add_signature_v4(
            &mut req,
            "s3",
            "test",
            ACCESS_KEY_ID,
            SECRET_ACCESS_KEY,
            test_time(),
        )
        .unwrap_or_else(|err| panic!("sign {name} should pass: {err:?}"));

        let actual = signature_of(req.header_get("Authorization").unwrap());
        assert_eq!(actual, expected, "{name} signature mismatch");
    }
}

#[test]
fn test_header_whitespace_matches_aws_sigv4() {
    init_logger();

    for value in ["  foo ", "\u{a0}foo", "foo\u{2003}"] {
        let headers = [("host", "127.0.0.1:9000"), ("x-amz-meta-a", value)];
        let expected = expected_signature(&Method::GET, "http://127.0.0.1:9000/hello", &headers, "");

        let mut req = RequestDescription::new(Method::GET).with_path("/hello");
        for (k, v) in headers {
            req.header_push(k, v);
        }
        add_signature_v4(
            &mut req,
            "s3",
            "test",
            ACCESS_KEY_ID,
            SECRET_ACCESS_KEY,
            test_time(),
        )
        .expect("sign request must succeed");

        let actual = signature_of(req.header_get("Authorization").unwrap());
        assert_eq!(actual, expected, "signature mismatch for header value {value:?}");
    }
}
