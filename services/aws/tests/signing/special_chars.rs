use super::{credential, init_logger, test_time};
use awssign_aws::canonical::canonicalize;
use awssign_aws::RequestSigner;
use awssign_core::RequestDescription;
use http::uri::Authority;
use http::uri::Scheme;
use http::Method;
use pretty_assertions::assert_eq;

#[test]
fn test_query_with_reserved_characters() {
    init_logger();

    let req = RequestDescription::new(Method::GET)
        .with_header("Host", "examplebucket.s3.amazonaws.com")
        .with_query("key", "!@#$&*()+,/:;=?[]' %");

    let creq = canonicalize(&req);
    assert_eq!(
        creq.canonical_query(),
        "key=%21%40%23%24%26%2A%28%29%2B%2C%2F%3A%3B%3D%3F%5B%5D%27%20%25"
    );
}

#[test]
fn test_query_with_unicode() {
    let req = RequestDescription::new(Method::GET).with_query("名前", "値");
    let creq = canonicalize(&req);
    assert_eq!(creq.canonical_query(), "%E5%90%8D%E5%89%8D=%E5%80%A4");
}

#[test]
fn test_raw_path_keeps_slashes() {
    let mut req = RequestDescription::new(Method::GET)
        .with_raw_path("/photos/2013/my photo+1.jpg")
        .with_header("Host", "examplebucket.s3.amazonaws.com");
    RequestSigner::new("s3", "us-east-1")
        .with_time(test_time())
        .sign(&mut req, &credential())
        .expect("sign request must succeed");

    let http_req = req
        .into_http(
            Scheme::HTTPS,
            Authority::from_static("examplebucket.s3.amazonaws.com"),
        )
        .expect("request must convert");
    assert_eq!(http_req.uri().path(), "/photos/2013/my%20photo%2B1.jpg");
}
