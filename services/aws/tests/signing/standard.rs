use super::{credential, init_logger, signature_of, test_time, ACCESS_KEY_ID};
use awssign_aws::RequestSigner;
use awssign_core::RequestDescription;
use http::Method;
use pretty_assertions::assert_eq;

fn sign(req: &mut RequestDescription) -> String {
    RequestSigner::new("s3", "us-east-1")
        .with_time(test_time())
        .sign(req, &credential())
        .expect("sign request must succeed");

    req.header_get("Authorization")
        .expect("authorization must be set")
        .to_string()
}

fn examplebucket() -> RequestDescription {
    RequestDescription::new(Method::GET).with_header("Host", "examplebucket.s3.amazonaws.com")
}

#[test]
fn test_examplebucket_get() {
    init_logger();

    let mut req = examplebucket();
    let auth = sign(&mut req);

    let prefix = format!(
        "AWS4-HMAC-SHA256 Credential={ACCESS_KEY_ID}/20130524/us-east-1/s3/aws4_request, SignedHeaders=host;x-amz-date, Signature="
    );
    assert!(auth.starts_with(&prefix), "{auth}");

    let sig = signature_of(&auth);
    assert_eq!(sig.len(), 64);
    assert!(sig.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    assert_eq!(
        sig,
        "d71edb42cbf2cece54354c77fd121850358fd7adea89b15171027690f94d9fa3"
    );
    assert_eq!(req.header_get("x-amz-date"), Some("20130524T000000Z"));
}

#[test]
fn test_signing_is_deterministic() {
    let mut a = examplebucket().with_query("prefix", "photos/").with_payload("body");
    let mut b = a.clone();
    assert_eq!(sign(&mut a), sign(&mut b));
    assert_eq!(a, b);
}

#[test]
fn test_header_order_does_not_matter() {
    let mut a = examplebucket()
        .with_header("Content-Type", "text/plain")
        .with_header("x-amz-meta-author", "alice");
    let mut b = RequestDescription::new(Method::GET)
        .with_header("x-amz-meta-author", "alice")
        .with_header("Content-Type", "text/plain")
        .with_header("Host", "examplebucket.s3.amazonaws.com");

    assert_eq!(sign(&mut a), sign(&mut b));
}

#[test]
fn test_query_order_does_not_matter() {
    let mut a = examplebucket()
        .with_query("list-type", "2")
        .with_query("max-keys", "3")
        .with_query("prefix", "CI/");
    let mut b = examplebucket()
        .with_query("prefix", "CI/")
        .with_query("list-type", "2")
        .with_query("max-keys", "3");

    assert_eq!(sign(&mut a), sign(&mut b));
}

#[test]
fn test_header_case_and_whitespace_do_not_matter() {
    let mut a = examplebucket().with_header("X-Amz-Meta-Note", "  foo ");
    let mut b = examplebucket().with_header("x-amz-meta-note", "foo");

    assert_eq!(sign(&mut a), sign(&mut b));
}

#[test]
fn test_changing_signed_field_changes_signature() {
    let base = sign(&mut examplebucket());

    let changed = [
        sign(&mut examplebucket().with_path("/photos")),
        sign(&mut examplebucket().with_query("a", "b")),
        sign(&mut examplebucket().with_header("x-amz-meta-a", "b")),
        sign(&mut examplebucket().with_payload("x")),
    ];
    for auth in changed {
        assert_ne!(signature_of(&base), signature_of(&auth));
    }

    let mut later = examplebucket();
    RequestSigner::new("s3", "us-east-1")
        .with_time(test_time() + chrono::Duration::seconds(1))
        .sign(&mut later, &credential())
        .expect("sign request must succeed");
    assert_ne!(
        signature_of(&base),
        signature_of(later.header_get("Authorization").unwrap())
    );
}
