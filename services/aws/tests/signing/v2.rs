use super::{init_logger, test_time, ACCESS_KEY_ID, SECRET_ACCESS_KEY};
use awssign_aws::add_signature_v2;
use awssign_aws::sign_v2;
use awssign_aws::v2::string_to_sign_v2;
use awssign_core::hash::HmacAlgorithm;
use awssign_core::RequestDescription;
use http::Method;
use pretty_assertions::assert_eq;

#[test]
fn test_sign_v2_foo_bar() {
    assert_eq!(sign_v2("foo", "bar"), "hdFVxV7ShqMAvRzxJN4I2H6RTzo=");
}

#[test]
fn test_signature_matches_string_to_sign() {
    init_logger();

    let mut req = RequestDescription::new(Method::GET)
        .with_query("Action", "DescribeRegions")
        .with_query("Version", "2013-10-15");
    add_signature_v2(
        &mut req,
        "ec2.amazonaws.com",
        ACCESS_KEY_ID,
        SECRET_ACCESS_KEY,
        HmacAlgorithm::Sha1,
        test_time(),
    )
    .expect("sign request must succeed");

    let (name, signature) = req.query.pop().expect("signature must be appended");
    assert_eq!(name, "Signature");
    assert_eq!(
        signature,
        sign_v2(&string_to_sign_v2(&req, "ec2.amazonaws.com"), SECRET_ACCESS_KEY)
    );
    assert_eq!(req.query_get("Timestamp"), Some("2013-05-24T00:00:00Z"));
}

#[test]
fn test_unsupported_signature_method() {
    let err = "HmacMD5".parse::<HmacAlgorithm>().unwrap_err();
    assert_eq!(err.kind(), awssign_core::ErrorKind::UnsupportedAlgorithm);
}
