//! Percent encoding used while building canonical requests.
//!
//! The rule is byte-wise: every byte `<= 0x20` or `>= 0x7F` becomes `%XX`
//! (uppercase hex), and so does every byte in the reserved set
//! `! # $ & ' ( ) * + , / : ; = ? @ [ ] %`. Everything else is written as is.
//!
//! Encoding is not idempotent: encoding `%41` again yields `%2541`, so callers
//! must apply it exactly once.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;

/// AsciiSet for URI components such as query keys and values.
///
/// `percent_encoding` always encodes non-ASCII bytes, and `CONTROLS` covers
/// `0x00..=0x1F` plus `0x7F`, so only space and the reserved set are added.
pub const URI_ENCODE_SET: AsciiSet = CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'#')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'%');

/// Same as [`URI_ENCODE_SET`] but keeps `/` so path segments stay separated.
pub const URI_PATH_ENCODE_SET: AsciiSet = URI_ENCODE_SET.remove(b'/');

/// Percent encode a query key or value.
pub fn uri_encode(s: &str) -> String {
    utf8_percent_encode(s, &URI_ENCODE_SET).to_string()
}

/// Percent encode a raw URI path, leaving `/` untouched.
pub fn uri_encode_path(s: &str) -> String {
    utf8_percent_encode(s, &URI_PATH_ENCODE_SET).to_string()
}
