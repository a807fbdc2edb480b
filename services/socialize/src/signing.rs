//! Canonicalization and base-string construction for Socialize signatures.
//!
//! Two distinct base-string shapes exist: the OAuth-style string signed for
//! outgoing HTTP calls, and the `timestamp_uid` string used for inbound
//! webhook notifications. They are intentionally not unified.

use crate::constants::SIG_ENCODE_SET;
use gigya_core::hash::{base64_decode, base64_hmac_sha1};
use gigya_core::{Error, Result};
use percent_encoding::utf8_percent_encode;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Percent-encode `s` with the Socialize signature safe-set.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, &SIG_ENCODE_SET).to_string()
}

/// Build `scheme://host[:port]path`, omitting the port when it is the
/// scheme's conventional default.
pub fn normalize_url(scheme: &str, host: &str, port: u16, path: &str) -> String {
    let default_port =
        (scheme == "http" && port == 80) || (scheme == "https" && port == 443);
    if default_port {
        format!("{scheme}://{host}{path}")
    } else {
        format!("{scheme}://{host}:{port}{path}")
    }
}

/// Render parameters as `key=value` pairs joined by `&`, keys in ascending
/// byte order.
///
/// The BTreeMap already iterates in sorted order, which makes the output a
/// pure function of the map contents regardless of insertion order.
pub fn canonical_params(params: &BTreeMap<String, String>) -> String {
    let mut s = String::with_capacity(64);
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }
        s.push_str(k);
        s.push('=');
        s.push_str(v);
    }
    s
}

/// Build the OAuth-style base string for an outgoing call.
///
/// `params` must hold the full outgoing parameter set at signing time,
/// everything except the signature itself. Omitting any parameter desyncs
/// the signature from what the server reconstructs.
pub fn request_base_string(
    http_method: &str,
    scheme: &str,
    host: &str,
    port: u16,
    path: &str,
    params: &BTreeMap<String, String>,
) -> String {
    let mut base = String::with_capacity(128);
    base.push_str(&http_method.to_uppercase());
    base.push('&');
    base.push_str(&percent_encode(&normalize_url(scheme, host, port, path)));
    base.push('&');
    base.push_str(&percent_encode(&canonical_params(params)));
    base
}

/// Build the base string for an inbound webhook notification.
pub fn callback_base_string(timestamp: i64, uid: &str, friend_uid: Option<&str>) -> String {
    let mut base = String::with_capacity(32);
    match friend_uid {
        None => write!(base, "{timestamp}_{uid}"),
        Some(friend) => write!(base, "{timestamp}_{friend}_{uid}"),
    }
    .expect("writing to a String cannot fail");
    base
}

/// Sign a base string with a base64 encoded secret key.
///
/// The digest is HMAC-SHA1 over the UTF-8 bytes of `base_string`, keyed by
/// the decoded secret, re-encoded as base64.
pub fn sign_base_string(secret_b64: &str, base_string: &str) -> Result<String> {
    let key = base64_decode(secret_b64)
        .map_err(|e| Error::credential_invalid("secret key is not valid base64").with_source(e))?;
    Ok(base64_hmac_sha1(&key, base_string.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_percent_encode_keeps_unreserved_only() {
        assert_eq!(percent_encode("a b/c~d_e.f-g&h=i"), "a%20b%2Fc~d_e.f-g%26h%3Di");
    }

    #[test]
    fn test_normalize_url_ports() {
        assert_eq!(normalize_url("http", "a.gigya.com", 80, "/m"), "http://a.gigya.com/m");
        assert_eq!(
            normalize_url("https", "a.gigya.com", 443, "/m"),
            "https://a.gigya.com/m"
        );
        assert_eq!(
            normalize_url("http", "localhost", 8080, "/m"),
            "http://localhost:8080/m"
        );
    }

    #[test]
    fn test_canonical_params_is_order_independent() {
        let forwards = params(&[("a", "1"), ("b", "2"), ("UID", "u")]);
        let mut backwards = BTreeMap::new();
        backwards.insert("b".to_string(), "2".to_string());
        backwards.insert("UID".to_string(), "u".to_string());
        backwards.insert("a".to_string(), "1".to_string());

        assert_eq!(canonical_params(&forwards), canonical_params(&backwards));
        // Uppercase sorts before lowercase in byte order.
        assert_eq!(canonical_params(&forwards), "UID=u&a=1&b=2");
    }

    #[test]
    fn test_canonical_params_empty_value() {
        assert_eq!(canonical_params(&params(&[("k", "")])), "k=");
    }

    #[test]
    fn test_request_base_string_vector() {
        let p = params(&[
            ("UID", "u123"),
            ("apiKey", "key-1"),
            ("categoryID", "news"),
            ("format", "json"),
            ("httpStatusCodes", "false"),
            ("nonce", "1000000000000"),
            ("timestamp", "1000000000"),
        ]);
        let base = request_base_string(
            "post",
            "http",
            "comments.example-host.com",
            80,
            "/comments.getComments",
            &p,
        );
        assert_eq!(
            base,
            "POST&http%3A%2F%2Fcomments.example-host.com%2Fcomments.getComments&\
             UID%3Du123%26apiKey%3Dkey-1%26categoryID%3Dnews%26format%3Djson%26\
             httpStatusCodes%3Dfalse%26nonce%3D1000000000000%26timestamp%3D1000000000"
        );
        assert_eq!(
            sign_base_string("c2VjcmV0", &base).unwrap(),
            "U4SV/LeDA6g9rj/Y2fxItIFJ9cs="
        );
    }

    #[test]
    fn test_callback_base_string_shapes() {
        assert_eq!(callback_base_string(1000000000, "u123", None), "1000000000_u123");
        assert_eq!(
            callback_base_string(1000000000, "u123", Some("f456")),
            "1000000000_f456_u123"
        );
    }

    #[test]
    fn test_sign_base_string_vector() {
        // "c2VjcmV0" decodes to the literal key "secret".
        assert_eq!(
            sign_base_string("c2VjcmV0", "1000000000_u123").unwrap(),
            "JQXlelgsydh7/4A0zPjUidAsKtI="
        );
        assert_eq!(
            sign_base_string("c2VjcmV0", "1000000000_f456_u123").unwrap(),
            "6Nl4LBa2wKPtkTaNqKobOmUPJnA="
        );
    }

    #[test]
    fn test_sign_base_string_rejects_bad_secret() {
        let err = sign_base_string("!!not-base64!!", "whatever").unwrap_err();
        assert_eq!(err.kind(), gigya_core::ErrorKind::CredentialInvalid);
    }
}
