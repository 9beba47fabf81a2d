//! Request signing for the TikTok Shop open API.
//!
//! ## Format
//!
//! ```text
//! string_to_sign = path
//!     + concat(key + value for each query pair, sorted, without `sign` and `access_token`,
//!              with `timestamp` set to the signing time)
//!     + body (compact json, only when a json body is sent)
//!
//! sign = hex(hmac_sha256(app_secret, app_secret + string_to_sign + app_secret))
//! ```
//!
//! ## Reference
//!
//! - [Sign your API request](https://partner.tiktokshop.com/docv2/page/sign-your-api-request)

use log::debug;
use serde_json::Value;
use tiktokshop_core::hash::hex_hmac_sha256;
use tiktokshop_core::time::{now, unix_seconds};
use tiktokshop_core::{Error, Result, SigningRequest};

use crate::constants::*;

/// Result of signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Lowercase hex HMAC-SHA256.
    pub signature: String,
    /// Unix seconds that went into the signature and must be sent as `timestamp`.
    pub timestamp: i64,
}

/// Sign a url or a bare path with the current time.
///
/// The timestamp is taken here, so call this right before the request is
/// sent and never reuse the result for another request.
pub fn sign(url: &str, secret: &str, body: Option<&Value>) -> Result<Signature> {
    sign_at(url, secret, body, unix_seconds(now()))
}

/// Sign a bare path or url that carries no body.
pub fn sign_path(path: &str, secret: &str) -> Result<Signature> {
    sign(path, secret, None)
}

/// Sign a url or a bare path at the given unix timestamp.
///
/// This is the pure form of [`sign`]: identical inputs always produce an
/// identical signature.
pub fn sign_at(url: &str, secret: &str, body: Option<&Value>, timestamp: i64) -> Result<Signature> {
    if secret.is_empty() {
        return Err(Error::credential_invalid(
            "app secret is empty, refusing to sign request",
        ));
    }

    let string_to_sign = string_to_sign(url, body, timestamp)?;

    let mut wrapped = String::with_capacity(string_to_sign.len() + secret.len() * 2);
    wrapped.push_str(secret);
    wrapped.push_str(&string_to_sign);
    wrapped.push_str(secret);

    Ok(Signature {
        signature: hex_hmac_sha256(secret.as_bytes(), wrapped.as_bytes()),
        timestamp,
    })
}

/// Serialize a json body the way it is signed and sent.
///
/// Compact output, object keys in the order held by the [`Value`].
pub fn canonical_body(body: &Value) -> Result<String> {
    Ok(serde_json::to_string(body)?)
}

/// Construct string to sign.
///
/// `sign` and `access_token` are outputs of authentication and never signed.
/// A `timestamp` already present in the url is replaced by the signing time.
fn string_to_sign(url: &str, body: Option<&Value>, timestamp: i64) -> Result<String> {
    let mut req = SigningRequest::build(url)?;
    req.query_remove(SIGN);
    req.query_remove(ACCESS_TOKEN);
    req.query_remove(TIMESTAMP);
    req.query_push(TIMESTAMP, timestamp.to_string());

    let mut s = req.path;
    s.push_str(&SigningRequest::query_to_string(req.query, "", ""));
    if let Some(body) = body {
        s.push_str(&canonical_body(body)?);
    }

    debug!("string to sign: {s}");
    Ok(s)
}
