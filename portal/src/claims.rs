//! Bearer token claim decoding.
//!
//! DESIGN
//! ======
//! Tokens are JWTs issued by the backend. The client never verifies the
//! signature; it only reads the payload segment to learn who is signed in and
//! until when. Anything that fails to decode is treated as "not signed in".

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer, Serialize};

/// Error returned by [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The token has no claims segment.
    #[error("token has no claims segment")]
    MissingSegment,
    /// The claims segment is not valid base64url.
    #[error("claims segment is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded segment is not a claims object.
    #[error("claims segment is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payload fields of a bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Customer identity; the backend issues the email here.
    #[serde(rename = "sub")]
    pub subject: String,
    /// Granted authorities such as `ROLE_USER`.
    #[serde(rename = "scopes", alias = "roles", default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<String>,
    /// Issue time in Unix seconds.
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// Expiry in Unix seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

/// `scopes` arrives either as a list or as a single string.
fn deserialize_roles<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Roles {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Roles>::deserialize(deserializer)? {
        Some(Roles::One(role)) => vec![role],
        Some(Roles::Many(roles)) => roles,
        None => Vec::new(),
    })
}

/// Decode the claims segment of `token`.
///
/// # Errors
///
/// Returns [`DecodeError`] if the claims segment is missing, is not base64url,
/// or does not parse as claims JSON.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token);
    let segment = token
        .split('.')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or(DecodeError::MissingSegment)?;
    let bytes = URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// True when `claims` are no longer valid at `now` (Unix seconds).
#[must_use]
pub fn is_expired(claims: &Claims, now: i64) -> bool {
    claims.expires_at <= now
}

/// Current time in Unix seconds from the system clock.
///
/// Not usable on `wasm32-unknown-unknown`; the browser client supplies its
/// own clock.
#[must_use]
pub fn system_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}
