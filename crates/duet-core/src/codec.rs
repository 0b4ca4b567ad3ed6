//! Session token codec and URL carrier.
//!
//! A share token is the session payload serialized to JSON, then wrapped in
//! URL-safe base64 so arbitrary Unicode in names and notes survives the
//! trip through a URL fragment. Decode is the exact inverse.
//!
//! Two fragment marker epochs are recognized when extracting a token from a
//! URL: the current `#session=` and the legacy `#s=`, so previously shared
//! links keep working. New URLs are always built with the current marker.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;
use tracing::debug;

use crate::state::{GameState, RawState, SessionPayload};

/// Current fragment marker for share URLs.
pub const SESSION_MARKER: &str = "#session=";
/// Legacy fragment marker, accepted on decode only.
pub const LEGACY_MARKER: &str = "#s=";

/// Failure to turn a token back into a session payload.
///
/// Always recoverable: callers treat any variant as "no importable session
/// found" and carry on with local state.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no session token found in URL")]
    NoToken,
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("token JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a payload into a URL-fragment-safe ASCII token.
#[must_use]
pub fn encode_session(payload: &SessionPayload) -> String {
    let json = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a token back into a payload.
///
/// The raw shape is upgraded on the way in, so tokens produced by older
/// format epochs (bare string notes, bare boolean locks) still decode.
pub fn decode_session(token: &str) -> Result<SessionPayload, DecodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
    let json = String::from_utf8(bytes)?;
    let raw: RawState = serde_json::from_str(&json)?;
    Ok(raw.upgrade_payload())
}

/// Find a session token behind either marker epoch in a URL or fragment.
#[must_use]
pub fn extract_token(url: &str) -> Option<&str> {
    for marker in [SESSION_MARKER, LEGACY_MARKER] {
        if let Some(pos) = url.find(marker) {
            let token = &url[pos + marker.len()..];
            if !token.is_empty() {
                return Some(token);
            }
        }
    }
    None
}

/// Extract and decode a session token from a full URL.
pub fn decode_token_from_url(url: &str) -> Result<SessionPayload, DecodeError> {
    let token = extract_token(url).ok_or(DecodeError::NoToken)?;
    let payload = decode_session(token)?;
    debug!(
        questions = payload.notes.len(),
        order = payload.order.len(),
        "decoded session token from URL"
    );
    Ok(payload)
}

/// Build a shareable URL carrying this state's session token.
#[must_use]
pub fn build_share_url(base: &str, state: &GameState) -> String {
    let token = encode_session(&state.to_payload());
    format!("{}{SESSION_MARKER}{token}", base.trim_end_matches('#'))
}
