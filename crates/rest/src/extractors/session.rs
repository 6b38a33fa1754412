//! Session identification extractor.
//!
//! Resolves the caller's session id from the session cookie or the
//! `X-Session-ID` header. Requests carrying neither are given a fresh id,
//! which the handler returns in a `Set-Cookie` header.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header, request::Parts},
};
use helios_sorter::session::SessionId;
use uuid::Uuid;

use crate::state::AppState;

/// Header that can carry the session id instead of the cookie.
pub static X_SESSION_ID: HeaderName = HeaderName::from_static("x-session-id");

const MAX_SESSION_ID_LEN: usize = 128;

/// Axum extractor for the session id.
#[derive(Debug, Clone)]
pub struct SessionExtractor {
    id: SessionId,
    is_new: bool,
}

impl SessionExtractor {
    /// Wraps an id sent by the client.
    pub fn existing(id: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(id),
            is_new: false,
        }
    }

    /// Issues a new random id.
    pub fn issue() -> Self {
        Self {
            id: SessionId::new(Uuid::new_v4().to_string()),
            is_new: true,
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns true if the id was issued for this request.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Builds the `Set-Cookie` value handing the id to the client.
    pub fn set_cookie(&self, cookie_name: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            cookie_name, self.id
        ))
        .ok()
    }
}

fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_SESSION_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Finds `name` among the `Cookie` headers.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Extracts the session id from headers, preferring the cookie.
fn extract_session_id_from_headers(
    headers: &HeaderMap,
    cookie_name: &str,
) -> Result<Option<String>, (StatusCode, &'static str)> {
    if let Some(id) = extract_cookie(headers, cookie_name)
        && is_valid_session_id(&id)
    {
        return Ok(Some(id));
    }

    match headers.get(&X_SESSION_ID) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .ok()
            .filter(|id| is_valid_session_id(id))
            .map(|id| Some(id.to_string()))
            .ok_or((StatusCode::BAD_REQUEST, "Invalid session ID")),
    }
}

impl<R, T> FromRequestParts<AppState<R, T>> for SessionExtractor
where
    R: Send + Sync,
    T: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R, T>,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config().session_cookie;

        Ok(match extract_session_id_from_headers(&parts.headers, cookie_name)? {
            Some(id) => SessionExtractor::existing(id),
            None => SessionExtractor::issue(),
        })
    }
}
