/// Session extraction
///
/// Handlers never look at ambient login state. The caller's session is an
/// explicit extractor argument:
///
/// - `SessionToken`: the raw token presented, if any (no database access)
/// - `CurrentSession`: the live session and its user, resolved against the
///   database
///
/// The token is read from `Authorization: Bearer <token>` first, then from
/// the `sessionid` cookie set at login.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use dealership_shared::models::session::{Session, SessionUser};
use std::convert::Infallible;

use crate::{app::AppState, error::ApiError};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sessionid";

/// Finds the presented session token in request headers
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(
    token: &str,
    ttl: chrono::Duration,
    secure: bool,
) -> Result<HeaderValue, ApiError> {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        token,
        ttl.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::InternalError(format!("Invalid session cookie: {}", e)))
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("sessionid=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Raw session token from the request, if one was sent
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(extract_token(&parts.headers)))
    }
}

/// The caller's live session, `None` when anonymous
///
/// Unknown, expired or malformed tokens resolve to `None`. Only a database
/// failure rejects the request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(&parts.headers) else {
            return Ok(CurrentSession(None));
        };

        let session = Session::find_active_by_token(&state.db, &token).await?;
        Ok(CurrentSession(session))
    }
}
