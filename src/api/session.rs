use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;

use crate::session::{SessionKey, SessionMode, SessionRegistry};

/// Cookie carrying the per-client session id
pub const SESSION_COOKIE: &str = "todo_session";

/// Middleware: resolve the caller's session key and issue a session cookie
/// to clients that do not have one yet.
pub async fn ensure_session(
    State(sessions): State<Arc<SessionRegistry>>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = extract_session_cookie(request.headers());
    let client_id = existing.unwrap_or_else(Uuid::new_v4);
    let key = sessions.key_for(Some(client_id));

    request.extensions_mut().insert(key);

    let mut response = next.run(request).await;

    if existing.is_none() && sessions.mode() == SessionMode::PerClient {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, client_id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

/// Axum extractor for the caller's session key.
///
/// Requests that bypassed [`ensure_session`] fall back to the shared slot.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSession(pub SessionKey);

#[async_trait]
impl<S> FromRequestParts<S> for ActiveSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts
            .extensions
            .get::<SessionKey>()
            .copied()
            .unwrap_or(SessionKey::Shared);
        Ok(ActiveSession(key))
    }
}

/// Find the session id in the request's Cookie headers
fn extract_session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
