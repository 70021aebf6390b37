/// Session cookie handling and the request authentication context
///
/// Notehub keeps the session token (see [`super::jwt`]) in an HttpOnly
/// cookie. This module parses the token out of request headers, builds the
/// Set-Cookie values for login/logout, and defines the [`AuthContext`] that
/// the authentication middleware injects into request extensions for
/// handlers to extract.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use notehub_shared::auth::session::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Authentication context added to request extensions
///
/// Added to the request by the session middleware after a valid session
/// token was found. Handlers extract it with axum's `Extension` extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated session claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

/// Extracts the session token from the request's Cookie headers
///
/// Returns None when no session cookie is present. Unrelated cookies are
/// ignored.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE).and_then(|rest| rest.strip_prefix('=')))
        .map(|token| token.to_string())
        .next()
}

/// Builds the Set-Cookie value that establishes a session
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// Builds the Set-Cookie value that clears the session
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}
