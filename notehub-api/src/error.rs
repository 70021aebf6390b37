/// Error handling for the Notehub server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, PageError>` which converts automatically:
///
/// - unauthenticated access to a protected page becomes a 302 redirect to
///   the login page with a `next` parameter pointing back at the requested
///   URL, never an error page;
/// - a single-note operation by a non-author becomes 404 (not 403, so the
///   response does not confirm that the slug exists);
/// - infrastructure failures become 500 with a logged, non-leaking message.
///
/// Form validation failures are not errors at all: handlers redisplay the
/// form with field-level messages and a 200 status.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use notehub_shared::auth::{authorization::AuthzError, jwt::JwtError, password::PasswordError};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::routes::auth::LOGIN_URL;

/// Page result type alias
pub type PageResult<T> = Result<T, PageError>;

/// Unified page error type
#[derive(Debug)]
pub enum PageError {
    /// Anonymous request to a protected page (302 to login with `next`)
    LoginRequired {
        /// Originally requested path, echoed back as the `next` parameter
        next: String,
    },

    /// Bad request (400)
    BadRequest(String),

    /// Not found (404) - also covers authenticated non-authors
    NotFound(String),

    /// Conflict (409) - unique constraint race lost at the store
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format for non-redirect errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "bad_request")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::LoginRequired { next } => write!(f, "Login required to access {}", next),
            PageError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            PageError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PageError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            PageError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}

/// Builds a 302 Found redirect
///
/// The original framework redirected with 302 and the routing contract
/// fixes that code, so redirects are built explicitly rather than with
/// axum's `Redirect` helpers (303/307).
pub fn redirect_found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// Builds the redirect target for an unauthenticated request
pub fn login_redirect_target(next: &str) -> String {
    format!("{}?next={}", LOGIN_URL, next)
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let PageError::LoginRequired { next } = &self {
            return redirect_found(&login_redirect_target(next));
        }

        let (status, error_code, message) = match self {
            PageError::LoginRequired { .. } => unreachable!("handled above"),
            PageError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            PageError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            PageError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            PageError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to page errors
impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => PageError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique constraint races surface as conflicts; the form
                // layer normally catches these before the store does.
                let message = db_err.message().to_string();
                if message.contains("UNIQUE constraint failed") {
                    return PageError::Conflict(message);
                }

                PageError::InternalError(format!("Database error: {}", message))
            }
            _ => PageError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert authorization errors to page errors
impl From<AuthzError> for PageError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotFound => PageError::NotFound("Note not found".to_string()),
            AuthzError::DatabaseError(e) => e.into(),
        }
    }
}

/// Convert password errors to page errors
impl From<PasswordError> for PageError {
    fn from(err: PasswordError) -> Self {
        PageError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert session token errors to page errors
impl From<JwtError> for PageError {
    fn from(err: JwtError) -> Self {
        PageError::InternalError(format!("Session token operation failed: {}", err))
    }
}
