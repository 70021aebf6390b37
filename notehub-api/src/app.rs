/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use notehub_api::{app::AppState, config::Config};
/// use notehub_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
/// let app = notehub_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use crate::error::PageError;
use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use notehub_shared::auth::{jwt, session};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session secret for token operations
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /                          # Home page (public)
/// ├── /health                    # Health check (public)
/// ├── /auth/
/// │   ├── GET|POST /login        # Login page / action
/// │   ├── GET      /logout       # Clear session
/// │   └── GET|POST /signup       # Signup page / action
/// └── /notes/                    # Session required; anonymous users are
///     │                          # redirected to /auth/login?next=<url>
///     ├── GET      /             # List own notes
///     ├── GET|POST /add          # Create form / action
///     ├── GET      /done         # Success page
///     ├── GET      /note/:slug   # Detail (author only)
///     ├── GET|POST /edit/:slug   # Edit form / action (author only)
///     └── GET|POST /delete/:slug # Confirm / delete (author only)
/// ```
///
/// # Middleware Stack
///
/// 1. Request logging (tower-http TraceLayer), whole router
/// 2. Session authentication, note routes only
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public pages, no auth
    let public_routes = Router::new()
        .route("/", get(routes::home::home_page))
        .route("/health", get(routes::health::health_check));

    // Auth pages (public: anonymous users must be able to log in)
    let auth_routes = Router::new()
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout))
        .route(
            "/signup",
            get(routes::auth::signup_page).post(routes::auth::signup),
        );

    // Note pages (session required)
    let note_routes = Router::new()
        .route("/", get(routes::notes::note_list))
        .route(
            "/add",
            get(routes::notes::add_page).post(routes::notes::create_note),
        )
        .route("/done", get(routes::notes::success_page))
        .route("/note/:slug", get(routes::notes::note_detail))
        .route(
            "/edit/:slug",
            get(routes::notes::edit_page).post(routes::notes::update_note),
        )
        .route(
            "/delete/:slug",
            get(routes::notes::delete_page).post(routes::notes::delete_note),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/auth", auth_routes)
        .nest("/notes", note_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Extracts and validates the session token from the session cookie, then
/// injects [`session::AuthContext`] into request extensions. Anonymous or
/// invalid sessions are redirected to the login page with a `next`
/// parameter pointing back at the originally requested URL.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, PageError> {
    // The path the anonymous user asked for, echoed back as `next`
    let next_url = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let token = session::session_token(req.headers()).ok_or_else(|| PageError::LoginRequired {
        next: next_url.clone(),
    })?;

    let claims = jwt::validate_token(&token, state.session_secret())
        .map_err(|_| PageError::LoginRequired { next: next_url })?;

    req.extensions_mut()
        .insert(session::AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
