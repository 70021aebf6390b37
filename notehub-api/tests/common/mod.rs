//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - Per-test in-memory database with migrations applied
//! - Fixture users (an author and another authenticated reader) and one
//!   note owned by the author
//! - Session-cookie generation, the test equivalent of logging in
//! - Request/response helpers for driving the router in-process

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use notehub_api::app::{build_router, AppState};
use notehub_api::config::{ApiConfig, Config, DatabaseConfig as ServerDatabaseConfig, SessionConfig};
use notehub_shared::auth::jwt::{create_token, Claims};
use notehub_shared::auth::session::SESSION_COOKIE;
use notehub_shared::db::migrations::run_migrations;
use notehub_shared::db::pool::{create_pool, DatabaseConfig};
use notehub_shared::models::note::{CreateNote, Note};
use notehub_shared::models::user::{CreateUser, User};
use sqlx::SqlitePool;

/// Session secret used by every test router
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
    /// Owner of the fixture note
    pub author: User,
    /// Authenticated user who does not own the fixture note
    pub reader: User,
    /// Fixture note; title "Заголовок", slug derived from it
    pub note: Note,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let db = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let author = User::create(
            &db,
            CreateUser {
                username: "author".to_string(),
                password_hash: "unused-test-hash".to_string(),
            },
        )
        .await?;

        let reader = User::create(
            &db,
            CreateUser {
                username: "reader".to_string(),
                password_hash: "unused-test-hash".to_string(),
            },
        )
        .await?;

        let note = Note::create(
            &db,
            CreateNote {
                title: "Заголовок".to_string(),
                text: "Текст".to_string(),
                slug: None,
                author_id: author.id,
            },
        )
        .await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: ServerDatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: TEST_SECRET.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            author,
            reader,
            note,
        })
    }

    /// Returns a Cookie header value carrying a valid session for the user
    ///
    /// The test equivalent of logging the user in.
    pub fn session_cookie_for(&self, user: &User) -> String {
        let claims = Claims::new(user.id);
        let token = create_token(&claims, TEST_SECRET).expect("Token creation should succeed");
        format!("{}={}", SESSION_COOKIE, token)
    }
}

/// Sends a request through the router and returns the response
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    use tower::Service as _;

    app.clone()
        .call(request)
        .await
        .expect("Router call is infallible")
}

/// Builds a GET request, optionally carrying a session cookie
pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("Request should build")
}

/// Builds a JSON POST request, optionally carrying a session cookie
pub fn post_json(uri: &str, cookie: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Request should build")
}

/// Builds a bodyless POST request, optionally carrying a session cookie
pub fn post_empty(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("Request should build")
}

/// Reads the response body as JSON
pub async fn response_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Body should be readable");
    serde_json::from_slice(&body).expect("Body should be JSON")
}

/// Returns the Location header of a redirect response
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Response should carry a Location header")
        .to_str()
        .expect("Location should be ASCII")
}

/// Returns the session cookie pair ("session=<token>") from a Set-Cookie
/// header, e.g. after a login response
pub fn session_cookie_from(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Response should carry a Set-Cookie header")
        .to_str()
        .expect("Set-Cookie should be ASCII");

    set_cookie
        .split(';')
        .next()
        .expect("Set-Cookie should have a name=value pair")
        .to_string()
}
