//! # Notehub Server
//!
//! This is the Notehub server binary: an authenticated personal-notes
//! service where every note is addressed by a unique, URL-safe slug.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Public pages (home, health, signup/login/logout)
//! - Session-protected note pages (list, add, detail, edit, delete)
//! - Cookie-carried session tokens and Argon2id password storage
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=$(openssl rand -hex 32) cargo run -p notehub-api
//! ```

use notehub_api::app::{build_router, AppState};
use notehub_api::config::Config;
use notehub_shared::db::migrations::run_migrations;
use notehub_shared::db::pool::{create_pool, DatabaseConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notehub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Notehub v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
