/// Public landing page
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```

use axum::Json;
use serde::Serialize;

/// Home page context
#[derive(Debug, Serialize)]
pub struct HomeContext {
    /// Page identifier for the template
    pub page: &'static str,

    /// Greeting shown to everyone, logged in or not
    pub message: &'static str,
}

/// Home page handler
///
/// Public: reachable by anonymous users.
pub async fn home_page() -> Json<HomeContext> {
    Json(HomeContext {
        page: "home",
        message: "Welcome to Notehub",
    })
}
