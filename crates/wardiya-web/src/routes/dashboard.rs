//! Roster page handler.
//!
//! Serves the embedded roster HTML.

use axum::response::{Html, IntoResponse};

const ROSTER_HTML: &str = include_str!("../../../../assets/web/index.html");

/// GET / - Serve the roster page.
pub async fn index() -> impl IntoResponse {
    Html(ROSTER_HTML)
}
