//! Wardiya Web Server
//!
//! Axum-based roster page, JSON API and live event stream.

pub mod routes;
pub mod state;
pub mod websocket;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use wardiya_core::poller::{spawn_poller, SharedController};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/schedule", get(routes::api::get_schedule))
        .route("/dashboard", get(routes::api::get_dashboard))
        .route("/current", get(routes::api::get_current))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl+C, polling the controller in the background.
pub async fn run_server(controller: SharedController, host: &str, port: u16) -> anyhow::Result<()> {
    let poll_interval = controller
        .lock()
        .map_err(|_| anyhow::anyhow!("roster controller lock poisoned"))?
        .settings()
        .poll_interval;

    let state = AppState::new(controller.clone());
    let poller = spawn_poller(controller, poll_interval, state.tx.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    poller.cancel().await;
    tracing::info!("Web server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use wardiya_core::clock::FixedClock;
    use wardiya_core::config::Settings;
    use wardiya_core::controller::RosterController;
    use wardiya_db::MemoryStore;

    fn app() -> Router {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()));
        let controller = RosterController::new(Settings::default(), Arc::new(MemoryStore::new()), clock).unwrap();
        create_router(AppState::new(Arc::new(Mutex::new(controller))))
    }

    async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_current_route() {
        let (status, body) = get("/api/current").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["index"], 1);
        assert_eq!(json["week"]["week_number"], 2);
        assert_eq!(json["week"]["shifts"][0]["person"], "Yousef");
    }

    #[tokio::test]
    async fn test_schedule_route_bad_role() {
        let (status, _) = get("/api/schedule?person=omar&role=fourth").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8_lossy(&body).contains("<html"));
    }
}
