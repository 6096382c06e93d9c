//! Axum-based HTTP server.

use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::ServerState;
use crate::{canvas, projects};

/// Assemble the application router: API routes, builder sessions, and the
/// embedded UI.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = state.config.cors_enabled();

    // API routes are registered first so they take priority over the UI catch-all
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/save", post(projects::save_handler))
        .route("/api/load/{project_name}", get(projects::load_handler))
        .route("/api/projects", get(projects::list_handler))
        .route(
            "/api/projects/{project_name}",
            delete(projects::delete_handler),
        )
        .route(
            "/api/canvas/{session_id}",
            get(canvas::view_handler).post(canvas::action_handler),
        )
        .route("/api/canvas/{session_id}/export", get(canvas::export_handler))
        .route("/api/canvas/{session_id}/files", get(canvas::files_handler))
        .with_state(state)
        .merge(web_builder_web::ui_router())
        .layer(TraceLayer::new_for_http());

    if cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Start the builder server and run until Ctrl-C.
pub async fn start_server(state: Arc<ServerState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Visual Web Builder running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn health_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    let sessions = state.canvas.session_count().await;

    axum::Json(json!({
        "status": "ok",
        "version": version,
        "sessions": sessions,
    }))
}

pub(crate) async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
