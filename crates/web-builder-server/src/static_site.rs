//! Static file server for a built site directory.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::server::shutdown_signal;

/// Router serving `dir`, with `index.html` for directory requests.
pub fn static_router(dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Serve `dir` on all interfaces until Ctrl-C.
pub async fn serve_static(dir: &Path, port: u16) -> anyhow::Result<()> {
    if !dir.is_dir() {
        anyhow::bail!(
            "{} does not exist. Run 'visual-web-builder build' first.",
            dir.display()
        );
    }

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(dir = %dir.display(), "Serving built site at http://localhost:{port}");

    axum::serve(listener, static_router(dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_static_requires_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("dist");
        let err = serve_static(&missing, 0).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
