//! Builder UI: embedded static assets served at `/`.
//!
//! Uses `rust-embed` to bake the `ui/` directory into the binary.
//! In debug mode (`debug-embed` feature), files are read from disk
//! so you can edit JS/CSS and just refresh the browser.

use std::path::Path;

use axum::{
    extract::Path as UrlPath,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::Embed;
use tracing::debug;

#[derive(Embed)]
#[folder = "ui/"]
struct UiAssets;

/// Build an axum `Router` that serves the embedded builder page and its assets.
///
/// Merge this **after** the `/api` and `/health` routes so those take
/// priority over the static catch-all.
pub fn ui_router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/{*path}", get(static_handler))
}

async fn index_handler() -> impl IntoResponse {
    serve_file("index.html")
}

async fn static_handler(UrlPath(path): UrlPath<String>) -> impl IntoResponse {
    serve_file(&path)
}

fn serve_file(path: &str) -> Response {
    match UiAssets::get(path) {
        Some(asset) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                asset.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, Html("<h1>404</h1>")).into_response(),
    }
}

/// Names of all embedded UI files.
pub fn asset_names() -> Vec<String> {
    UiAssets::iter().map(|name| name.into_owned()).collect()
}

/// Write every embedded UI file into `dir`, creating it if needed.
/// Returns the number of files written.
pub fn write_assets(dir: &Path) -> std::io::Result<usize> {
    std::fs::create_dir_all(dir)?;
    let mut written = 0;
    for name in UiAssets::iter() {
        let Some(asset) = UiAssets::get(&name) else {
            continue;
        };
        let target = dir.join(&*name);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &*asset.data)?;
        debug!(file = %target.display(), "Wrote UI asset");
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn test_bundle_contains_page_assets() {
        let names = asset_names();
        for expected in ["index.html", "style.css", "script.js"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_write_assets() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");
        let written = write_assets(&out).unwrap();
        assert_eq!(written, asset_names().len());
        let index = std::fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("Visual Web Builder"));
    }

    #[tokio::test]
    async fn test_index_served_as_html() {
        let resp = ui_router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let ctype = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(ctype.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let resp = ui_router()
            .oneshot(Request::get("/nope.png").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
