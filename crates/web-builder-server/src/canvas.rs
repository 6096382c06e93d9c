//! Builder sessions: one canvas per browser session, driven by actions.
//!
//! Provides `/api/canvas/{session_id}` for dispatching actions and
//! `/api/canvas/{session_id}/export` for the standalone document.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use web_builder_canvas::{Action, Builder, BuilderOptions, CanvasView};
use web_builder_core::project::ProjectFiles;

use crate::state::ServerState;

struct BuilderSession {
    builder: Builder,
    last_active: Instant,
}

/// All live builder sessions.
pub struct CanvasManager {
    sessions: RwLock<HashMap<String, BuilderSession>>,
    history_limit: usize,
    idle_timeout: Duration,
}

impl CanvasManager {
    pub fn new(history_limit: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            history_limit,
            idle_timeout,
        }
    }

    /// A fresh builder with this manager's settings.
    fn blank_builder(&self, session_id: &str) -> Builder {
        Builder::new(BuilderOptions {
            container: format!("canvas:{session_id}"),
            history_limit: self.history_limit,
        })
    }

    fn evict_idle_locked(
        &self,
        sessions: &mut HashMap<String, BuilderSession>,
        now: Instant,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|session_id, session| {
            let keep = now.duration_since(session.last_active) < self.idle_timeout;
            if !keep {
                info!(session_id = %session_id, "Builder session expired");
            }
            keep
        });
        before - sessions.len()
    }

    /// Drop sessions idle longer than the configured timeout. Returns how
    /// many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions, Instant::now())
    }

    /// Apply an action to a session, creating the session on first use.
    /// Idle sessions are swept first.
    pub async fn dispatch(&self, session_id: &str, action: Action) -> CanvasView {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions, now);

        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                info!(session_id, "Builder session created");
                BuilderSession {
                    builder: self.blank_builder(session_id),
                    last_active: now,
                }
            });
        session.last_active = now;
        session.builder.dispatch(action)
    }

    /// Run `f` against a session's builder, or a blank one for unknown sessions.
    async fn with_builder<T>(&self, session_id: &str, f: impl FnOnce(&Builder) -> T) -> T {
        let sessions = self.sessions.read().await;
        match sessions.get(session_id) {
            Some(session) => f(&session.builder),
            None => f(&self.blank_builder(session_id)),
        }
    }

    /// Current view of a session. Unknown sessions render as a fresh canvas.
    pub async fn view(&self, session_id: &str) -> CanvasView {
        self.with_builder(session_id, Builder::view).await
    }

    /// The markup, stylesheet and script a save would persist.
    pub async fn files(&self, session_id: &str) -> ProjectFiles {
        self.with_builder(session_id, |builder| ProjectFiles {
            html: builder.generate_html(),
            css: builder.generate_css().to_string(),
            js: builder.generate_js().to_string(),
        })
        .await
    }

    pub async fn export(&self, session_id: &str) -> String {
        self.with_builder(session_id, Builder::export_html).await
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

pub async fn view_handler(
    Path(session_id): Path<String>,
    State(state): State<Arc<ServerState>>,
) -> Json<CanvasView> {
    Json(state.canvas.view(&session_id).await)
}

pub async fn action_handler(
    Path(session_id): Path<String>,
    State(state): State<Arc<ServerState>>,
    Json(action): Json<Action>,
) -> Json<CanvasView> {
    debug!(session_id = %session_id, action = action.name(), "Canvas action");
    Json(state.canvas.dispatch(&session_id, action).await)
}

pub async fn export_handler(
    Path(session_id): Path<String>,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let document = state.canvas.export(&session_id).await;
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"website.html\""),
        ],
        document,
    )
}

pub async fn files_handler(
    Path(session_id): Path<String>,
    State(state): State<Arc<ServerState>>,
) -> Json<ProjectFiles> {
    Json(state.canvas.files(&session_id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_builder_canvas::ElementKind;

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let manager = CanvasManager::new(50, Duration::from_secs(3600));
        manager
            .dispatch(
                "a",
                Action::AddElement {
                    kind: ElementKind::Text,
                },
            )
            .await;

        assert_eq!(manager.view("a").await.elements, 1);
        assert_eq!(manager.view("b").await.elements, 0);
        assert_eq!(manager.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_files_match_generated_parts() {
        let manager = CanvasManager::new(50, Duration::from_secs(3600));
        let view = manager
            .dispatch(
                "s",
                Action::AddElement {
                    kind: ElementKind::Heading,
                },
            )
            .await;
        let files = manager.files("s").await;
        assert_eq!(files.html, view.html);
        assert!(files.css.contains("Generated CSS"));
        assert!(files.js.contains("Generated JavaScript"));
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let manager = CanvasManager::new(50, Duration::from_millis(50));
        manager
            .dispatch(
                "old",
                Action::AddElement {
                    kind: ElementKind::Text,
                },
            )
            .await;
        tokio::time::sleep(Duration::from_millis(120)).await;

        manager.dispatch("new", Action::Undo).await;
        assert_eq!(manager.session_count().await, 1);
        assert_eq!(manager.view("old").await.elements, 0);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(manager.evict_idle().await, 1);
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_session_renders_blank_canvas() {
        let manager = CanvasManager::new(3, Duration::from_secs(3600));
        let view = manager.view("nobody").await;
        assert_eq!(view.elements, 0);
        assert!(!view.can_undo);
        let files = manager.files("nobody").await;
        assert!(files.html.contains("canvas-placeholder"));
        assert!(manager.export("nobody").await.contains("<title>My Website</title>"));
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_history_limit_applies_to_sessions() {
        let manager = CanvasManager::new(2, Duration::from_secs(3600));
        for _ in 0..5 {
            manager
                .dispatch(
                    "s",
                    Action::AddElement {
                        kind: ElementKind::Text,
                    },
                )
                .await;
        }
        assert_eq!(manager.view("s").await.history, 2);
    }
}
