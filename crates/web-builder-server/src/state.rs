//! Server shared state.

use std::sync::Arc;

use web_builder_core::config::Config;
use web_builder_core::project::ProjectStore;
use web_builder_core::project_store::FsProjectStore;

use crate::canvas::CanvasManager;

/// Shared state accessible from all handlers.
pub struct ServerState {
    pub config: Arc<Config>,
    pub projects: Arc<dyn ProjectStore>,
    pub canvas: Arc<CanvasManager>,
}

impl ServerState {
    pub fn new(config: Arc<Config>, projects: Arc<dyn ProjectStore>) -> Self {
        let canvas = Arc::new(CanvasManager::new(
            config.history_limit(),
            config.session_idle_timeout(),
        ));
        Self {
            config,
            projects,
            canvas,
        }
    }

    /// State backed by the filesystem store configured in `config`.
    pub fn from_config(config: Config) -> Self {
        let projects: Arc<dyn ProjectStore> =
            Arc::new(FsProjectStore::new(config.projects_dir()));
        Self::new(Arc::new(config), projects)
    }
}
