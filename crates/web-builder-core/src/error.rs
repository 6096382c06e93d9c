use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid project name: {0:?}")]
    InvalidProjectName(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BuilderError>;
