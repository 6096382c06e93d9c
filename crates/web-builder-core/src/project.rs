//! Project model: a named (html, css, js) triple.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{BuilderError, Result};

pub const HTML_FILE: &str = "index.html";
pub const CSS_FILE: &str = "style.css";
pub const JS_FILE: &str = "script.js";

/// The three files making up a saved project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFiles {
    pub html: String,
    pub css: String,
    pub js: String,
}

/// Persistence for named projects. The name is the only key; saving an
/// existing name overwrites it.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn save(&self, name: &str, files: &ProjectFiles) -> Result<()>;

    /// Fails with [`BuilderError::ProjectNotFound`] when any file is missing.
    async fn load(&self, name: &str) -> Result<ProjectFiles>;

    /// Project names. Never fails: unreadable storage yields an empty list.
    async fn list(&self) -> Vec<String>;

    async fn delete(&self, name: &str) -> Result<()>;
}

/// Reject names that would escape the projects directory.
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(BuilderError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_accepted() {
        assert!(validate_project_name("landing-page").is_ok());
        assert!(validate_project_name("My Site 2").is_ok());
        assert!(validate_project_name("v1.2").is_ok());
    }

    #[test]
    fn test_traversal_names_rejected() {
        for name in ["", "  ", ".", "..", "../etc", "a/b", "a\\b"] {
            assert!(
                matches!(
                    validate_project_name(name),
                    Err(BuilderError::InvalidProjectName(_))
                ),
                "{name:?} should be rejected"
            );
        }
    }
}
