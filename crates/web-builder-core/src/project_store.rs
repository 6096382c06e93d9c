//! Filesystem project store: one directory per project holding the three
//! files verbatim.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{BuilderError, Result};
use crate::project::{
    validate_project_name, ProjectFiles, ProjectStore, CSS_FILE, HTML_FILE, JS_FILE,
};

/// Layout:
/// - `<base>/<name>/index.html`
/// - `<base>/<name>/style.css`
/// - `<base>/<name>/script.js`
pub struct FsProjectStore {
    base: PathBuf,
    /// Held across a whole save or delete so a project's three files always
    /// come from the same request.
    writes: Mutex<()>,
}

impl FsProjectStore {
    pub fn new(base: PathBuf) -> Self {
        Self {
            base,
            writes: Mutex::new(()),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn project_dir(&self, name: &str) -> Result<PathBuf> {
        validate_project_name(name)?;
        Ok(self.base.join(name))
    }
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

async fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_extension(format!("{}.{seq}.tmp", std::process::id()));
    tokio::fs::write(&tmp, content.as_bytes()).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

async fn read_project_file(dir: &Path, file: &str, name: &str) -> Result<String> {
    match tokio::fs::read_to_string(dir.join(file)).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BuilderError::ProjectNotFound(name.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl ProjectStore for FsProjectStore {
    async fn save(&self, name: &str, files: &ProjectFiles) -> Result<()> {
        let dir = self.project_dir(name)?;
        let _guard = self.writes.lock().await;
        tokio::fs::create_dir_all(&dir).await?;

        write_atomic(&dir.join(HTML_FILE), &files.html).await?;
        write_atomic(&dir.join(CSS_FILE), &files.css).await?;
        write_atomic(&dir.join(JS_FILE), &files.js).await?;

        debug!(project = name, dir = %dir.display(), "Saved project");
        Ok(())
    }

    async fn load(&self, name: &str) -> Result<ProjectFiles> {
        let dir = self.project_dir(name)?;

        let html = read_project_file(&dir, HTML_FILE, name).await?;
        let css = read_project_file(&dir, CSS_FILE, name).await?;
        let js = read_project_file(&dir, JS_FILE, name).await?;

        debug!(project = name, "Loaded project");
        Ok(ProjectFiles { html, css, js })
    }

    async fn list(&self) -> Vec<String> {
        let mut entries = match tokio::fs::read_dir(&self.base).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %self.base.display(), %e, "Projects directory unreadable");
                return Vec::new();
            }
        };

        let mut names = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_dir = entry
                        .file_type()
                        .await
                        .map(|t| t.is_dir())
                        .unwrap_or(false);
                    if is_dir {
                        names.push(entry.file_name().to_string_lossy().into_owned());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %self.base.display(), %e, "Failed to enumerate projects");
                    return Vec::new();
                }
            }
        }

        names.sort();
        names
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let dir = self.project_dir(name)?;
        let _guard = self.writes.lock().await;
        if !tokio::fs::try_exists(&dir).await.unwrap_or(false) {
            return Err(BuilderError::ProjectNotFound(name.to_string()));
        }
        tokio::fs::remove_dir_all(&dir).await?;
        debug!(project = name, "Deleted project");
        Ok(())
    }
}
