//! Configuration loading and validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Visual Web Builder configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<ProjectsConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Allow cross-origin requests to the project API.
    #[serde(default)]
    pub cors: bool,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "localhost".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// Directory holding one sub-directory per saved project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Maximum number of undo snapshots kept per builder session.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Builder sessions untouched for this many seconds are dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_history_limit() -> usize {
    50
}

fn default_session_idle_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "plain" (default) or "json".
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log level override (trace/debug/info/warn/error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Per-crate log level overrides (e.g. "web_builder_server=debug").
    #[serde(default)]
    pub filters: Vec<String>,
}

fn default_log_format() -> String {
    "plain".into()
}

/// Substitute `${ENV_VAR}` patterns in a string with their environment variable values.
fn substitute_env_vars(input: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static regex");
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_default()
    })
    .into_owned()
}

impl Config {
    /// Load config from a JSON5 file, substituting `${ENV_VAR}` references.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let substituted = substitute_env_vars(&raw);

        let config: Config = json5::from_str(&substituted)
            .map_err(|e| crate::error::BuilderError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Default config file location.
    pub fn config_path() -> PathBuf {
        data_dir().join("config.json")
    }

    pub fn server_port(&self) -> u16 {
        self.server
            .as_ref()
            .map(|s| s.port)
            .unwrap_or_else(default_port)
    }

    pub fn server_host(&self) -> String {
        self.server
            .as_ref()
            .map(|s| s.host.clone())
            .unwrap_or_else(default_host)
    }

    pub fn cors_enabled(&self) -> bool {
        self.server.as_ref().is_some_and(|s| s.cors)
    }

    /// Directory where projects are persisted. Relative paths resolve against
    /// the process working directory.
    pub fn projects_dir(&self) -> PathBuf {
        self.projects
            .as_ref()
            .and_then(|p| p.dir.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("projects"))
    }

    pub fn history_limit(&self) -> usize {
        self.canvas
            .as_ref()
            .map(|c| c.history_limit)
            .unwrap_or_else(default_history_limit)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        let secs = self
            .canvas
            .as_ref()
            .map(|c| c.session_idle_secs)
            .unwrap_or_else(default_session_idle_secs);
        Duration::from_secs(secs)
    }

    /// Validate the config. Returns `(warnings, errors)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if let Some(server) = &self.server {
            if server.port == 0 {
                errors.push("Server port cannot be 0".to_string());
            }
            if server.host.trim().is_empty() {
                errors.push("Server host cannot be empty".to_string());
            }
        }

        if let Some(canvas) = &self.canvas {
            if canvas.history_limit == 0 {
                errors.push("canvas.history_limit must be at least 1".to_string());
            }
            if canvas.session_idle_secs == 0 {
                errors.push("canvas.session_idle_secs must be at least 1".to_string());
            }
        }

        if let Some(logging) = &self.logging {
            if logging.format != "plain" && logging.format != "json" {
                warnings.push(format!(
                    "Unknown log format '{}', falling back to plain",
                    logging.format
                ));
            }
        }

        let projects = self.projects_dir();
        if projects.exists() && !projects.is_dir() {
            errors.push(format!(
                "Projects path is not a directory: {}",
                projects.display()
            ));
        }

        (warnings, errors)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Base directory for Visual Web Builder data: `~/.visual_web_builder/`
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".visual_web_builder")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_substitution() {
        // SAFETY: test-only, single-threaded test runner
        unsafe { std::env::set_var("TEST_VWB_DIR", "/srv/sites") };
        let input = r#"{"dir": "${TEST_VWB_DIR}", "other": "plain"}"#;
        let result = substitute_env_vars(input);
        assert!(result.contains("/srv/sites"));
        assert!(result.contains("plain"));
        unsafe { std::env::remove_var("TEST_VWB_DIR") };
    }

    #[test]
    fn test_env_var_missing() {
        let input = r#"{"key": "${NONEXISTENT_VAR_VWB_TEST}"}"#;
        let result = substitute_env_vars(input);
        assert!(result.contains(r#""""#));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_port(), 3000);
        assert_eq!(config.server_host(), "localhost");
        assert_eq!(config.history_limit(), 50);
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(3600));
        assert_eq!(config.projects_dir(), PathBuf::from("projects"));
        assert!(!config.cors_enabled());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.json")).unwrap();
        assert!(config.server.is_none());
    }

    #[test]
    fn test_load_json5_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                // comments are fine in JSON5
                server: { port: 8081 },
                projects: { dir: "/tmp/sites" },
                canvas: { history_limit: 10, session_idle_secs: 90 },
            }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server_port(), 8081);
        assert_eq!(config.server_host(), "localhost");
        assert_eq!(config.projects_dir(), PathBuf::from("/tmp/sites"));
        assert_eq!(config.history_limit(), 10);
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_load_malformed_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ server: ").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, crate::error::BuilderError::Config(_)));
    }

    #[test]
    fn test_logging_config_defaults() {
        let config: Config = json5::from_str(r#"{ "logging": {} }"#).unwrap();
        let logging = config.logging.expect("logging should be present");
        assert_eq!(logging.format, "plain");
        assert!(logging.level.is_none());
        assert!(logging.filters.is_empty());
    }

    #[test]
    fn test_validate_zero_port_errors() {
        let config = Config {
            server: Some(ServerConfig {
                port: 0,
                host: "localhost".into(),
                cors: false,
            }),
            ..Config::default()
        };
        let (_warnings, errors) = config.validate();
        assert!(
            errors.iter().any(|e| e.contains("port")),
            "Expected an error about the port, got: {errors:?}"
        );
    }

    #[test]
    fn test_validate_unknown_log_format_warns() {
        let config = Config {
            logging: Some(LoggingConfig {
                format: "xml".into(),
                level: None,
                filters: vec![],
            }),
            ..Config::default()
        };
        let (warnings, errors) = config.validate();
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
