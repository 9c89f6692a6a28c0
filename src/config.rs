//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sdub/sdub.toml`
//! 3. Environment variables: `SDUB_*` prefix

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, EnvSnapshot};

/// Unified configuration for sdub.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Sleep between two checks of a waiter, in milliseconds (default: 1000)
    pub poll_interval_ms: u64,
    /// Upper bound for a single connect/request attempt, in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Directory template names are resolved against (default: /)
    pub template_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            connect_timeout_ms: 5000,
            template_root: PathBuf::from("/"),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep current).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub poll_interval_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    pub template_root: Option<PathBuf>,
}

/// Get the XDG config directory for sdub.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sdub").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sdub.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Load settings with layered precedence from the XDG config location.
    pub fn load(env: &EnvSnapshot) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), env)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `global_path` - Optional config file; skipped if it does not exist
    /// * `env` - Snapshot providing `SDUB_*` overrides and `$VAR` expansion
    pub fn load_from(global_path: Option<&Path>, env: &EnvSnapshot) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config file
        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        // Expand ~ and $VAR in path-like fields
        current.template_root = PathBuf::from(expand_env_vars(
            current.template_root.to_string_lossy().as_ref(),
            env,
        ));

        current.validate()?;
        Ok(current)
    }

    /// Overlay wins if Some, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            poll_interval_ms: overlay.poll_interval_ms.unwrap_or(self.poll_interval_ms),
            connect_timeout_ms: overlay
                .connect_timeout_ms
                .unwrap_or(self.connect_timeout_ms),
            template_root: overlay
                .template_root
                .clone()
                .unwrap_or_else(|| self.template_root.clone()),
        }
    }

    /// Apply SDUB_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: &EnvSnapshot) -> Result<Self, ApplicationError> {
        let source: config::Map<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SDUB")
                    .try_parsing(true)
                    .source(Some(source)),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get::<u64>("poll_interval_ms"))? {
            settings.poll_interval_ms = val;
        }
        if let Some(val) = optional(config.get::<u64>("connect_timeout_ms"))? {
            settings.connect_timeout_ms = val;
        }
        if let Some(val) = optional(config.get_string("template_root"))? {
            settings.template_root = PathBuf::from(val);
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.poll_interval_ms == 0 {
            return Err(ApplicationError::Config {
                message: "poll_interval_ms must be greater than 0".to_string(),
            });
        }
        if self.connect_timeout_ms == 0 {
            return Err(ApplicationError::Config {
                message: "connect_timeout_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Treat a missing key as `None`, any other failure as a config error.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
