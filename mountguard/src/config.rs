//! Process configuration for mount validation.
//!
//! The configuration is a JSON object read once at startup. Only
//! `appsDataset` is required; capability flags default to enabled and
//! `ignorePaths` extends the built-in ignore list.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use mountguard_shared::errors::{MountError, MountResult};
use serde::Deserialize;

/// Directory holding the default configuration file.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/mountguard";

/// Name of the default configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "MOUNTGUARD_CONFIG";

static CONFIG: OnceLock<MountConfig> = OnceLock::new();

// ============================================================================
// HOST SETTINGS
// ============================================================================

/// Settings supplied by the embedding application.
///
/// Implementations may compute values on every call; the validator queries
/// them per request and never caches the answers.
pub trait HostSettings: Send + Sync {
    /// Master switch. When off, dataset-source-path validation is a no-op.
    fn can_verify_volumes(&self) -> bool;

    fn can_verify_locked_volumes(&self) -> bool;

    fn can_verify_attach_path(&self) -> bool;

    /// Name of the root dataset that holds app releases.
    fn root_dataset(&self) -> String;

    /// Extra ignore prefixes on top of the built-in list.
    fn ignore_paths(&self) -> Vec<String>;
}

// ============================================================================
// MOUNT CONFIG
// ============================================================================

/// Typed configuration, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountConfig {
    pub apps_dataset: String,
    pub verify_volumes: bool,
    pub verify_locked_volumes: bool,
    pub verify_attach_path: bool,
    pub ignore_paths: Vec<String>,
}

/// On-disk shape. `appsDataset` is optional here so a missing key gets
/// its own message instead of serde's generic one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    apps_dataset: Option<String>,
    #[serde(default = "enabled")]
    verify_volumes: bool,
    #[serde(default = "enabled")]
    verify_locked_volumes: bool,
    #[serde(default = "enabled")]
    verify_attach_path: bool,
    #[serde(default)]
    ignore_paths: Vec<String>,
}

const fn enabled() -> bool {
    true
}

impl MountConfig {
    /// Config with every check enabled and no extra ignore paths.
    pub fn new(apps_dataset: impl Into<String>) -> Self {
        Self {
            apps_dataset: apps_dataset.into(),
            verify_volumes: true,
            verify_locked_volumes: true,
            verify_attach_path: true,
            ignore_paths: Vec::new(),
        }
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(data: &str) -> MountResult<Self> {
        let raw: RawConfig = serde_json::from_str(data)?;

        let apps_dataset = raw
            .apps_dataset
            .ok_or_else(|| MountError::Config("appsDataset key must be specified".to_string()))?;

        Ok(Self {
            apps_dataset,
            verify_volumes: raw.verify_volumes,
            verify_locked_volumes: raw.verify_locked_volumes,
            verify_attach_path: raw.verify_attach_path,
            ignore_paths: raw.ignore_paths,
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> MountResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            MountError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&data).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to load configuration");
        })
    }
}

impl HostSettings for MountConfig {
    fn can_verify_volumes(&self) -> bool {
        self.verify_volumes
    }

    fn can_verify_locked_volumes(&self) -> bool {
        self.verify_locked_volumes
    }

    fn can_verify_attach_path(&self) -> bool {
        self.verify_attach_path
    }

    fn root_dataset(&self) -> String {
        self.apps_dataset.clone()
    }

    fn ignore_paths(&self) -> Vec<String> {
        self.ignore_paths.clone()
    }
}

// ============================================================================
// PROCESS-WIDE STORE
// ============================================================================

/// Location of the configuration file: `$MOUNTGUARD_CONFIG` or the default.
pub fn default_config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE))
}

/// Load the process-wide configuration from the default location.
pub fn init_config() -> MountResult<&'static MountConfig> {
    init_config_from(default_config_path())
}

/// Load the process-wide configuration from `path`.
///
/// Only the first successful call stores a value; later calls return the
/// stored configuration without touching the filesystem.
pub fn init_config_from(path: impl AsRef<Path>) -> MountResult<&'static MountConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    let loaded = MountConfig::load(path)?;
    Ok(CONFIG.get_or_init(|| loaded))
}

/// The process-wide configuration, if [`init_config`] has succeeded.
pub fn config() -> Option<&'static MountConfig> {
    CONFIG.get()
}
