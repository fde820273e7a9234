//! TOML-based configuration persistence.
//!
//! Reads and writes [`AppConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\llhook\config.toml`
//! - Linux:    `~/.config/llhook/config.toml`
//! - macOS:    `~/Library/Application Support/llhook/config.toml`
//!
//! ```toml
//! [hooks]
//! keyboard = true
//! mouse = false
//!
//! [output]
//! format = "text"
//! log_level = "info"
//! ```
//!
//! Every field has a `#[serde(default = ...)]`, so a missing section or a
//! missing key falls back to the values shown above. On first run the file
//! is created with those defaults so there is something to edit.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub hooks: HooksConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which devices to hook at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HooksConfig {
    #[serde(default = "default_true")]
    pub keyboard: bool,
    #[serde(default)]
    pub mouse: bool,
}

/// How the binary reports events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// `tracing` level used when `RUST_LOG` is unset: `"error"`, `"warn"`,
    /// `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Event print format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per event.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            keyboard: default_true(),
            mouse: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the platform config base
/// directory cannot be determined from the environment.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(dir.join("config.toml"))
}

/// Loads [`AppConfig`] from the platform config file, writing the defaults
/// there first if the file does not exist yet.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if there is no config
/// directory, otherwise see [`load_or_create_config_at`].
pub fn load_or_create_config() -> Result<AppConfig, ConfigError> {
    load_or_create_config_at(&config_file_path()?)
}

/// Loads [`AppConfig`] from `path`, creating the file with defaults if absent.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Serialize`] if the default
/// file cannot be written, and any error of [`load_config_from`].
pub fn load_or_create_config_at(path: &Path) -> Result<AppConfig, ConfigError> {
    if path.exists() {
        return load_config_from(path);
    }
    let config = AppConfig::default();
    save_config_to(&config, path)?;
    Ok(config)
}

/// Loads [`AppConfig`] from `path`; a missing file yields the default.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config directory, including the `llhook` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("llhook"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("llhook"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("llhook")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
