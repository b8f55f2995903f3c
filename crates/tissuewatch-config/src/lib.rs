//! Shared configuration for tissuewatch.
//!
//! TOML profiles naming the snapshot files for each deployment, plus output
//! defaults. Loaded through figment: built-in defaults, then the config
//! file, then `TISSUEWATCH_`-prefixed environment variables (nested keys
//! separated by `__`, e.g. `TISSUEWATCH_DEFAULTS__OUTPUT=json`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named snapshot profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Seconds between snapshot reloads in `watch`.
    #[serde(default = "default_watch_interval")]
    pub watch_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            watch_interval: default_watch_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_watch_interval() -> u64 {
    30
}

/// Where one deployment's snapshot files live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Device registry export (JSON array).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<PathBuf>,

    /// Analytics aggregate export. Missing means no analytics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<PathBuf>,

    /// Realtime status export. Missing means no live status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PathBuf>,
}

/// Fully resolved snapshot locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub devices: PathBuf,
    pub analytics: Option<PathBuf>,
    pub status: Option<PathBuf>,
}

impl Profile {
    /// Resolve this profile into source paths. The devices file is required.
    pub fn sources(&self, profile_name: &str) -> Result<SourcePaths, ConfigError> {
        let devices = self
            .devices
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::Validation {
                field: format!("profiles.{profile_name}.devices"),
                reason: "a devices snapshot path is required".into(),
            })?;
        Ok(SourcePaths {
            devices,
            analytics: self.analytics.clone(),
            status: self.status.clone(),
        })
    }
}

impl Config {
    /// Look up a named profile.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| {
            let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            ConfigError::ProfileNotFound {
                name: name.into(),
                available: if names.is_empty() {
                    "none".into()
                } else {
                    names.join(", ")
                },
            }
        })
    }

    /// A starter config with one `default` profile pointing at `dir`.
    pub fn starter(dir: &Path) -> Self {
        let profile = Profile {
            devices: Some(dir.join("devices.json")),
            analytics: Some(dir.join("analytics.json")),
            status: Some(dir.join("status.json")),
        };
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([("default".to_owned(), profile)]),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tissuewatch", "tissuewatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tissuewatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TISSUEWATCH_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
