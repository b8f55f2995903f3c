//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use tissuewatch_config::ConfigError;
use tissuewatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 5;
    pub const DATA: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Sources ──────────────────────────────────────────────────────

    #[error("No device snapshot configured")]
    #[diagnostic(
        code(tissuewatch::no_sources),
        help(
            "Pass --devices <FILE>, set TISSUEWATCH_DEVICES, or create a profile with:\n\
             tissuewatch config init --dir <snapshot dir>\n\
             Expected config at: {path}"
        )
    )]
    NoSources { path: String },

    #[error("Cannot read {}", path.display())]
    #[diagnostic(
        code(tissuewatch::source_unreadable),
        help("Check that the snapshot file exists and is readable.")
    )]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decode {source_name} snapshot: {message}")]
    #[diagnostic(
        code(tissuewatch::decode),
        help("Snapshots must be JSON arrays of objects.")
    )]
    Decode {
        source_name: String,
        message: String,
    },

    // ── Lookup ───────────────────────────────────────────────────────

    #[error("Device '{identifier}' not found")]
    #[diagnostic(
        code(tissuewatch::not_found),
        help("Run: tissuewatch devices list to see available devices")
    )]
    NotFound { identifier: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tissuewatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tissuewatch::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: tissuewatch config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Invalid configuration for {field}: {reason}")]
    #[diagnostic(
        code(tissuewatch::invalid_config),
        help("Fix the profile in the config file, or pass the path as a flag.")
    )]
    InvalidConfig { field: String, reason: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(tissuewatch::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(tissuewatch::config))]
    Config(Box<figment::Error>),

    #[error("Cannot write config: {0}")]
    #[diagnostic(code(tissuewatch::config_write))]
    ConfigWrite(String),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::NoSources { .. }
            | Self::ProfileNotFound { .. }
            | Self::InvalidConfig { .. }
            | Self::ConfigExists { .. }
            | Self::Config(_)
            | Self::ConfigWrite(_) => exit_code::CONFIG,
            Self::SourceUnreadable { .. } | Self::Decode { .. } => exit_code::DATA,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Decode {
                source_name,
                message,
            } => Self::Decode {
                source_name,
                message,
            },
            CoreError::DeviceNotFound { identifier } => Self::NotFound { identifier },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::InvalidConfig { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Figment(err) => Self::Config(err),
            ConfigError::Serialization(err) => Self::ConfigWrite(err.to_string()),
            ConfigError::Io(err) => Self::Io(err),
        }
    }
}
