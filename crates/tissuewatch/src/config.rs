//! CLI configuration: thin wrapper around `tissuewatch_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--devices, --output, etc.).

use clap::ValueEnum;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use tissuewatch_config::{Config, SourcePaths, config_path, load_config, save_config};

// ── Resolved settings ───────────────────────────────────────────────

/// Output and polling settings after flags, env and config are layered.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub watch_interval: u64,
}

/// Layer `--output` / `--color` over the config defaults.
///
/// Unknown values in the config file fall back to `table` / `auto` with a
/// warning rather than failing the command.
pub fn resolve_settings(global: &GlobalOpts, cfg: &Config) -> Settings {
    let output = global
        .output
        .unwrap_or_else(|| parse_or(&cfg.defaults.output, "defaults.output", OutputFormat::Table));
    let color = global
        .color
        .unwrap_or_else(|| parse_or(&cfg.defaults.color, "defaults.color", ColorMode::Auto));

    Settings {
        output,
        color: output::should_color(color),
        quiet: global.quiet,
        watch_interval: cfg.defaults.watch_interval,
    }
}

fn parse_or<T: ValueEnum>(raw: &str, field: &str, fallback: T) -> T {
    T::from_str(raw, true).unwrap_or_else(|_| {
        tracing::warn!(field, value = raw, "ignoring unrecognized config value");
        fallback
    })
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve snapshot locations: flag > env > profile.
///
/// An explicitly requested profile must exist; the implicit default profile
/// may be missing as long as `--devices` is given.
pub fn resolve_sources(global: &GlobalOpts, cfg: &Config) -> Result<SourcePaths, CliError> {
    let name = active_profile_name(global, cfg);
    let profile = match cfg.profile(&name) {
        Ok(profile) => Some(profile),
        Err(err) if global.profile.is_some() => return Err(err.into()),
        Err(_) => None,
    };

    let devices = match (&global.devices, profile) {
        (Some(path), _) => path.clone(),
        (None, Some(profile)) => profile.sources(&name)?.devices,
        (None, None) => {
            return Err(CliError::NoSources {
                path: config_path().display().to_string(),
            });
        }
    };

    let sources = SourcePaths {
        devices,
        analytics: global
            .analytics
            .clone()
            .or_else(|| profile.and_then(|p| p.analytics.clone())),
        status: global
            .status
            .clone()
            .or_else(|| profile.and_then(|p| p.status.clone())),
    };
    tracing::debug!(profile = %name, ?sources, "resolved snapshot sources");
    Ok(sources)
}
