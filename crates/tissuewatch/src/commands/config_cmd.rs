//! Config subcommand handlers.

use std::path::Path;

use crate::cli::{ConfigArgs, ConfigCommand};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, quiet: bool) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let rendered = toml::to_string_pretty(&cfg)
                .map_err(|e| CliError::ConfigWrite(e.to_string()))?;
            output::print_output(rendered.trim_end(), quiet);
            Ok(())
        }

        ConfigCommand::Init { dir, force } => init(&dir, force, quiet),
    }
}

fn init(dir: &Path, force: bool, quiet: bool) -> Result<(), CliError> {
    let target = config::config_path();
    if target.exists() && !force {
        return Err(CliError::ConfigExists {
            path: target.display().to_string(),
        });
    }

    let dir = std::path::absolute(dir)?;
    let path = config::save_config(&Config::starter(&dir))?;
    tracing::info!(path = %path.display(), "wrote starter config");
    if !quiet {
        eprintln!("Config written to {}", path.display());
        eprintln!("Snapshots expected in {}", dir.display());
    }
    Ok(())
}
