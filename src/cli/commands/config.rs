use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::Path;

use crate::cli::output;
use crate::core::config::{save_config, Config};
use crate::core::paths;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print where configuration is read from
    Path,
}

pub fn run(args: ConfigArgs, config: &Config, path: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let text = toml::to_string_pretty(config).context("serializing configuration")?;
            println!("{}", text);
        }
        ConfigCommands::Init { force } => init(path, force)?,
        ConfigCommands::Path => {
            println!("{}", paths::describe_paths());
            let state = if path.exists() { "present" } else { "missing, defaults in use" };
            output::info(&format!("Active config: {} ({})", path.display(), state));
        }
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        output::warning(&format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
        return Ok(());
    }

    save_config(path, &Config::default())?;
    output::success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
