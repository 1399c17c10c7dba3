pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{load_or_default, Config};
use crate::core::paths;

#[derive(Parser)]
#[command(
    name = "seqseek",
    version,
    about = "Search NCBI nucleotide records and run remote BLAST searches",
    long_about = "seqseek looks up sequences through the NCBI E-utilities (esearch, esummary, \
                  efetch) and submits queries to the NCBI BLAST URL API, polling each job \
                  until its result is ready."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ${SEQSEEK_HOME}/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search an Entrez database and show titles and sequences of the top hits
    Search(commands::search::SearchArgs),

    /// Submit a query to NCBI BLAST and wait for the result
    Blast(commands::blast::BlastArgs),

    /// Check that a sequence is plain DNA (A, T, C, G)
    Validate(commands::validate::ValidateArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(paths::default_config_path)
    }

    /// Load the configuration; a missing default file means defaults
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        if self.config.is_some() && !path.exists() {
            anyhow::bail!(crate::SeqseekError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        load_or_default(&path).with_context(|| format!("loading {}", path.display()))
    }

    /// Filter directive implied by `-v` flags, if any
    pub fn log_directive(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("seqseek=info"),
            _ => Some("seqseek=debug"),
        }
    }
}
