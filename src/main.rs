use clap::Parser;
use colored::*;
use seqseek::cli::{commands, Cli, Commands};
use seqseek::SeqseekError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // SEQSEEK_LOG sets the filter; -v / -vv raise it
    let filter = match cli.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env("SEQSEEK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config_path();
    let config = cli.load_config()?;

    match cli.command {
        Commands::Search(args) => commands::search::run(args, &config),
        Commands::Blast(args) => commands::blast::run(args, &config),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Config(args) => commands::config::run(args, &config, &config_path),
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<SeqseekError>() {
        Some(SeqseekError::Config(_)) => 2,
        Some(SeqseekError::Io(_)) => 3,
        Some(SeqseekError::Parse(_)) => 4,
        Some(SeqseekError::Transport { .. }) | Some(SeqseekError::Network(_)) => 5,
        Some(SeqseekError::Validation(_)) => 6,
        Some(SeqseekError::Submission(_)) | Some(SeqseekError::JobFailed { .. }) => 7,
        Some(SeqseekError::Timeout { .. }) => 8,
        Some(SeqseekError::Cancelled) => 130,
        _ => 1,
    }
}
