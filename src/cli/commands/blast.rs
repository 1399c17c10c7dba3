use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::blast::{self, BlastClient, BlastReport, PollEvent};
use crate::cli::output::{self, create_spinner};
use crate::core::config::{BlastConfig, Config};
use crate::query::{blast_submit_params, BlastProgram, BlastRequest};
use crate::transport::ReqwestTransport;

#[derive(Args)]
pub struct BlastArgs {
    /// Query sequence (raw residues or FASTA text)
    #[arg(value_name = "SEQUENCE", required_unless_present = "file", conflicts_with = "file")]
    pub sequence: Option<String>,

    /// Read the query from a file instead
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// BLAST program (blastn, blastp, blastx, tblastn, tblastx)
    #[arg(long)]
    pub program: Option<BlastProgram>,

    /// Target database, e.g. nt
    #[arg(long)]
    pub db: Option<String>,

    /// Expect value threshold
    #[arg(long)]
    pub expect: Option<f64>,

    /// Word size
    #[arg(long)]
    pub word_size: Option<u32>,

    /// Seconds between status checks
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Status checks before giving up
    #[arg(long, value_name = "N")]
    pub max_polls: Option<u32>,

    /// Overall time limit in seconds (0 = none)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Write the finished report as JSON to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the submission URL without contacting NCBI
    #[arg(long)]
    pub dry_run: bool,
}

impl BlastArgs {
    fn blast_config(&self, config: &Config) -> BlastConfig {
        let mut blast = config.blast.clone();
        if let Some(program) = self.program {
            blast.program = program;
        }
        if let Some(db) = &self.db {
            blast.database = db.clone();
        }
        if let Some(expect) = self.expect {
            blast.expect_value = expect;
        }
        if let Some(word_size) = self.word_size {
            blast.word_size = word_size;
        }
        if let Some(interval) = self.interval {
            blast.poll_interval_secs = interval;
        }
        if let Some(max_polls) = self.max_polls {
            blast.max_polls = max_polls;
        }
        if let Some(timeout) = self.timeout {
            blast.timeout_secs = timeout;
        }
        blast
    }

    fn read_query(&self) -> Result<String> {
        match (&self.sequence, &self.file) {
            (Some(sequence), _) => Ok(sequence.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("reading query from {}", path.display())),
            (None, None) => anyhow::bail!("either SEQUENCE or --file is required"),
        }
    }
}

pub fn run(args: BlastArgs, config: &Config) -> Result<()> {
    let blast = args.blast_config(config);
    let query = args.read_query()?;
    let request = BlastRequest::new(
        blast.program,
        blast.database.clone(),
        query,
        blast.expect_value,
        blast.word_size,
    )?;

    if args.dry_run {
        let url = blast_submit_params(&request).to_url(&blast.base_url)?;
        println!("{}", url);
        return Ok(());
    }

    let transport = ReqwestTransport::new(&config.http)?;
    let client = Arc::new(BlastClient::from_config(transport, &blast));
    let policy = blast.poll_policy();

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(async move {
        let pb = create_spinner(&format!(
            "Submitting {} search against {}...",
            request.program, request.database
        ));
        let progress = pb.clone();
        let mut rid = String::new();

        let task = blast::spawn(client, request, policy, move |event| match event {
            PollEvent::Submitted {
                rid: id,
                estimated_seconds,
            } => {
                rid = id.clone();
                match estimated_seconds {
                    Some(secs) => progress.set_message(format!(
                        "Job {} submitted, estimated {}s",
                        rid, secs
                    )),
                    None => progress.set_message(format!("Job {} submitted", rid)),
                }
            }
            PollEvent::InitialDelay(_) => {}
            PollEvent::Checked { attempt, status } => {
                progress.set_message(format!("Job {} {} (check {})", rid, status, attempt));
            }
            PollEvent::Sleeping { attempt, delay } => {
                progress.set_message(format!(
                    "Job {} waiting (check {}, next in {})",
                    rid,
                    attempt,
                    format_delay(*delay)
                ));
            }
        });

        let cancel = task.cancel_token();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received");
                cancel.cancel();
            }
        });

        let result = task.join().await;
        interrupt.abort();
        pb.finish_and_clear();
        result
    })?;

    write_report(&report, args.output.as_deref())
}

fn write_report(report: &BlastReport, path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(path) => {
            let json = serde_json::to_string_pretty(report)?;
            std::fs::write(path, json)
                .with_context(|| format!("writing report to {}", path.display()))?;

            output::success(&format!("BLAST search {} complete", report.rid));
            output::tree_items(&[
                ("Program", report.program.to_string()),
                ("Database", report.database.clone()),
                ("Status checks", report.polls.to_string()),
                ("Elapsed", format!("{:.1}s", report.elapsed_secs)),
                ("Report", path.display().to_string()),
            ]);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&report.payload)?);
        }
    }
    Ok(())
}

fn format_delay(delay: Duration) -> String {
    if delay.as_millis() < 1000 {
        format!("{}ms", delay.as_millis())
    } else {
        format!("{}s", delay.as_secs())
    }
}
