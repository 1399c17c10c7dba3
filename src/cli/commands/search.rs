use anyhow::{Context, Result};
use clap::Args;
use colored::*;

use crate::cli::output::{self, create_spinner, create_standard_table, header_cell};
use crate::core::config::{Config, EutilsConfig};
use crate::ncbi::{EutilsClient, LookupResult};
use crate::query::{search_params, SearchRequest};
use crate::transport::ReqwestTransport;

#[derive(Args)]
pub struct SearchArgs {
    /// Search term, e.g. a gene or condition name
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Entrez database to search (default from config: nucleotide)
    #[arg(long)]
    pub db: Option<String>,

    /// Maximum identifiers the search returns
    #[arg(long)]
    pub retmax: Option<u32>,

    /// How many hits to summarise and fetch
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print the records as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Print the esearch URL without contacting NCBI
    #[arg(long)]
    pub dry_run: bool,
}

impl SearchArgs {
    fn eutils_config(&self, config: &Config) -> EutilsConfig {
        let mut eutils = config.eutils.clone();
        if let Some(db) = &self.db {
            eutils.database = db.clone();
        }
        if let Some(retmax) = self.retmax {
            eutils.max_results = retmax;
        }
        if let Some(limit) = self.limit {
            eutils.display_limit = limit;
        }
        eutils
    }
}

pub fn run(args: SearchArgs, config: &Config) -> Result<()> {
    let eutils = args.eutils_config(config);
    let request = SearchRequest::new(args.term.clone(), eutils.database.clone(), eutils.max_results)?;

    if args.dry_run {
        let params = eutils.credentials().apply(search_params(&request));
        let url = params.to_url(&eutils.endpoint("esearch"))?;
        println!("{}", url);
        return Ok(());
    }

    let transport = ReqwestTransport::new(&config.http)?;
    let client = EutilsClient::new(transport, eutils);

    let pb = create_spinner(&format!(
        "Searching {} for '{}'...",
        request.database, request.term
    ));
    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(client.lookup(&request));
    pb.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(e) if e.is_warning() => {
            output::warning(&e.to_string());
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("search for '{}' failed", request.term))
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.records)?);
    } else {
        print_lookup(&result);
    }

    Ok(())
}

fn print_lookup(result: &LookupResult) {
    output::section_header(&format!(
        "{} results for '{}'",
        result.request.database, result.request.term
    ));
    output::tree_items(&[
        ("Identifiers returned", output::format_number(result.total_hits)),
        ("Shown", result.ids.len().to_string()),
        ("IDs", result.ids.joined()),
    ]);

    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Gene title"),
        header_cell("Accession"),
        header_cell("Length"),
    ]);
    for record in &result.records {
        let summary = result.summaries.get(&record.identifier);
        let accession = summary
            .and_then(|s| s.accession_version.clone())
            .unwrap_or_else(|| "-".to_string());
        let length = summary
            .and_then(|s| s.length)
            .map(|len| output::format_number(len as usize))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            record.identifier.clone(),
            record.title.clone(),
            accession,
            length,
        ]);
    }
    println!("{}", table);

    output::section_header("Sequences");
    if result.fasta.trim().is_empty() {
        println!("{}", "(efetch returned no sequence text)".dimmed());
    } else {
        println!("{}", result.fasta.trim_end());
    }
}
