use anyhow::Result;
use clap::Args;

use crate::bio::dna::validate_dna_query;
use crate::cli::output;

#[derive(Args)]
pub struct ValidateArgs {
    /// Sequence to check (raw residues or FASTA text)
    #[arg(value_name = "SEQUENCE")]
    pub sequence: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    match validate_dna_query(&args.sequence) {
        Ok(residues) => {
            output::success(&format!("Valid DNA sequence ({} bases)", residues.len()));
            Ok(())
        }
        Err(e) => {
            output::error("Sequence rejected");
            Err(e.into())
        }
    }
}
