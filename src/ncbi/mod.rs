//! NCBI E-utilities: search, then summary and FASTA fetch for the top hits.

pub mod eutils;
pub mod summary;

pub use eutils::{parse_search, EutilsClient, LookupResult};
pub use summary::{assemble_records, parse_summaries, DocumentSummary};
