pub mod dna;
pub mod fasta;
pub mod sequence;

pub use dna::{is_valid_dna, query_residues};
pub use sequence::{FastaRecord, SequenceRecord, UNKNOWN_TITLE};
