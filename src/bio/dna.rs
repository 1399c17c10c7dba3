/// DNA query validation used before a nucleotide BLAST submission
use crate::error::{Result, SeqseekError};

/// Returns true when every character is one of A, T, C, G (any case).
///
/// Holds vacuously for `""`; emptiness is checked by [`validate_dna_query`].
pub fn is_valid_dna(sequence: &str) -> bool {
    sequence
        .chars()
        .all(|c| matches!(c.to_ascii_uppercase(), 'A' | 'T' | 'C' | 'G'))
}

/// Residues of a pasted query with FASTA header lines and whitespace removed
pub fn query_residues(input: &str) -> String {
    input
        .lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Check a raw (possibly FASTA-formatted) query and return its residues
pub fn validate_dna_query(input: &str) -> Result<String> {
    let residues = query_residues(input);

    if residues.is_empty() {
        return Err(SeqseekError::Validation(
            "query contains no sequence".to_string(),
        ));
    }

    if !is_valid_dna(&residues) {
        return Err(SeqseekError::Validation(
            "DNA sequence may only contain A, T, C and G".to_string(),
        ));
    }

    Ok(residues)
}
