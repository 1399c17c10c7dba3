use serde::{Deserialize, Serialize};

/// Title shown when a summary carries no title for an identifier
pub const UNKNOWN_TITLE: &str = "Unknown Gene Name";

/// One record parsed out of an efetch FASTA response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastaRecord {
    pub accession: String,
    pub description: Option<String>,
    pub residues: String,
}

impl FastaRecord {
    pub fn new(accession: String, residues: String) -> Self {
        Self {
            accession,
            description: None,
            residues,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Accession without its `.version` suffix
    pub fn base_accession(&self) -> &str {
        self.accession
            .split_once('.')
            .map(|(base, _)| base)
            .unwrap_or(&self.accession)
    }
}

/// Gene title plus sequence text for one search hit.
///
/// Built from the summary and fetch responses for the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub identifier: String,
    pub title: String,
    pub sequence_text: String,
}

impl SequenceRecord {
    pub fn new(identifier: impl Into<String>, title: Option<String>, sequence_text: String) -> Self {
        Self {
            identifier: identifier.into(),
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            sequence_text,
        }
    }

    pub fn has_sequence(&self) -> bool {
        !self.sequence_text.is_empty()
    }
}
