//! Request parameter builders for the E-utilities and BLAST URL APIs.
//!
//! Everything here is pure: builders take validated values and return
//! [`QueryParams`]; sending them is the transport's job.

pub mod blast;
pub mod params;

pub use blast::{blast_status_params, blast_submit_params, BlastProgram, BlastRequest};
pub use params::QueryParams;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqseekError};

/// A free-text search against one Entrez database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub term: String,
    pub database: String,
    pub max_results: u32,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>, database: impl Into<String>, max_results: u32) -> Result<Self> {
        let request = Self {
            term: term.into(),
            database: database.into(),
            max_results,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        if self.term.trim().is_empty() {
            return Err(SeqseekError::Validation("search term is empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(SeqseekError::Validation("database name is empty".to_string()));
        }
        if self.max_results == 0 {
            return Err(SeqseekError::Validation(
                "max_results must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Identifiers returned by esearch, in service order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdList(Vec<String>);

impl IdList {
    pub fn new(ids: Vec<String>) -> Self {
        Self(ids)
    }

    /// The first `count` identifiers
    pub fn first(&self, count: usize) -> IdList {
        IdList(self.0.iter().take(count).cloned().collect())
    }

    /// Comma-joined form used by esummary/efetch `id=`
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for IdList {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl<'a> From<Vec<&'a str>> for IdList {
    fn from(ids: Vec<&'a str>) -> Self {
        Self(ids.into_iter().map(str::to_string).collect())
    }
}

/// Identification NCBI asks E-utilities callers to send
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub tool: Option<String>,
    pub email: Option<String>,
    pub api_key: Option<String>,
}

impl Credentials {
    pub fn apply(&self, params: QueryParams) -> QueryParams {
        params
            .with_opt("tool", self.tool.as_deref())
            .with_opt("email", self.email.as_deref())
            .with_opt("api_key", self.api_key.as_deref())
    }
}

/// esearch parameters
pub fn search_params(request: &SearchRequest) -> QueryParams {
    QueryParams::new()
        .with("db", &request.database)
        .with("term", &request.term)
        .with("retmax", request.max_results)
        .with("retmode", "json")
}

/// esummary parameters
pub fn summary_params(ids: &IdList, database: &str) -> QueryParams {
    QueryParams::new()
        .with("db", database)
        .with("id", ids.joined())
        .with("retmode", "json")
}

/// efetch parameters for FASTA text
pub fn fetch_params(ids: &IdList, database: &str) -> QueryParams {
    QueryParams::new()
        .with("db", database)
        .with("id", ids.joined())
        .with("retmode", "text")
        .with("rettype", "fasta")
}
