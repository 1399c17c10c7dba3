use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::params::QueryParams;
use crate::bio::dna::{query_residues, validate_dna_query};
use crate::error::{Result, SeqseekError};

/// Result format requested from the BLAST URL API
pub const FORMAT_TYPE: &str = "JSON2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlastProgram {
    Blastn,
    Blastp,
    Blastx,
    Tblastn,
    Tblastx,
}

impl BlastProgram {
    pub const ALL: [BlastProgram; 5] = [
        BlastProgram::Blastn,
        BlastProgram::Blastp,
        BlastProgram::Blastx,
        BlastProgram::Tblastn,
        BlastProgram::Tblastx,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlastProgram::Blastn => "blastn",
            BlastProgram::Blastp => "blastp",
            BlastProgram::Blastx => "blastx",
            BlastProgram::Tblastn => "tblastn",
            BlastProgram::Tblastx => "tblastx",
        }
    }

    /// Programs whose query is a nucleotide sequence
    pub fn takes_nucleotide_query(&self) -> bool {
        matches!(
            self,
            BlastProgram::Blastn | BlastProgram::Blastx | BlastProgram::Tblastx
        )
    }
}

impl fmt::Display for BlastProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BlastProgram {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blastn" => Ok(BlastProgram::Blastn),
            "blastp" => Ok(BlastProgram::Blastp),
            "blastx" => Ok(BlastProgram::Blastx),
            "tblastn" => Ok(BlastProgram::Tblastn),
            "tblastx" => Ok(BlastProgram::Tblastx),
            _ => Err(format!("Unknown BLAST program: {}", s)),
        }
    }
}

/// A validated BLAST search, ready to submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastRequest {
    pub program: BlastProgram,
    pub database: String,
    pub query: String,
    pub expect_value: f64,
    pub word_size: u32,
}

impl BlastRequest {
    pub fn new(
        program: BlastProgram,
        database: impl Into<String>,
        query: impl Into<String>,
        expect_value: f64,
        word_size: u32,
    ) -> Result<Self> {
        let request = Self {
            program,
            database: database.into(),
            query: query.into(),
            expect_value,
            word_size,
        };
        request.validate()?;
        Ok(request)
    }

    /// Checks run before anything is sent to NCBI
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(SeqseekError::Validation("database name is empty".to_string()));
        }
        if !self.expect_value.is_finite() || self.expect_value <= 0.0 {
            return Err(SeqseekError::Validation(format!(
                "expect value must be positive, got {}",
                self.expect_value
            )));
        }
        if self.word_size == 0 {
            return Err(SeqseekError::Validation(
                "word size must be greater than zero".to_string(),
            ));
        }

        if self.program.takes_nucleotide_query() {
            validate_dna_query(&self.query)?;
        } else if query_residues(&self.query).is_empty() {
            return Err(SeqseekError::Validation("query contains no sequence".to_string()));
        }
        Ok(())
    }
}

/// `CMD=Put` parameters
pub fn blast_submit_params(request: &BlastRequest) -> QueryParams {
    QueryParams::new()
        .with("CMD", "Put")
        .with("QUERY", &request.query)
        .with("PROGRAM", request.program)
        .with("DATABASE", &request.database)
        .with("EXPECT", request.expect_value)
        .with("WORD_SIZE", request.word_size)
        .with("FORMAT_TYPE", FORMAT_TYPE)
}

/// `CMD=Get` parameters for one status check
pub fn blast_status_params(rid: &str) -> QueryParams {
    QueryParams::new()
        .with("CMD", "Get")
        .with("RID", rid)
        .with("FORMAT_TYPE", FORMAT_TYPE)
}
