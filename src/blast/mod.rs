//! Remote BLAST: submit a search, then poll its request ID until it settles.

pub mod poller;
pub mod status;
pub mod submit;
pub mod task;

pub use poller::{BlastClient, BlastReport, PollEvent, PollPolicy};
pub use status::{classify_status, StatusCheck};
pub use submit::{parse_submission, SubmissionReceipt};
pub use task::{spawn, BlastTask};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SeqseekError};
use crate::query::{BlastProgram, BlastRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Submitted,
    Waiting,
    Failed,
    Ready,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Failed | JobStatus::Ready)
    }

    /// Status only moves forward; terminal states accept nothing
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        match self {
            JobStatus::Submitted | JobStatus::Waiting => next != JobStatus::Submitted,
            JobStatus::Failed | JobStatus::Ready => false,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Submitted => "submitted",
            JobStatus::Waiting => "waiting",
            JobStatus::Failed => "failed",
            JobStatus::Ready => "ready",
        };
        write!(f, "{}", label)
    }
}

/// A submitted BLAST search, identified by the service-assigned RID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastJob {
    request_id: String,
    pub program: BlastProgram,
    pub database: String,
    pub expect_value: f64,
    pub word_size: u32,
    status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    pub estimated_seconds: Option<u64>,
}

impl BlastJob {
    pub fn new(receipt: SubmissionReceipt, request: &BlastRequest) -> Self {
        Self {
            request_id: receipt.rid,
            program: request.program,
            database: request.database.clone(),
            expect_value: request.expect_value,
            word_size: request.word_size,
            status: JobStatus::Submitted,
            submitted_at: Utc::now(),
            estimated_seconds: receipt.estimated_seconds,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn advance(&mut self, next: JobStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(SeqseekError::InvalidTransition(format!(
                "job {} cannot go from {} to {}",
                self.request_id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}
