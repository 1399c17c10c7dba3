use serde_json::Value;

use super::JobStatus;
use crate::error::{Result, SeqseekError};

const WAITING_MARKER: &str = "Status=WAITING";
const FAILED_MARKER: &str = "Status=FAILED";
const UNKNOWN_MARKER: &str = "Status=UNKNOWN";

/// What one `CMD=Get` response says about the job
#[derive(Debug, Clone, PartialEq)]
pub enum StatusCheck {
    Waiting,
    Failed(String),
    Ready(Value),
}

impl StatusCheck {
    pub fn status(&self) -> JobStatus {
        match self {
            StatusCheck::Waiting => JobStatus::Waiting,
            StatusCheck::Failed(_) => JobStatus::Failed,
            StatusCheck::Ready(_) => JobStatus::Ready,
        }
    }
}

/// Classify a status response body.
///
/// The markers are checked before the body is treated as a result, so a
/// waiting page is never mistaken for a malformed payload.
pub fn classify_status(body: &str) -> Result<StatusCheck> {
    if body.contains(WAITING_MARKER) {
        return Ok(StatusCheck::Waiting);
    }
    if body.contains(FAILED_MARKER) {
        return Ok(StatusCheck::Failed("search reported Status=FAILED".to_string()));
    }
    if body.contains(UNKNOWN_MARKER) {
        return Ok(StatusCheck::Failed("request ID expired or unknown".to_string()));
    }

    let payload: Value = serde_json::from_str(body).map_err(|e| {
        SeqseekError::Parse(format!("BLAST result is not valid JSON: {}", e))
    })?;
    Ok(StatusCheck::Ready(payload))
}
