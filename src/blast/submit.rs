use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Result, SeqseekError};

static RID_PATTERN: OnceLock<Regex> = OnceLock::new();
static RTOE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn rid_pattern() -> &'static Regex {
    RID_PATTERN.get_or_init(|| Regex::new(r"RID = (\S+)").expect("RID pattern is valid"))
}

fn rtoe_pattern() -> &'static Regex {
    RTOE_PATTERN.get_or_init(|| Regex::new(r"RTOE = (\d+)").expect("RTOE pattern is valid"))
}

/// What the service hands back for an accepted `CMD=Put`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub rid: String,
    /// Estimated seconds until results are ready (`RTOE`)
    pub estimated_seconds: Option<u64>,
}

/// Pull the request ID (and the time estimate, if any) out of a submit body
pub fn parse_submission(body: &str) -> Result<SubmissionReceipt> {
    let rid = rid_pattern()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| SeqseekError::Submission("response carries no 'RID = <id>' line".to_string()))?;

    let estimated_seconds = rtoe_pattern()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    Ok(SubmissionReceipt {
        rid,
        estimated_seconds,
    })
}
