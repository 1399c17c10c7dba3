use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::status::{classify_status, StatusCheck};
use super::submit::parse_submission;
use super::{BlastJob, JobStatus};
use crate::core::config::BlastConfig;
use crate::error::{Result, SeqseekError};
use crate::query::{blast_status_params, blast_submit_params, BlastProgram, BlastRequest};
use crate::transport::Transport;

/// How long to wait between status checks, and when to give up
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    /// Pause between submission and the first status check
    pub initial_delay: Duration,
    /// Pause between consecutive status checks
    pub interval: Duration,
    /// Status checks allowed before a waiting job times out
    pub max_polls: u32,
    /// Overall bound measured from the start of the wait
    pub deadline: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            interval: Duration::from_secs(10),
            max_polls: 180,
            deadline: Some(Duration::from_secs(3600)),
        }
    }
}

impl PollPolicy {
    pub fn new(initial_delay: Duration, interval: Duration) -> Self {
        Self {
            initial_delay,
            interval,
            ..Default::default()
        }
    }

    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Whether another sleep + check still fits inside the deadline
    fn has_time_for_another_poll(&self, elapsed: Duration) -> bool {
        match self.deadline {
            Some(deadline) => elapsed + self.interval <= deadline,
            None => true,
        }
    }
}

/// Progress notifications emitted while a job is submitted and polled
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Submitted {
        rid: String,
        estimated_seconds: Option<u64>,
    },
    InitialDelay(Duration),
    Checked {
        attempt: u32,
        status: JobStatus,
    },
    Sleeping {
        attempt: u32,
        delay: Duration,
    },
}

/// A finished BLAST search and its JSON result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlastReport {
    pub rid: String,
    pub program: BlastProgram,
    pub database: String,
    /// Status checks made, including the one that returned the result
    pub polls: u32,
    pub elapsed_secs: f64,
    pub payload: Value,
}

/// Sleep unless the token fires first
async fn pause(delay: Duration, cancel: &CancellationToken) -> Result<()> {
    if delay.is_zero() {
        return if cancel.is_cancelled() {
            Err(SeqseekError::Cancelled)
        } else {
            Ok(())
        };
    }

    tokio::select! {
        _ = cancel.cancelled() => Err(SeqseekError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}

/// Client for the BLAST URL API (`Blast.cgi`)
pub struct BlastClient<T: Transport> {
    transport: T,
    base_url: String,
}

impl<T: Transport> BlastClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(transport: T, config: &BlastConfig) -> Self {
        Self::new(transport, config.base_url.clone())
    }

    /// Submit a search and return the job carrying its RID. Not retried.
    pub async fn submit(&self, request: &BlastRequest) -> Result<BlastJob> {
        request.validate()?;

        let params = blast_submit_params(request);
        debug!(program = %request.program, db = %request.database, "submitting BLAST search");

        let response = self.transport.get(&self.base_url, &params).await?;
        if !response.is_success() {
            return Err(SeqseekError::Submission(format!(
                "service returned HTTP {}",
                response.status
            )));
        }

        let receipt = parse_submission(&response.body)?;
        let job = BlastJob::new(receipt, request);
        info!(rid = %job.request_id(), rtoe = ?job.estimated_seconds, "BLAST search submitted");
        Ok(job)
    }

    /// One status check; advances the job's status
    pub async fn check(&self, job: &mut BlastJob) -> Result<StatusCheck> {
        if job.status().is_terminal() {
            return Err(SeqseekError::InvalidTransition(format!(
                "job {} is already {}",
                job.request_id(),
                job.status()
            )));
        }

        let params = blast_status_params(job.request_id());
        let response = self
            .transport
            .get(&self.base_url, &params)
            .await?
            .error_for_status("BLAST status")?;

        let check = classify_status(&response.body)?;
        job.advance(check.status())?;
        Ok(check)
    }

    /// Poll a submitted job until it is ready, fails, times out or is cancelled
    pub async fn wait<F>(
        &self,
        job: &mut BlastJob,
        policy: &PollPolicy,
        cancel: &CancellationToken,
        mut on_event: F,
    ) -> Result<BlastReport>
    where
        F: FnMut(&PollEvent) + Send,
    {
        let started = Instant::now();
        let max_polls = policy.max_polls.max(1);

        on_event(&PollEvent::InitialDelay(policy.initial_delay));
        pause(policy.initial_delay, cancel).await?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let check = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SeqseekError::Cancelled),
                result = self.check(job) => result?,
            };

            debug!(rid = %job.request_id(), attempt, status = %check.status(), "status checked");
            on_event(&PollEvent::Checked {
                attempt,
                status: check.status(),
            });

            match check {
                StatusCheck::Ready(payload) => {
                    let elapsed = started.elapsed();
                    info!(rid = %job.request_id(), polls = attempt, ?elapsed, "BLAST search complete");
                    return Ok(BlastReport {
                        rid: job.request_id().to_string(),
                        program: job.program,
                        database: job.database.clone(),
                        polls: attempt,
                        elapsed_secs: elapsed.as_secs_f64(),
                        payload,
                    });
                }
                StatusCheck::Failed(reason) => {
                    warn!(rid = %job.request_id(), %reason, "BLAST search failed");
                    return Err(SeqseekError::JobFailed {
                        rid: job.request_id().to_string(),
                        reason,
                    });
                }
                StatusCheck::Waiting => {}
            }

            if attempt >= max_polls || !policy.has_time_for_another_poll(started.elapsed()) {
                warn!(rid = %job.request_id(), polls = attempt, "giving up on waiting BLAST search");
                return Err(SeqseekError::Timeout {
                    rid: job.request_id().to_string(),
                    polls: attempt,
                });
            }

            on_event(&PollEvent::Sleeping {
                attempt,
                delay: policy.interval,
            });
            pause(policy.interval, cancel).await?;
        }
    }

    /// Submit then wait
    pub async fn run<F>(
        &self,
        request: &BlastRequest,
        policy: &PollPolicy,
        cancel: &CancellationToken,
        mut on_event: F,
    ) -> Result<BlastReport>
    where
        F: FnMut(&PollEvent) + Send,
    {
        let mut job = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SeqseekError::Cancelled),
            result = self.submit(request) => result?,
        };

        on_event(&PollEvent::Submitted {
            rid: job.request_id().to_string(),
            estimated_seconds: job.estimated_seconds,
        });

        self.wait(&mut job, policy, cancel, on_event).await
    }
}
