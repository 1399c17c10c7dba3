use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::poller::{BlastClient, BlastReport, PollEvent, PollPolicy};
use crate::error::{Result, SeqseekError};
use crate::query::BlastRequest;
use crate::transport::Transport;

/// A BLAST search running on the tokio runtime.
///
/// The caller keeps control: [`BlastTask::cancel`] stops the poll loop at its
/// next suspension point and [`BlastTask::join`] yields the outcome.
pub struct BlastTask {
    cancel: CancellationToken,
    handle: JoinHandle<Result<BlastReport>>,
}

impl BlastTask {
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        debug!("cancelling BLAST task");
        self.cancel.cancel();
    }

    pub async fn join(self) -> Result<BlastReport> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(SeqseekError::Cancelled),
            Err(e) => Err(SeqseekError::Task(e.to_string())),
        }
    }
}

/// Submit and poll in the background
pub fn spawn<T, F>(
    client: Arc<BlastClient<T>>,
    request: BlastRequest,
    policy: PollPolicy,
    on_event: F,
) -> BlastTask
where
    T: Transport + 'static,
    F: FnMut(&PollEvent) + Send + 'static,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let handle = tokio::spawn(async move { client.run(&request, &policy, &token, on_event).await });

    BlastTask { cancel, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BlastProgram;
    use crate::transport::{HttpResponse, MockTransport};
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_stops_waiting_job() {
        let mut transport = MockTransport::new();
        transport.expect_get().returning(|_, params| {
            if params.get("CMD") == Some("Put") {
                Ok(HttpResponse::ok("RID = JOB1\nRTOE = 5"))
            } else {
                Ok(HttpResponse::ok("Status=WAITING"))
            }
        });

        let client = Arc::new(BlastClient::new(transport, "https://blast.example/Blast.cgi"));
        let request = BlastRequest::new(BlastProgram::Blastn, "nt", "ACGT", 10.0, 11).unwrap();
        let policy = PollPolicy::new(Duration::ZERO, Duration::from_secs(30)).with_deadline(None);

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let task = spawn(client, request, policy, move |event| {
            let _ = tx.send(event.clone());
        });

        // Wait until the loop is parked between checks
        while let Some(event) = rx.recv().await {
            if matches!(event, PollEvent::Sleeping { .. }) {
                break;
            }
        }

        task.cancel();
        assert!(matches!(task.join().await, Err(SeqseekError::Cancelled)));
    }
}
