//! Mock ticket source for testing.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::source::{PollBatch, SearchId, SourceError, TicketSource};
use crate::ticket::RawTicket;

/// Mock implementation of the `TicketSource` trait.
///
/// Poll outcomes are scripted in order: each `push_batch`/`push_error`
/// call appends one poll response. Once the script is exhausted, polls
/// answer with an empty terminal batch, or park forever when a hold is
/// armed, which lets tests observe mid-flight state and exercise
/// cancellation.
///
/// # Example
///
/// ```rust,ignore
/// use farefeed_core::testing::{fixtures, MockTicketSource};
///
/// let source = MockTicketSource::new();
/// source.push_batch(fixtures::raw_batch(500), false).await;
/// source.push_batch(fixtures::raw_batch(300), true).await;
///
/// // Run the ingestion loop against it...
/// assert_eq!(source.poll_count().await, 2);
/// ```
pub struct MockTicketSource {
    /// If set, the next `start_search` fails with this error.
    search_error: RwLock<Option<SourceError>>,
    /// Scripted poll outcomes, consumed front to back.
    script: RwLock<VecDeque<Result<PollBatch, SourceError>>>,
    /// Park every poll before consuming the script.
    hold_before: RwLock<bool>,
    /// Park polls once the script is exhausted.
    hold_after: RwLock<bool>,
    start_count: RwLock<usize>,
    poll_count: RwLock<usize>,
}

impl Default for MockTicketSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTicketSource {
    pub fn new() -> Self {
        Self {
            search_error: RwLock::new(None),
            script: RwLock::new(VecDeque::new()),
            hold_before: RwLock::new(false),
            hold_after: RwLock::new(false),
            start_count: RwLock::new(0),
            poll_count: RwLock::new(0),
        }
    }

    /// Script one successful poll response.
    pub async fn push_batch(&self, tickets: Vec<RawTicket>, stop: bool) {
        self.script
            .write()
            .await
            .push_back(Ok(PollBatch { tickets, stop }));
    }

    /// Script one failing poll response.
    pub async fn push_error(&self, error: SourceError) {
        self.script.write().await.push_back(Err(error));
    }

    /// Make the next `start_search` call fail.
    pub async fn fail_search(&self, error: SourceError) {
        *self.search_error.write().await = Some(error);
    }

    /// Park every poll forever, without consuming the script.
    pub async fn hold_before_script(&self) {
        *self.hold_before.write().await = true;
    }

    /// Park polls forever once the script is exhausted.
    pub async fn hold_after_script(&self) {
        *self.hold_after.write().await = true;
    }

    /// Number of `start_search` calls so far.
    pub async fn start_count(&self) -> usize {
        *self.start_count.read().await
    }

    /// Number of `poll` calls so far, including parked ones.
    pub async fn poll_count(&self) -> usize {
        *self.poll_count.read().await
    }

    /// Wait until at least `n` polls have been issued. Panics after two
    /// seconds to keep a broken test from hanging.
    pub async fn wait_for_polls(&self, n: usize) {
        for _ in 0..1000 {
            if *self.poll_count.read().await >= n {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        panic!("Timed out waiting for {} polls", n);
    }
}

#[async_trait]
impl TicketSource for MockTicketSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start_search(&self) -> Result<SearchId, SourceError> {
        *self.start_count.write().await += 1;
        if let Some(error) = self.search_error.write().await.take() {
            return Err(error);
        }
        Ok(SearchId("mock-search-1".to_string()))
    }

    async fn poll(&self, _search_id: &SearchId) -> Result<PollBatch, SourceError> {
        *self.poll_count.write().await += 1;

        if *self.hold_before.read().await {
            futures::future::pending::<()>().await;
            unreachable!();
        }

        if let Some(outcome) = self.script.write().await.pop_front() {
            return outcome;
        }

        if *self.hold_after.read().await {
            futures::future::pending::<()>().await;
            unreachable!();
        }

        Ok(PollBatch {
            tickets: vec![],
            stop: true,
        })
    }
}
