//! The polling control loop.
//!
//! Each cycle fetches statuses changed since the cursor, turns the most recent
//! one into a notification, and moves the cursor to the server's
//! `current_date`. Failures are reported to the chat and the loop carries on
//! after the usual pause; only a shutdown signal ends it.

use std::time::Duration;

use tokio::sync::watch;

use homework_common::error::PollError;
use homework_common::types::PollCursor;
use homework_notifier::{MessageSink, send_message};

use crate::client::HomeworkApi;
use crate::translator::parse_status;
use crate::validator::{check_response, current_date};

/// Prefix of the chat message sent when a cycle fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was sent and the cursor moved to `current_date`.
    Notified { current_date: i64 },
    /// The API reported no changes since the cursor.
    NoUpdates,
    /// The cycle failed; the failure was reported and the cursor kept.
    Failed(PollError),
}

pub struct HomeworkPoller<A, S> {
    api: A,
    sink: S,
    retry_period: Duration,
    cursor: PollCursor,
}

impl<A: HomeworkApi, S: MessageSink> HomeworkPoller<A, S> {
    pub fn new(api: A, sink: S, retry_period: Duration, start_timestamp: i64) -> Self {
        Self {
            api,
            sink,
            retry_period,
            cursor: PollCursor::new(start_timestamp),
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor.timestamp()
    }

    /// Run cycles until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The signal is checked before every API call and wakes the pause
    /// between cycles early.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            cursor = %self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "Homework poller started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let outcome = self.run_cycle().await;
            tracing::debug!(?outcome, cursor = %self.cursor, "Poll cycle finished");

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!(cursor = %self.cursor, "Homework poller stopped");
    }

    /// Run one cycle, reporting any failure to the chat.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(Some(current_date)) => CycleOutcome::Notified { current_date },
            Ok(None) => CycleOutcome::NoUpdates,
            Err(e) => {
                let message = format!("{FAILURE_PREFIX}: {e}");
                send_message(&self.sink, &message).await;
                tracing::error!(error = %e, cursor = %self.cursor, "{message}");
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn poll_once(&mut self) -> Result<Option<i64>, PollError> {
        let response = self.api.get_api_answer(self.cursor.timestamp()).await?;
        let homeworks = check_response(&response)?;
        tracing::info!(count = homeworks.len(), "Homework list received");

        let Some(latest) = homeworks.first() else {
            tracing::info!(cursor = %self.cursor, "No new homework statuses");
            return Ok(None);
        };

        let message = parse_status(latest)?;
        let current_date = current_date(&response)?;

        send_message(&self.sink, &message).await;
        self.cursor.advance_to(current_date);

        Ok(Some(current_date))
    }
}
