//! Status poller
//!
//! Polls the review service on a fixed interval and forwards every reported
//! status change to the chat. One iteration is:
//!
//! 1. fetch statuses since the cursor
//! 2. validate the payload
//! 3. notify about each submission, in order
//! 4. advance the cursor
//!
//! A fetch or validation failure ends the iteration without touching the
//! cursor, so the same window is asked for again after the interval. Failures
//! of a single submission (an undeliverable message, a status outside the
//! catalog) are logged and the rest of the batch is still notified.

use chrono::Utc;
use statuswatch_core::validation;
use std::sync::Arc;
use tokio::time::{self, Duration};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{NotifyError, PollError};
use crate::repository::{MessageRepository, StatusRepository};
use crate::scheduler::cursor::PollCursor;
use crate::service::{FailureReporter, NotificationService, StatusNotifier};

/// Lifecycle of the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Starting,
    Running,
}

/// Outcome of one successful iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationReport {
    /// Cursor the fetch was made with
    pub since: i64,
    /// Submissions reported by the service
    pub submissions: usize,
    /// Notifications delivered
    pub delivered: usize,
    /// Notifications that could not be delivered
    pub undelivered: usize,
    /// Submissions skipped because their status is outside the catalog
    pub unknown: usize,
    /// Cursor after the iteration
    pub cursor: i64,
}

/// Poller that owns the cursor and runs the notification cycle
pub struct StatusPoller {
    statuses: Arc<dyn StatusRepository>,
    notifier: Arc<dyn NotificationService>,
    reporter: Option<FailureReporter>,
    cursor: PollCursor,
    poll_interval: Duration,
    state: PollerState,
}

impl StatusPoller {
    /// Creates a poller delivering to the configured chat
    ///
    /// The cursor starts at `config.start_cursor`, or at the current time.
    pub fn new(
        config: &Config,
        statuses: Arc<dyn StatusRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        let notifier = Arc::new(StatusNotifier::new(
            Arc::clone(&messages),
            config.telegram_chat_id.clone(),
        ));
        let reporter = config
            .report_failures
            .then(|| FailureReporter::new(messages, config.telegram_chat_id.clone()));

        Self {
            statuses,
            notifier,
            reporter,
            cursor: PollCursor::new(config.start_cursor.unwrap_or_else(unix_now)),
            poll_interval: config.poll_interval,
            state: PollerState::Starting,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor.position()
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Runs the polling loop until the future is dropped
    ///
    /// Failures never end the loop; they are logged and retried after the
    /// fixed interval.
    pub async fn run(&mut self) {
        self.enter_running();
        info!(
            "Starting status poller (interval: {:?}, cursor: {})",
            self.poll_interval,
            self.cursor.position()
        );

        loop {
            let outcome = self.run_iteration().await;
            self.record(&outcome).await;

            debug!("Sleeping {:?} until next poll", self.poll_interval);
            time::sleep(self.poll_interval).await;
        }
    }

    /// Runs and logs a single iteration without sleeping
    pub async fn run_once(&mut self) -> Result<IterationReport, PollError> {
        self.enter_running();
        let outcome = self.run_iteration().await;
        self.record(&outcome).await;
        outcome
    }

    fn enter_running(&mut self) {
        if self.state != PollerState::Running {
            debug!("Poller state {:?} -> {:?}", self.state, PollerState::Running);
            self.state = PollerState::Running;
        }
    }

    /// Performs one fetch → validate → notify cycle
    ///
    /// The cursor only moves when this returns `Ok`. It moves to the
    /// server-supplied position when there is one, otherwise to the time
    /// the iteration started, so changes made while the request was in
    /// flight are picked up next time.
    pub async fn run_iteration(&mut self) -> Result<IterationReport, PollError> {
        let started_at = unix_now();
        let since = self.cursor.position();

        debug!("Polling for status changes since {}", since);

        let raw = self.statuses.fetch(since).await.map_err(PollError::Fetch)?;
        let result = validation::validate(&raw)?;

        let mut delivered = 0;
        let mut undelivered = 0;
        let mut unknown = 0;

        for record in &result.submissions {
            match self.notifier.notify(record).await {
                Ok(_) => delivered += 1,
                Err(NotifyError::Delivery(e)) => {
                    undelivered += 1;
                    error!(
                        submission = ?record.name,
                        status = ?record.status,
                        "Failed to deliver notification: {}",
                        e
                    );
                }
                Err(NotifyError::UnknownStatus(source)) => {
                    unknown += 1;
                    let failure = PollError::UnknownStatus {
                        name: record.name.clone(),
                        source,
                    };
                    self.handle_failure(&failure).await;
                }
            }
        }

        self.cursor.advance(result.cursor.unwrap_or(started_at));

        Ok(IterationReport {
            since,
            submissions: result.submissions.len(),
            delivered,
            undelivered,
            unknown,
            cursor: self.cursor.position(),
        })
    }

    /// Logs an iteration outcome and forwards failures when reporting is on
    async fn record(&mut self, outcome: &Result<IterationReport, PollError>) {
        match outcome {
            Ok(report) => {
                if report.submissions == 0 {
                    debug!("No status changes since {}", report.since);
                } else {
                    info!(
                        "Processed {} status change(s): {} delivered, {} undelivered, {} unknown; cursor now {}",
                        report.submissions,
                        report.delivered,
                        report.undelivered,
                        report.unknown,
                        report.cursor
                    );
                }
                // Keep the suppression alive while the catalog is still being violated
                if report.unknown == 0 {
                    if let Some(reporter) = self.reporter.as_mut() {
                        reporter.clear();
                    }
                }
            }
            Err(err) => self.handle_failure(err).await,
        }
    }

    /// Logs a classified failure and forwards it when reporting is on
    async fn handle_failure(&mut self, err: &PollError) {
        let cursor = self.cursor.position();
        match err {
            PollError::Fetch(e) => {
                error!(kind = err.kind(), cursor, "Failed to fetch submission statuses: {}", e);
            }
            PollError::Validation(failure) => {
                error!(kind = err.kind(), cursor, "Rejected review service response: {}", failure);
            }
            PollError::UnknownStatus { name, source } => {
                error!(
                    kind = err.kind(),
                    cursor,
                    submission = ?name,
                    status = ?source.status,
                    "Review service reported a status outside the catalog: {}",
                    source
                );
            }
        }

        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(&err.to_string()).await;
        }
    }
}

fn unix_now() -> i64 {
    Utc::now().timestamp()
}
