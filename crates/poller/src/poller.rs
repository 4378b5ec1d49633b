use std::time::Duration;

use relay_common::config::AppConfig;
use relay_common::error::{Disposition, RelayError};
use relay_common::types::{Cursor, ReportState};
use relay_engine::{extract_homeworks, failure_message, format_record, has_changed, parse_record};
use relay_notifier::Notifier;

use crate::client::ReviewApi;

/// Result of a single successful poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API returned no homework records.
    NoHomeworks,
    /// The latest status equals the one already delivered.
    Unchanged,
    /// A new status was delivered; it becomes the previous state.
    Notified(ReportState),
}

/// Fixed-interval poll loop relaying homework status changes to the notifier.
///
/// The cursor and the last delivered [`ReportState`] are owned by [`run`](Self::run)
/// and threaded through each cycle; nothing survives a restart.
pub struct HomeworkPoller<A, N> {
    api: A,
    notifier: N,
    poll_interval: Duration,
}

impl<A, N> HomeworkPoller<A, N>
where
    A: ReviewApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N, poll_interval: Duration) -> Self {
        Self {
            api,
            notifier,
            poll_interval,
        }
    }

    /// Build a poller from loaded configuration.
    ///
    /// A configuration error is returned before `build` runs, so no client
    /// is created and no request is made.
    pub fn bootstrap<F>(config: Result<AppConfig, RelayError>, build: F) -> Result<Self, RelayError>
    where
        F: FnOnce(&AppConfig) -> (A, N),
    {
        let config = config.inspect_err(|e| {
            tracing::error!(
                severity = "critical",
                error = %e,
                "Cannot start without configuration"
            );
        })?;
        let (api, notifier) = build(&config);
        Ok(Self::new(api, notifier, config.poll_interval()))
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Run forever. Returns only if a cycle yields an error whose
    /// disposition is [`Disposition::Terminate`].
    pub async fn run(&self) -> Result<(), RelayError> {
        let mut cursor = Cursor::now();
        let mut report = ReportState::sentinel();

        tracing::info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            from_date = %cursor,
            "Homework poller started"
        );

        loop {
            self.step(&mut cursor, &mut report).await?;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One cycle without the trailing sleep.
    ///
    /// Recoverable errors are reported through the notifier once; a failure to
    /// deliver that report is only logged. The cursor always moves to now.
    pub async fn step(
        &self,
        cursor: &mut Cursor,
        report: &mut ReportState,
    ) -> Result<(), RelayError> {
        let outcome = self.run_cycle(*cursor, report).await;
        *cursor = Cursor::now();

        match outcome {
            Ok(CycleOutcome::Notified(state)) => {
                *report = state;
                Ok(())
            }
            Ok(CycleOutcome::NoHomeworks | CycleOutcome::Unchanged) => Ok(()),
            Err(e) => match e.disposition() {
                Disposition::Continue => {
                    self.report_failure(&e).await;
                    Ok(())
                }
                Disposition::Terminate => {
                    tracing::error!(severity = "critical", error = %e, "Poll loop terminating");
                    Err(e)
                }
            },
        }
    }

    /// Fetch → validate → format → compare → notify.
    pub async fn run_cycle(
        &self,
        since: Cursor,
        previous: &ReportState,
    ) -> Result<CycleOutcome, RelayError> {
        let response = self.api.fetch(since).await?;
        let homeworks = extract_homeworks(&response)?;

        let Some(latest) = homeworks.first() else {
            tracing::info!("No homework has been taken for review yet");
            return Ok(CycleOutcome::NoHomeworks);
        };

        let record = parse_record(latest)?;
        let current = ReportState::new(record.name.clone(), format_record(&record));

        if !has_changed(&current, previous) {
            tracing::debug!(homework = %record.name, "No new statuses in response");
            return Ok(CycleOutcome::Unchanged);
        }

        self.notifier.notify(&current.message).await?;
        tracing::info!(homework = %record.name, status = %record.status, "Status change delivered");
        Ok(CycleOutcome::Notified(current))
    }

    async fn report_failure(&self, error: &RelayError) {
        tracing::error!(error = %error, "Poll cycle failed");
        if let Err(e) = self.notifier.notify(&failure_message(error)).await {
            tracing::error!(error = %e, "Failed to deliver failure notification");
        }
    }
}
