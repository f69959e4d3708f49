//! Polling scheduler loop — evaluates daily jobs and dispatches due ones.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{RwLock, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use pulsebot_types::JobStatus;

use crate::DailyJob;

const POLL_INTERVAL: Duration = Duration::from_secs(30);

struct JobState {
    job: DailyJob,
    last_fired: Option<NaiveDate>,
}

/// Owns the job table and decides when each job fires.
pub struct Scheduler {
    jobs: RwLock<Vec<JobState>>,
}

impl Scheduler {
    pub fn new(jobs: Vec<DailyJob>) -> Self {
        let jobs = jobs
            .into_iter()
            .map(|job| JobState {
                job,
                last_fired: None,
            })
            .collect();
        Self {
            jobs: RwLock::new(jobs),
        }
    }

    /// Collect jobs due at `now` and stamp them fired in the same pass.
    ///
    /// A job is due when its local wall-clock time has reached the target
    /// time-of-day and it hasn't fired on the local calendar date yet.
    /// Stamping happens at dispatch, before the outcome is known: a
    /// failing job is retried the next calendar day, not the next poll.
    pub async fn take_due(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut due = Vec::new();
        let mut jobs = self.jobs.write().await;
        for state in jobs.iter_mut() {
            let local = now.with_timezone(&state.job.tz);
            let today = local.date_naive();
            if local.time() >= state.job.at && state.last_fired != Some(today) {
                state.last_fired = Some(today);
                due.push(state.job.id.clone());
            }
        }
        due
    }

    /// Per-job status for the `/jobs` command.
    pub async fn status(&self) -> Vec<JobStatus> {
        let jobs = self.jobs.read().await;
        jobs.iter()
            .map(|state| JobStatus {
                id: state.job.id.clone(),
                at: state.job.at.format("%H:%M").to_string(),
                timezone: state.job.tz.name().to_string(),
                last_fired: state.last_fired,
            })
            .collect()
    }

    /// Run the polling loop until cancelled, sending due job ids to the
    /// executor. The loop itself never runs a job, so a slow pipeline
    /// can't stall scheduling.
    pub async fn run(
        self: Arc<Self>,
        sender: mpsc::UnboundedSender<String>,
        cancel: CancellationToken,
    ) {
        info!("scheduler started");
        loop {
            for id in self.take_due(Utc::now()).await {
                info!(job_id = %id, "job due, dispatching");
                if let Err(e) = sender.send(id) {
                    warn!("failed to dispatch job: {e}");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }
        info!("scheduler stopped");
    }
}
