//! Daily job scheduler.
//!
//! Each job fires at most once per calendar day at a local time-of-day in
//! its own timezone. A process started after the target time still fires
//! the job on the same day (catch-up); a full-day outage is never
//! backfilled. Firing state lives in memory only.

pub mod guard;
pub mod runner;

pub use guard::JobGuards;
pub use runner::Scheduler;

use chrono::NaiveTime;
use chrono_tz::Tz;

/// A fixed daily job: identifier plus target local time.
#[derive(Debug, Clone)]
pub struct DailyJob {
    pub id: String,
    pub at: NaiveTime,
    pub tz: Tz,
}

impl DailyJob {
    pub fn new(id: impl Into<String>, at: NaiveTime, tz: Tz) -> Self {
        Self { id: id.into(), at, tz }
    }
}
