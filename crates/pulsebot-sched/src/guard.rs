//! Per-job exclusion guards.
//!
//! The scheduled firing and a manual `/mm`-style trigger share one mutex
//! per job id, so the fetch/format/deliver pipeline never runs
//! concurrently with itself and can't double-post.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Registry of per-job mutexes, fixed at startup.
#[derive(Clone)]
pub struct JobGuards {
    guards: Arc<HashMap<String, Arc<Mutex<()>>>>,
}

impl JobGuards {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let guards = ids
            .into_iter()
            .map(|id| (id.into(), Arc::new(Mutex::new(()))))
            .collect();
        Self {
            guards: Arc::new(guards),
        }
    }

    /// The guard for a job id. Ids are fixed at startup, so a miss is a
    /// programming error surfaced to the caller.
    pub fn get(&self, id: &str) -> Option<Arc<Mutex<()>>> {
        self.guards.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_attempt_observes_busy() {
        let guards = JobGuards::new(["job-a"]);
        let guard = guards.get("job-a").unwrap();

        let held = guard.lock().await;
        // A concurrent manual trigger must see the job as busy.
        assert!(guards.get("job-a").unwrap().try_lock().is_err());
        drop(held);
        assert!(guards.get("job-a").unwrap().try_lock().is_ok());
    }

    #[tokio::test]
    async fn test_guards_are_per_job() {
        let guards = JobGuards::new(["a", "b"]);
        let _held = guards.get("a").unwrap().lock_owned().await;
        assert!(guards.get("b").unwrap().try_lock().is_ok());
    }

    #[test]
    fn test_unknown_id() {
        let guards = JobGuards::new(["a"]);
        assert!(guards.get("nope").is_none());
    }
}
