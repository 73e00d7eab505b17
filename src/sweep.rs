//! Background sweep task.
//!
//! A periodic task that invokes `purge()` on the store at a fixed interval,
//! eagerly reclaiming expired entries that no read has touched. The task is
//! owned and cancelable: it can be restarted at a new interval or stopped
//! outright, and it is aborted when the last cache handle is dropped.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::storage::Db;

/// Owns the lifecycle of the periodic purge task.
///
/// States are NotStarted and Running. `start` moves to Running (replacing
/// any previous task), `stop` moves back to NotStarted. The task itself
/// never runs two purge passes concurrently: each pass completes before the
/// next sleep begins, and purge serializes against foreground operations on
/// the store's write lock.
#[derive(Debug)]
pub(crate) struct Sweeper {
    db: Arc<Db>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    pub(crate) fn new(db: Arc<Db>) -> Self {
        Self {
            db,
            task: Mutex::new(None),
        }
    }

    /// Start the sweep, or restart it at a new interval.
    ///
    /// Any running task is canceled first. The first purge happens one full
    /// interval after this call; reconfiguring never purges immediately.
    ///
    /// Outside a Tokio runtime this is a no-op: expired entries are then
    /// reclaimed only lazily on read or by manual `purge()` calls.
    pub(crate) fn start(&self, interval: Duration) {
        let mut slot = match self.task.lock() {
            Ok(slot) => slot,
            Err(_) => return,
        };

        if let Some(old) = slot.take() {
            old.abort();
        }

        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                debug!("no tokio runtime available, background sweep not started");
                return;
            }
        };

        info!(
            interval_ms = interval.as_millis() as u64,
            "starting background sweep"
        );

        let db = Arc::clone(&self.db);
        *slot = Some(runtime.spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let removed = db.purge();
                if removed > 0 {
                    info!(removed, "sweep removed expired entries");
                } else {
                    debug!("sweep found no expired entries");
                }
            }
        }));
    }

    /// Cancel the sweep task if it is running.
    pub(crate) fn stop(&self) {
        if let Ok(mut slot) = self.task.lock() {
            if let Some(task) = slot.take() {
                task.abort();
                info!("background sweep stopped");
            }
        }
    }

    /// Whether a sweep task is currently running.
    pub(crate) fn is_running(&self) -> bool {
        match self.task.lock() {
            Ok(slot) => slot.as_ref().map_or(false, |task| !task.is_finished()),
            Err(_) => false,
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}
