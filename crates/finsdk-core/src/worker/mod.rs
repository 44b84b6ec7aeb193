//! Background worker lifecycle.
//!
//! An atomic run flag elects a single loop instance per handle, a
//! cancellation token signals it to stop, and the retained join handle makes
//! termination observable through [`WorkerHandle::stop_wait`].
mod run;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use finsdk_memory::MemoryStore;
use finsdk_model::WorkerConfig;

use crate::error::WorkerError;
use crate::fetch::FetchClient;

/// Everything one loop run needs, resolved at start time.
#[derive(Clone)]
pub struct WorkerTask {
    pub(crate) cfg: WorkerConfig,
    pub(crate) fetch: FetchClient,
    pub(crate) memory: Arc<std::sync::Mutex<MemoryStore>>,
}

impl WorkerTask {
    pub fn new(
        cfg: WorkerConfig,
        fetch: FetchClient,
        memory: Arc<std::sync::Mutex<MemoryStore>>,
    ) -> Self {
        Self { cfg, fetch, memory }
    }
}

struct ActiveWorker {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

/// Start/stop controller for the background loop.
///
/// The run flag is only mutated here; the loop itself is stopped through its
/// own cancellation token, so a loop from a previous run can never be
/// revived by a later `start`.
#[derive(Default)]
pub struct WorkerHandle {
    running: AtomicBool,
    active: std::sync::Mutex<Option<ActiveWorker>>,
}

impl WorkerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a loop instance is currently active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawn the worker loop if none is active.
    ///
    /// Concurrent callers race on a single compare-exchange, so at most one
    /// of them spawns; the rest observe a running worker and return `false`.
    /// Must be called within a Tokio runtime.
    pub fn start(&self, task: WorkerTask) -> bool {
        let mut active = self.lock_active();
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("worker already running, start is a no-op");
            return false;
        }

        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();
        let join = tokio::spawn(async move {
            run::run(task, loop_cancel).await;
        });

        *active = Some(ActiveWorker { cancel, join });
        info!("worker started");
        true
    }

    /// Signal the active loop to stop.
    ///
    /// Non-blocking: the loop may finish the iteration in flight before it
    /// exits. Returns `false` when no loop was active.
    pub fn stop(&self) -> bool {
        let active = self.lock_active();
        if self
            .running
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("worker not running, stop is a no-op");
            return false;
        }

        if let Some(active) = active.as_ref() {
            active.cancel.cancel();
        }
        info!("worker stop signaled");
        true
    }

    /// Signal the active loop to stop, then wait for it to exit.
    ///
    /// Returns `Ok(true)` when this call performed the stop, `Ok(false)`
    /// when nothing was running (or a previous `stop` already signaled).
    /// [`WorkerError::StopTimeout`] means the loop was still winding down
    /// when the deadline passed; it remains cancelled and exits on its own.
    pub async fn stop_wait(&self, timeout: Duration) -> Result<bool, WorkerError> {
        // flag flip and slot take happen under one lock, and the guard is
        // released before the await below
        let (signaled, taken) = {
            let mut active = self.lock_active();
            let signaled = self
                .running
                .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok();
            (signaled, active.take())
        };
        let Some(active) = taken else {
            debug!("worker not running, stop_wait is a no-op");
            return Ok(false);
        };
        // covers the stop()-then-stop_wait() sequence: the flag flip
        // happened earlier but the loop may still be draining
        active.cancel.cancel();

        match tokio::time::timeout(timeout, active.join).await {
            Ok(Ok(())) => Ok(signaled),
            Ok(Err(e)) => Err(WorkerError::Join(e.to_string())),
            Err(_) => Err(WorkerError::StopTimeout(timeout)),
        }
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<ActiveWorker>> {
        // recover the slot if a panicking holder poisoned the lock
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use finsdk_memory::MemoryStore;
    use finsdk_model::WorkerConfig;

    use super::{WorkerHandle, WorkerTask};
    use crate::error::WorkerError;
    use crate::fetch::FetchClient;

    fn probe_task() -> WorkerTask {
        // port 1 is never listening, so every fetch fails fast and the loop
        // keeps spinning regardless
        let cfg = WorkerConfig::default()
            .with_fetch_url("http://127.0.0.1:1/tick")
            .with_tick_ms(5);
        WorkerTask::new(
            cfg,
            FetchClient::default(),
            Arc::new(Mutex::new(MemoryStore::new())),
        )
    }

    #[tokio::test]
    async fn double_start_spawns_once() {
        let handle = WorkerHandle::new();

        assert!(handle.start(probe_task()));
        assert!(!handle.start(probe_task()));
        assert!(handle.is_running());

        assert_eq!(handle.stop_wait(Duration::from_secs(2)).await.unwrap(), true);
    }

    #[tokio::test]
    async fn stop_when_never_started_is_a_noop() {
        let handle = WorkerHandle::new();
        assert!(!handle.stop());
        assert_eq!(
            handle.stop_wait(Duration::from_secs(1)).await.unwrap(),
            false
        );
    }

    #[tokio::test]
    async fn stop_start_stop_toggles_cleanly() {
        let handle = WorkerHandle::new();

        assert!(!handle.stop());
        assert!(handle.start(probe_task()));
        assert!(handle.stop());
        assert!(!handle.is_running());
    }

    #[tokio::test]
    async fn restart_after_stop_wait_works() {
        let handle = WorkerHandle::new();

        assert!(handle.start(probe_task()));
        handle.stop_wait(Duration::from_secs(2)).await.unwrap();

        assert!(handle.start(probe_task()));
        assert!(handle.is_running());
        handle.stop_wait(Duration::from_secs(2)).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_starts_elect_one_winner() {
        let handle = Arc::new(WorkerHandle::new());

        let mut attempts = Vec::new();
        for _ in 0..8 {
            let handle = Arc::clone(&handle);
            attempts.push(tokio::spawn(async move { handle.start(probe_task()) }));
        }

        let mut wins = 0;
        for attempt in attempts {
            if attempt.await.unwrap() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);

        handle.stop_wait(Duration::from_secs(2)).await.unwrap();
    }

    #[tokio::test]
    async fn stop_then_stop_wait_still_joins() {
        let handle = WorkerHandle::new();

        assert!(handle.start(probe_task()));
        assert!(handle.stop());

        // the signal was sent by stop(); stop_wait only waits
        let result = handle.stop_wait(Duration::from_secs(2)).await;
        assert!(matches!(result, Ok(false)));
        assert!(!handle.is_running());
    }

    #[tokio::test]
    async fn zero_timeout_reports_stop_timeout() {
        let handle = WorkerHandle::new();

        assert!(handle.start(probe_task()));
        let result = handle.stop_wait(Duration::from_millis(0)).await;
        assert!(matches!(result, Err(WorkerError::StopTimeout(_))));
    }
}
