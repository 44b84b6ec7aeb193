use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::WorkerTask;

/// Body of the background loop.
///
/// Each iteration runs the continuous-logic step, fetches the configured
/// endpoint, and sleeps one tick. Fetch failures are logged and swallowed;
/// only cancellation ends the loop. Both the fetch and the sleep are raced
/// against the token so a stop signal does not wait out a slow request or a
/// full tick.
pub(crate) async fn run(task: WorkerTask, cancel: CancellationToken) {
    info!(
        url = %task.cfg.fetch_url,
        tick_ms = task.cfg.tick_ms,
        maintenance = task.cfg.maintenance.is_enabled(),
        "worker loop entering"
    );

    loop {
        if cancel.is_cancelled() {
            break;
        }

        continuous_step(&task);

        tokio::select! {
            _ = cancel.cancelled() => break,
            fetched = task.fetch.get(&task.cfg.fetch_url) => match fetched {
                Ok(resp) => debug!(
                    status = resp.status,
                    body_len = resp.body.len(),
                    "fetch completed"
                ),
                Err(e) => warn!("fetch failed: {e}"),
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(task.cfg.tick()) => {}
        }
    }

    info!("worker loop exited");
}

/// Per-iteration housekeeping ahead of the fetch.
fn continuous_step(task: &WorkerTask) {
    trace!("continuous logic tick");
    if task.cfg.maintenance.is_disabled() {
        return;
    }

    // recover the store if a panicking writer poisoned the lock
    let mut memory = task.memory.lock().unwrap_or_else(|e| e.into_inner());
    let pinned = memory.promote();
    if pinned > 0 {
        debug!(pinned, "maintenance pinned memory items");
    }
}
