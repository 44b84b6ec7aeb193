use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tracing::debug;

use finsdk_memory::{MemoryItem, MemoryStore};
use finsdk_model::{ConfigMap, WorkerConfig};

use crate::error::WorkerError;
use crate::fetch::FetchClient;
use crate::files::FileStore;
use crate::transform;
use crate::worker::{WorkerHandle, WorkerTask};

/// Host-owned SDK handle.
///
/// All shared state lives here: the configuration map, the memory store,
/// the file store, the HTTP client, and the worker lifecycle. Clones share
/// the same underlying state, so a host can hand handles to several
/// components while `start`/`stop` still govern a single worker loop.
#[derive(Clone, Default)]
pub struct FinContext {
    config: Arc<RwLock<ConfigMap>>,
    memory: Arc<Mutex<MemoryStore>>,
    files: FileStore,
    fetch: FetchClient,
    worker: Arc<WorkerHandle>,
    worker_cfg: WorkerConfig,
}

impl FinContext {
    /// Create a context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the base worker configuration.
    pub fn with_worker_config(mut self, cfg: WorkerConfig) -> Self {
        self.worker_cfg = cfg;
        self
    }

    /// Replace the HTTP client shared by the worker and direct fetches.
    pub fn with_fetch_client(mut self, fetch: FetchClient) -> Self {
        self.fetch = fetch;
        self
    }

    /// Base worker configuration (before config-map overrides).
    pub fn worker_config(&self) -> &WorkerConfig {
        &self.worker_cfg
    }

    /// Start the background worker loop if it is not already running.
    ///
    /// The effective configuration is resolved here: the base
    /// [`WorkerConfig`] overlaid with any overrides loaded into the config
    /// map. Returns `false` when a loop is already active. Must be called
    /// within a Tokio runtime.
    pub fn start(&self) -> bool {
        let effective = self.worker_cfg.clone().overlay(&self.read_config());
        let task = WorkerTask::new(effective, self.fetch.clone(), Arc::clone(&self.memory));
        self.worker.start(task)
    }

    /// Signal the worker loop to stop without waiting for it to exit.
    pub fn stop(&self) -> bool {
        self.worker.stop()
    }

    /// Stop the worker loop and wait for it to exit, bounded by `timeout`.
    pub async fn stop_wait(&self, timeout: Duration) -> Result<bool, WorkerError> {
        self.worker.stop_wait(timeout).await
    }

    /// Whether the worker loop is currently active.
    pub fn is_running(&self) -> bool {
        self.worker.is_running()
    }

    /// Label the input as processed memory.
    ///
    /// Non-null input is additionally recorded into the memory store, where
    /// the worker's maintenance step and the retrieval API can reach it.
    pub fn process_memory(&self, input: Option<&str>) -> String {
        if let Some(s) = input {
            let id = self.memory().insert(MemoryItem::new(s));
            debug!(%id, "memory item recorded from process call");
        }
        transform::process_memory(input)
    }

    /// Label the input as encrypted. Not real cryptography.
    pub fn encrypt(&self, input: Option<&str>) -> String {
        transform::encrypt(input)
    }

    /// Label the input as decrypted. Does not invert [`FinContext::encrypt`].
    pub fn decrypt(&self, input: Option<&str>) -> String {
        transform::decrypt(input)
    }

    /// Merge line-oriented `key:value` text into the configuration map.
    ///
    /// `None` leaves the map untouched. Returns the number of entries
    /// merged.
    pub fn load_config(&self, text: Option<&str>) -> usize {
        match text {
            Some(t) => self.write_config().merge_lines(t),
            None => {
                debug!("null config input ignored");
                0
            }
        }
    }

    /// Look up a configuration value.
    pub fn config_get(&self, key: &str) -> Option<String> {
        self.read_config().get(key).map(String::from)
    }

    /// Clone the current configuration map.
    pub fn config_snapshot(&self) -> ConfigMap {
        self.read_config().clone()
    }

    /// Lock the memory store for direct access.
    ///
    /// The lock is synchronous; keep the guard short-lived, the worker's
    /// maintenance step contends on it.
    pub fn memory(&self) -> MutexGuard<'_, MemoryStore> {
        // recover the store if a panicking writer poisoned the lock
        self.memory.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Lock-serialized text-file helper.
    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// Shared HTTP client.
    pub fn fetch(&self) -> &FetchClient {
        &self.fetch
    }

    fn read_config(&self) -> RwLockReadGuard<'_, ConfigMap> {
        self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_config(&self) -> RwLockWriteGuard<'_, ConfigMap> {
        self.config.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for FinContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinContext")
            .field("config_len", &self.read_config().len())
            .field("memory_len", &self.memory().len())
            .field("running", &self.is_running())
            .finish()
    }
}

impl fmt::Display for FinContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FinContext(config_len={}, memory_len={}, running={})",
            self.read_config().len(),
            self.memory().len(),
            self.is_running()
        )
    }
}
