/// Endpoint polled by the background worker when no override is configured.
///
/// This is a placeholder address; real deployments override it via
/// [`crate::WorkerConfig`] or the `fetch_url` configuration key.
pub const DEFAULT_FETCH_URL: &str = "https://api.example.com/chat";

/// Delay between worker iterations in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 2_000;

/// Hard timeout applied to a single HTTP fetch in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Configuration key overriding the worker fetch endpoint.
pub const CONFIG_KEY_FETCH_URL: &str = "fetch_url";

/// Configuration key overriding the worker tick interval (milliseconds).
pub const CONFIG_KEY_TICK_MS: &str = "tick_ms";

/// Configuration key toggling memory maintenance in the worker loop.
pub const CONFIG_KEY_MAINTENANCE: &str = "maintenance";
