mod config;
pub use config::LoggerConfig;

mod error;
pub use error::LoggerError;

mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;

mod timer;
pub use timer::UtcRfc3339;

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber with the given configuration.
///
/// Once installed, all `tracing` macros (`info!`, `debug!`, etc.) go through
/// this subscriber. Initialization is a process-wide one-shot: a second call
/// returns [`LoggerError::AlreadyInitialized`].
///
/// # Examples
/// ```rust
/// use finsdk_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// let _ = init_logger(&config);
/// tracing::info!("logger ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = cfg.level.to_env_filter();
    match cfg.format {
        LoggerFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(cfg.should_use_color())
                .with_target(cfg.with_targets)
                .with_timer(UtcRfc3339);
            install(tracing_subscriber::registry().with(filter).with(layer))
        }
        LoggerFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(cfg.with_targets)
                .with_timer(UtcRfc3339);
            install(tracing_subscriber::registry().with(filter).with(layer))
        }
    }
}

/// Installs the subscriber as the global default.
fn install<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}
