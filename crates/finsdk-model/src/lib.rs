mod domain;
pub use domain::{ConfigMap, Flag, KeyValue};
pub use domain::{
    CONFIG_KEY_FETCH_URL, CONFIG_KEY_MAINTENANCE, CONFIG_KEY_TICK_MS, DEFAULT_FETCH_TIMEOUT_MS,
    DEFAULT_FETCH_URL, DEFAULT_TICK_MS,
};

mod spec;
pub use spec::WorkerConfig;
