mod constants;
pub use constants::{
    CONFIG_KEY_FETCH_URL, CONFIG_KEY_MAINTENANCE, CONFIG_KEY_TICK_MS, DEFAULT_FETCH_TIMEOUT_MS,
    DEFAULT_FETCH_URL, DEFAULT_TICK_MS,
};

mod config;
pub use config::ConfigMap;

mod flag;
pub use flag::Flag;

mod kv;
pub use kv::KeyValue;
