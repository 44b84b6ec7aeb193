//! Tiered memory store: items carrying a factual gradient move through a
//! volatile short-term cache, an unbounded long-term tier, and a small
//! working set, with access-driven promotion and redundancy-driven
//! compression.
mod error;
pub use error::MemoryError;

mod item;
pub use item::{MemoryItem, MemoryKind, Relation};

mod similarity;
pub use similarity::word_overlap;

mod tier;
pub use tier::{MemoryTier, PruneStrategy};

mod tracer;
pub use tracer::{CompressionReport, MemoryTracer};

mod store;
pub use store::{
    DEFAULT_COMPRESS_HORIZON_MS, MemoryStore, PROMOTE_ACCESS_THRESHOLD, PROMOTE_IMPORTANCE_BAR,
    REDUNDANCY_THRESHOLD, SHORT_TERM_CAPACITY, WORKING_CAPACITY,
};

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
