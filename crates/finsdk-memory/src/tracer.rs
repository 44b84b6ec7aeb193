use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::now_ms;

/// Lineage record for one tracked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    /// When the item entered the store, milliseconds since the Unix epoch.
    pub tracked_ms: u64,
    /// Operation that produced the item (e.g. "insert").
    pub operation: String,
    /// Number of retrievals observed since tracking began.
    pub accesses: u32,
}

/// Outcome of one compression pass over the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    /// Items present before the pass.
    pub total: usize,
    /// Items flagged as redundant against an earlier one.
    pub redundant: usize,
    /// Items actually removed.
    pub removed: usize,
    /// `removed / total`, `0.0` for an empty store.
    pub ratio: f32,
}

impl CompressionReport {
    pub(crate) fn new(total: usize, redundant: usize, removed: usize) -> Self {
        let ratio = if total == 0 {
            0.0
        } else {
            removed as f32 / total as f32
        };
        Self {
            total,
            redundant,
            removed,
            ratio,
        }
    }
}

/// Generation log over the lifetime of a store.
///
/// Tracks when items appeared and how often they were retrieved; the store
/// consults it during compression to spot never-accessed entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryTracer {
    generations: HashMap<Uuid, GenerationRecord>,
    total_tracked: u64,
}

impl MemoryTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items currently tracked.
    pub fn tracked(&self) -> usize {
        self.generations.len()
    }

    /// Items tracked over the tracer's lifetime, removals included.
    pub fn total_tracked(&self) -> u64 {
        self.total_tracked
    }

    /// Lineage record for an item, if tracked.
    pub fn record(&self, id: Uuid) -> Option<&GenerationRecord> {
        self.generations.get(&id)
    }

    pub(crate) fn track(&mut self, id: Uuid, operation: &str) {
        if self.generations.contains_key(&id) {
            return;
        }
        self.total_tracked += 1;
        self.generations.insert(
            id,
            GenerationRecord {
                tracked_ms: now_ms(),
                operation: operation.to_string(),
                accesses: 0,
            },
        );
    }

    pub(crate) fn record_access(&mut self, id: Uuid) {
        if let Some(rec) = self.generations.get_mut(&id) {
            rec.accesses += 1;
        }
    }

    pub(crate) fn forget(&mut self, id: Uuid) {
        self.generations.remove(&id);
    }
}
