use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{
    MemoryError, MemoryItem, MemoryTier, MemoryTracer, PruneStrategy, now_ms,
    similarity::word_overlap, tracer::CompressionReport,
};

/// Capacity of the volatile short-term tier.
pub const SHORT_TERM_CAPACITY: usize = 10;

/// Capacity of the context working-memory tier.
pub const WORKING_CAPACITY: usize = 5;

/// Retrieval count at which an item earns an importance boost.
pub const PROMOTE_ACCESS_THRESHOLD: u32 = 3;

/// Importance score at which an item is pinned into the long-term tier.
pub const PROMOTE_IMPORTANCE_BAR: f32 = 8.0;

/// Word-overlap score above which two items count as redundant.
pub const REDUNDANCY_THRESHOLD: f32 = 0.9;

/// Default staleness horizon for compression: 30 days.
pub const DEFAULT_COMPRESS_HORIZON_MS: u64 = 30 * 24 * 60 * 60 * 1_000;

/// Owner of all memory items and the three standard tiers.
///
/// New items land in every tier (the bounded ones prune on admission);
/// retrieval walks the tiers, promotion rewards frequently-accessed items,
/// and compression trims never-accessed redundant or stale entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    items: HashMap<Uuid, MemoryItem>,
    short_term: MemoryTier,
    long_term: MemoryTier,
    working: MemoryTier,
    tracer: MemoryTracer,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            short_term: MemoryTier::new(
                "volatile-short-term",
                Some(SHORT_TERM_CAPACITY),
                PruneStrategy::OldestFirst,
            ),
            long_term: MemoryTier::new("persistent-long-term", None, PruneStrategy::LeastImportant),
            working: MemoryTier::new(
                "context-working",
                Some(WORKING_CAPACITY),
                PruneStrategy::OldestFirst,
            ),
            tracer: MemoryTracer::new(),
        }
    }

    /// Total items owned by the store.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn short_term(&self) -> &MemoryTier {
        &self.short_term
    }

    pub fn long_term(&self) -> &MemoryTier {
        &self.long_term
    }

    pub fn working(&self) -> &MemoryTier {
        &self.working
    }

    pub fn tracer(&self) -> &MemoryTracer {
        &self.tracer
    }

    pub fn get(&self, id: Uuid) -> Option<&MemoryItem> {
        self.items.get(&id)
    }

    /// Insert an item into the store and every tier.
    ///
    /// Bounded tiers may evict a member; eviction only drops tier
    /// membership, the item itself stays owned until [`MemoryStore::remove`]
    /// or compression.
    pub fn insert(&mut self, item: MemoryItem) -> Uuid {
        let id = item.id();
        self.items.insert(id, item);
        self.tracer.track(id, "insert");

        let items = &self.items;
        let importance = |id: Uuid| items.get(&id).map(|i| i.importance()).unwrap_or(0.0);
        self.short_term.admit(id, importance);
        self.long_term.admit(id, importance);
        self.working.admit(id, importance);

        trace!(%id, total = self.items.len(), "memory item inserted");
        id
    }

    /// Retrieve all items whose content contains `query`.
    ///
    /// Tiers are scanned in order (short-term, long-term, working) and
    /// duplicates collapse onto the first hit. Every match gets its access
    /// recorded; returned items are snapshots taken after that update.
    pub fn retrieve(&mut self, query: &str) -> Vec<MemoryItem> {
        let mut hits: Vec<Uuid> = Vec::new();
        let tier_ids = self
            .short_term
            .ids()
            .chain(self.long_term.ids())
            .chain(self.working.ids());
        for id in tier_ids {
            if hits.contains(&id) {
                continue;
            }
            if let Some(item) = self.items.get(&id) {
                if item.content().contains(query) {
                    hits.push(id);
                }
            }
        }

        let mut out = Vec::with_capacity(hits.len());
        for id in hits {
            if let Some(item) = self.items.get_mut(&id) {
                item.record_access();
                self.tracer.record_access(id);
                out.push(item.clone());
            }
        }
        trace!(query, hits = out.len(), "memory retrieval");
        out
    }

    /// Reward frequently-accessed items and pin important ones.
    ///
    /// Items retrieved at least [`PROMOTE_ACCESS_THRESHOLD`] times gain +2
    /// importance; items at or above [`PROMOTE_IMPORTANCE_BAR`] are admitted
    /// into the long-term tier if not already members. Returns the number of
    /// newly pinned items.
    pub fn promote(&mut self) -> usize {
        let mut to_pin: Vec<Uuid> = Vec::new();
        for item in self.items.values_mut() {
            if item.access_count() >= PROMOTE_ACCESS_THRESHOLD {
                item.boost_importance(2.0);
            }
            if item.importance() >= PROMOTE_IMPORTANCE_BAR {
                to_pin.push(item.id());
            }
        }

        let mut pinned = 0usize;
        for id in to_pin {
            if !self.long_term.contains(id) {
                let items = &self.items;
                let importance = |id: Uuid| items.get(&id).map(|i| i.importance()).unwrap_or(0.0);
                self.long_term.admit(id, importance);
                pinned += 1;
            }
        }
        if pinned > 0 {
            debug!(pinned, "promotion pinned items into long-term tier");
        }
        pinned
    }

    /// Link item `a` to item `b` with the given weight.
    pub fn relate(&mut self, a: Uuid, b: Uuid, weight: f32) -> Result<(), MemoryError> {
        if !self.items.contains_key(&b) {
            return Err(MemoryError::NotFound(b));
        }
        match self.items.get_mut(&a) {
            Some(item) => {
                item.add_relation(b, weight);
                Ok(())
            }
            None => Err(MemoryError::NotFound(a)),
        }
    }

    /// Items whose word-overlap similarity with `id` meets `threshold`,
    /// sorted by descending score.
    pub fn similar(&self, id: Uuid, threshold: f32) -> Result<Vec<(Uuid, f32)>, MemoryError> {
        let anchor = self.items.get(&id).ok_or(MemoryError::NotFound(id))?;

        let mut scored: Vec<(Uuid, f32)> = self
            .items
            .values()
            .filter(|other| other.id() != id)
            .map(|other| (other.id(), word_overlap(anchor.content(), other.content())))
            .filter(|&(_, score)| score >= threshold)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(scored)
    }

    /// Remove never-accessed items that are redundant or stale.
    ///
    /// An item is redundant when an earlier-created item scores at least
    /// [`REDUNDANCY_THRESHOLD`] word overlap against it; stale when older
    /// than `max_age_ms`. Only items with a zero access count are removed —
    /// anything the host ever retrieved is kept.
    pub fn compress(&mut self, max_age_ms: u64) -> CompressionReport {
        let now = now_ms();
        let total = self.items.len();

        let mut ordered: Vec<&MemoryItem> = self.items.values().collect();
        ordered.sort_by_key(|i| i.created_ms());

        let mut redundant: Vec<Uuid> = Vec::new();
        for (idx, item) in ordered.iter().enumerate() {
            let dup = ordered[..idx]
                .iter()
                .any(|earlier| word_overlap(earlier.content(), item.content()) >= REDUNDANCY_THRESHOLD);
            if dup {
                redundant.push(item.id());
            }
        }

        let victims: Vec<Uuid> = self
            .items
            .values()
            .filter(|item| item.access_count() == 0)
            .filter(|item| {
                redundant.contains(&item.id())
                    || now.saturating_sub(item.created_ms()) > max_age_ms
            })
            .map(|item| item.id())
            .collect();

        for &id in &victims {
            self.remove(id);
        }

        let report = CompressionReport::new(total, redundant.len(), victims.len());
        debug!(
            total = report.total,
            redundant = report.redundant,
            removed = report.removed,
            "memory compression pass finished"
        );
        report
    }

    /// Drop an item from the table and every tier. Returns whether it existed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let existed = self.items.remove(&id).is_some();
        if existed {
            self.short_term.remove(id);
            self.long_term.remove(id);
            self.working.remove(id);
            self.tracer.forget(id);
        }
        existed
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
