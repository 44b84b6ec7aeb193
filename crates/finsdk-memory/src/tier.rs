use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

/// Victim selection applied when a bounded tier is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PruneStrategy {
    /// Evict the item admitted earliest.
    OldestFirst,
    /// Evict the item with the lowest importance score.
    LeastImportant,
}

/// Named list of item ids with an optional capacity bound.
///
/// Tiers do not own items; the store keeps the single item table and tiers
/// track membership. Admission order is preserved, which is what
/// [`PruneStrategy::OldestFirst`] evicts by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryTier {
    name: String,
    capacity: Option<usize>,
    strategy: PruneStrategy,
    order: Vec<Uuid>,
}

impl MemoryTier {
    /// Create a tier. `capacity: None` means unbounded.
    pub fn new(name: impl Into<String>, capacity: Option<usize>, strategy: PruneStrategy) -> Self {
        Self {
            name: name.into(),
            capacity,
            strategy,
            order: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.order.contains(&id)
    }

    /// Member ids in admission order.
    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.order.iter().copied()
    }

    /// Admit an id, evicting one victim first if the tier is full.
    ///
    /// `importance_of` resolves the current importance for
    /// [`PruneStrategy::LeastImportant`]. Admitting a present id is a no-op.
    /// Returns the evicted id, if any.
    pub(crate) fn admit<F>(&mut self, id: Uuid, importance_of: F) -> Option<Uuid>
    where
        F: Fn(Uuid) -> f32,
    {
        if self.contains(id) {
            return None;
        }

        let victim = match self.capacity {
            Some(cap) if self.order.len() >= cap => self.select_victim(&importance_of),
            _ => None,
        };
        if let Some(v) = victim {
            self.remove(v);
            trace!(tier = %self.name, evicted = %v, "tier at capacity, pruned one item");
        }
        self.order.push(id);
        victim
    }

    /// Remove an id from the tier. Returns whether it was present.
    pub(crate) fn remove(&mut self, id: Uuid) -> bool {
        match self.order.iter().position(|&m| m == id) {
            Some(pos) => {
                self.order.remove(pos);
                true
            }
            None => false,
        }
    }

    fn select_victim<F>(&self, importance_of: &F) -> Option<Uuid>
    where
        F: Fn(Uuid) -> f32,
    {
        match self.strategy {
            PruneStrategy::OldestFirst => self.order.first().copied(),
            PruneStrategy::LeastImportant => self
                .order
                .iter()
                .copied()
                .min_by(|&a, &b| importance_of(a).total_cmp(&importance_of(b))),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{MemoryTier, PruneStrategy};

    fn flat(_: Uuid) -> f32 {
        5.0
    }

    #[test]
    fn unbounded_tier_never_evicts() {
        let mut tier = MemoryTier::new("long-term", None, PruneStrategy::LeastImportant);
        for _ in 0..100 {
            assert!(tier.admit(Uuid::new_v4(), flat).is_none());
        }
        assert_eq!(tier.len(), 100);
    }

    #[test]
    fn oldest_first_evicts_in_admission_order() {
        let mut tier = MemoryTier::new("short-term", Some(2), PruneStrategy::OldestFirst);
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        tier.admit(a, flat);
        tier.admit(b, flat);
        assert_eq!(tier.admit(c, flat), Some(a));

        assert!(!tier.contains(a));
        assert!(tier.contains(b));
        assert!(tier.contains(c));
        assert_eq!(tier.len(), 2);
    }

    #[test]
    fn least_important_evicts_lowest_score() {
        let mut tier = MemoryTier::new("ranked", Some(2), PruneStrategy::LeastImportant);
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        tier.admit(a, |_| 0.0);
        tier.admit(b, |_| 0.0);

        let score = move |id: Uuid| if id == a { 1.0 } else { 9.0 };
        assert_eq!(tier.admit(c, score), Some(a));
        assert!(tier.contains(b) && tier.contains(c));
    }

    #[test]
    fn admitting_a_member_is_a_noop() {
        let mut tier = MemoryTier::new("short-term", Some(1), PruneStrategy::OldestFirst);
        let a = Uuid::new_v4();

        tier.admit(a, flat);
        assert!(tier.admit(a, flat).is_none());
        assert_eq!(tier.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut tier = MemoryTier::new("working", Some(3), PruneStrategy::OldestFirst);
        let a = Uuid::new_v4();

        tier.admit(a, flat);
        assert!(tier.remove(a));
        assert!(!tier.remove(a));
        assert!(tier.is_empty());
    }
}
