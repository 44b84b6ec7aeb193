use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::now_ms;

/// Content category of a memory item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// Free-form text (default).
    #[default]
    Text,
    /// Numerical data.
    Numerical,
    /// Pointer to an external resource.
    Reference,
    /// Structured data such as JSON or tables.
    Structured,
}

/// Weighted, directed link between two memory items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Id of the related item.
    pub target: Uuid,
    /// Link strength.
    pub weight: f32,
}

/// A single unit of stored memory.
///
/// Importance ranges over `0.0..=10.0` and starts at 5; the factual gradient
/// ranges over `0.0..=1.0` where 1 marks verified fact and 0 marks
/// imaginative content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryItem {
    id: Uuid,
    content: String,
    kind: MemoryKind,
    factual: f32,
    confidence: f32,
    source: Option<String>,
    created_ms: u64,
    access_count: u32,
    importance: f32,
    tags: BTreeSet<String>,
    relations: Vec<Relation>,
}

impl MemoryItem {
    /// Create a new text item with neutral classification defaults.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            kind: MemoryKind::default(),
            factual: 0.5,
            confidence: 0.5,
            source: None,
            created_ms: now_ms(),
            access_count: 0,
            importance: 5.0,
            tags: BTreeSet::new(),
            relations: Vec::new(),
        }
    }

    /// Replace the content kind.
    pub fn with_kind(mut self, kind: MemoryKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the factual gradient, clamped to `0.0..=1.0`.
    pub fn with_factual(mut self, factual: f32) -> Self {
        self.factual = factual.clamp(0.0, 1.0);
        self
    }

    /// Set the confidence score, clamped to `0.0..=1.0`.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Attach a source attribution.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> MemoryKind {
        self.kind
    }

    pub fn factual(&self) -> f32 {
        self.factual
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn created_ms(&self) -> u64 {
        self.created_ms
    }

    pub fn access_count(&self) -> u32 {
        self.access_count
    }

    pub fn importance(&self) -> f32 {
        self.importance
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.as_str())
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Record a retrieval of this item.
    ///
    /// Bumps the access counter and recomputes importance as
    /// `min(10, 5 + ln(access_count + 1))`.
    pub fn record_access(&mut self) {
        self.access_count += 1;
        self.importance = (5.0 + ((self.access_count + 1) as f32).ln()).min(10.0);
    }

    /// Raise importance by the given amount, saturating at 10.
    pub(crate) fn boost_importance(&mut self, by: f32) {
        self.importance = (self.importance + by).min(10.0);
    }

    /// Link this item to another one.
    pub(crate) fn add_relation(&mut self, target: Uuid, weight: f32) {
        self.relations.push(Relation { target, weight });
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, created_ms: u64) {
        self.created_ms = created_ms;
    }
}
