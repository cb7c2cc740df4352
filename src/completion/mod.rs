//! Per-step "done" flags that survive restarts.
//!
//! Flags are keyed by the full (category, topic, index) triple and persisted
//! under a single storage key as
//! `{"<category>": {"<topic>": [0, 2]}}`.
//! The flat `"<category>__<topic>__<index>": true` layout used by older
//! releases is still understood on read and rewritten on the next toggle.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Storage key holding the whole completion record
pub const STORAGE_KEY: &str = "helpcenter-steps-done";

const LEGACY_SEPARATOR: &str = "__";

/// Identity of a step within the content tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepKey {
    pub category_slug: String,
    pub topic_slug: String,
    pub index: usize,
}

impl StepKey {
    pub fn new(category_slug: &str, topic_slug: &str, index: usize) -> Self {
        Self {
            category_slug: category_slug.to_string(),
            topic_slug: topic_slug.to_string(),
            index,
        }
    }

    /// Parse a legacy flat key. The index is the last segment and the
    /// category the first; whatever is between is the topic.
    fn from_legacy(key: &str) -> Option<Self> {
        let (rest, index) = key.rsplit_once(LEGACY_SEPARATOR)?;
        let (category, topic) = rest.split_once(LEGACY_SEPARATOR)?;
        Some(Self::new(category, topic, index.parse().ok()?))
    }
}

type DoneMap = BTreeMap<String, BTreeMap<String, BTreeSet<usize>>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedRecord {
    Nested(DoneMap),
    Legacy(BTreeMap<String, bool>),
}

/// Tracks which steps the user has marked done
pub struct CompletionTracker {
    done: DoneMap,
    store: Box<dyn KeyValueStore>,
}

impl CompletionTracker {
    /// Restore flags from `store`. Unreadable or corrupt data yields an empty
    /// record.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let done = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => parse_record(&raw).unwrap_or_else(|| {
                tracing::warn!("Completion record is corrupt, starting empty");
                DoneMap::new()
            }),
            Ok(None) => DoneMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read completion record, starting empty");
                DoneMap::new()
            }
        };

        Self { done, store }
    }

    /// Tracker backed by an in-memory store
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn is_done(&self, category_slug: &str, topic_slug: &str, index: usize) -> bool {
        self.done
            .get(category_slug)
            .and_then(|topics| topics.get(topic_slug))
            .is_some_and(|indices| indices.contains(&index))
    }

    /// Flip the flag, persist, and return the new state.
    ///
    /// A failed write is logged and otherwise ignored; the in-memory flag
    /// still reflects the toggle for this session.
    pub fn toggle(&mut self, category_slug: &str, topic_slug: &str, index: usize) -> bool {
        let now_done = if self.is_done(category_slug, topic_slug, index) {
            self.unmark(category_slug, topic_slug, index);
            false
        } else {
            self.done
                .entry(category_slug.to_string())
                .or_default()
                .entry(topic_slug.to_string())
                .or_default()
                .insert(index);
            true
        };

        tracing::debug!(
            category = category_slug,
            topic = topic_slug,
            index,
            done = now_done,
            "Toggled step"
        );

        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "Failed to persist completion record");
        }

        now_done
    }

    /// Number of done steps among the first `step_count` steps of a topic
    pub fn done_count(&self, category_slug: &str, topic_slug: &str, step_count: usize) -> usize {
        self.done
            .get(category_slug)
            .and_then(|topics| topics.get(topic_slug))
            .map(|indices| indices.range(..step_count).count())
            .unwrap_or(0)
    }

    /// All done steps, in key order
    pub fn done_keys(&self) -> Vec<StepKey> {
        self.done
            .iter()
            .flat_map(|(category, topics)| {
                topics.iter().flat_map(move |(topic, indices)| {
                    indices
                        .iter()
                        .map(move |&index| StepKey::new(category, topic, index))
                })
            })
            .collect()
    }

    fn unmark(&mut self, category_slug: &str, topic_slug: &str, index: usize) {
        let Some(topics) = self.done.get_mut(category_slug) else {
            return;
        };
        if let Some(indices) = topics.get_mut(topic_slug) {
            indices.remove(&index);
            if indices.is_empty() {
                topics.remove(topic_slug);
            }
        }
        if topics.is_empty() {
            self.done.remove(category_slug);
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.done)?;
        self.store.set(STORAGE_KEY, &raw)
    }
}

fn parse_record(raw: &str) -> Option<DoneMap> {
    match serde_json::from_str::<Option<PersistedRecord>>(raw).ok()? {
        None => Some(DoneMap::new()),
        Some(PersistedRecord::Nested(done)) => Some(done),
        Some(PersistedRecord::Legacy(flat)) => {
            let mut done = DoneMap::new();
            for key in flat
                .into_iter()
                .filter(|(_, is_done)| *is_done)
                .filter_map(|(key, _)| StepKey::from_legacy(&key))
            {
                done.entry(key.category_slug)
                    .or_default()
                    .entry(key.topic_slug)
                    .or_default()
                    .insert(key.index);
            }
            tracing::info!("Migrated legacy completion record");
            Some(done)
        }
    }
}
