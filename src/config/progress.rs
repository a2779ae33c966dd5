//! Passage completion tracking

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::storage::{KeyValueStore, read_json, write_json};

/// Storage key holding the progress map
pub const PROGRESS_KEY: &str = "readingProgress";

/// Completion record for a single passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassageProgress {
    /// Score as a percentage
    pub score: f64,

    /// Whether the passage has been completed
    pub completed: bool,

    /// When the score was recorded
    #[serde(with = "crate::time::iso_millis")]
    pub date: DateTime<Utc>,
}

/// All passage progress, keyed by passage id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    pub passages: BTreeMap<String, PassageProgress>,
}

impl Progress {
    /// Load progress from the store; an absent key is an empty map
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        read_json(store, PROGRESS_KEY)
    }

    /// Save progress to the store
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        write_json(store, PROGRESS_KEY, self)
    }

    /// Delete all stored progress
    pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
        store.remove_item(PROGRESS_KEY)?;
        Ok(())
    }

    /// Record a completion, replacing any earlier entry for the passage
    pub fn record(&mut self, passage_id: &str, score: f64, at: DateTime<Utc>) -> &PassageProgress {
        self.passages.insert(
            passage_id.to_string(),
            PassageProgress { score, completed: true, date: at },
        );
        &self.passages[passage_id]
    }

    pub fn get(&self, passage_id: &str) -> Option<&PassageProgress> {
        self.passages.get(passage_id)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Mean score across recorded passages
    pub fn average_score(&self) -> Option<f64> {
        if self.passages.is_empty() {
            return None;
        }
        let total: f64 = self.passages.values().map(|p| p.score).sum();
        Some(total / self.passages.len() as f64)
    }

    /// Passages scoring below `threshold`, lowest score first
    pub fn weak_passages(&self, threshold: f64) -> Vec<(&str, f64)> {
        let mut weak: Vec<(&str, f64)> = self
            .passages
            .iter()
            .filter(|(_, p)| p.score < threshold)
            .map(|(id, p)| (id.as_str(), p.score))
            .collect();

        weak.sort_by(|a, b| a.1.total_cmp(&b.1));
        weak
    }
}
