//! Session history: append-only list of results, owned by the caller

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ClassificationResult, EmotionCategory};

/// One history entry flattened for charting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// "#1", "#2", ...
    pub label: String,
    pub timestamp: DateTime<Utc>,
    pub detected_emotion: EmotionCategory,
    /// Score per category, canonical order
    pub scores: [u32; EmotionCategory::COUNT],
}

/// Append-only in-memory history
#[derive(Debug, Clone, Default)]
pub struct EmotionHistory {
    entries: Vec<ClassificationResult>,
}

impl EmotionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result; returns its 0-based index
    pub fn record(&mut self, result: ClassificationResult) -> usize {
        self.entries.push(result);
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassificationResult> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&ClassificationResult> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.entries.iter()
    }

    /// Per-entry score series for charting
    pub fn series(&self) -> Vec<HistoryPoint> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let mut scores = [0; EmotionCategory::COUNT];
                for s in &result.scores {
                    scores[s.emotion.index()] = s.score;
                }
                HistoryPoint {
                    label: format!("#{}", i + 1),
                    timestamp: result.timestamp,
                    detected_emotion: result.detected_emotion,
                    scores,
                }
            })
            .collect()
    }

    /// How many times each category was detected, canonical order
    pub fn detected_counts(&self) -> [usize; EmotionCategory::COUNT] {
        let mut counts = [0; EmotionCategory::COUNT];
        for result in &self.entries {
            counts[result.detected_emotion.index()] += 1;
        }
        counts
    }
}
