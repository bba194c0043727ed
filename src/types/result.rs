//! Classification output structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EmotionCategory, FeatureSnapshot, ReasonCode};

/// Normalized score for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionScore {
    /// Category scored
    pub emotion: EmotionCategory,
    /// Normalized percentage (0-100)
    pub score: u32,
    /// Floor-adjusted raw score before normalization
    pub raw_score: u32,
    /// Reason texts, in rule evaluation order
    pub reasons: Vec<String>,
    /// Reason codes, parallel to `reasons`
    pub reason_codes: Vec<ReasonCode>,
}

/// Result of classifying one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Top-ranked category
    pub detected_emotion: EmotionCategory,
    /// Score of the top-ranked category
    pub confidence: u32,
    /// Snapshot that produced this result
    pub features: FeatureSnapshot,
    /// All five scores, sorted descending (ties in canonical order)
    pub scores: Vec<EmotionScore>,
    /// When the classification was made
    pub timestamp: DateTime<Utc>,
}

impl ClassificationResult {
    /// Look up the score entry for a category
    pub fn score_for(&self, category: EmotionCategory) -> Option<&EmotionScore> {
        self.scores.iter().find(|s| s.emotion == category)
    }

    /// Sum of the rounded percentages. Close to, not always exactly, 100.
    pub fn score_total(&self) -> u32 {
        self.scores.iter().map(|s| s.score).sum()
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.detected_emotion.color_code();
        let reset = EmotionCategory::color_reset();

        format!(
            "{}{} {} {}% | {}{}",
            color,
            self.detected_emotion.emoji(),
            self.detected_emotion.label(),
            self.confidence,
            self.breakdown(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "emotion={} | confidence={} | {} | {}",
            self.detected_emotion,
            self.confidence,
            self.features,
            self.breakdown()
        )
    }

    fn breakdown(&self) -> String {
        self.scores
            .iter()
            .map(|s| format!("{}={}", s.emotion, s.score))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
