//! Emotion category definitions

use serde::{Deserialize, Serialize};

/// The five emotion categories, in canonical priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Happy,
    Sad,
    Angry,
    Neutral,
    Anxious,
}

impl EmotionCategory {
    /// Canonical order; also the tie-break priority
    pub const ALL: [EmotionCategory; 5] = [
        EmotionCategory::Happy,
        EmotionCategory::Sad,
        EmotionCategory::Angry,
        EmotionCategory::Neutral,
        EmotionCategory::Anxious,
    ];

    pub const COUNT: usize = 5;

    /// Ordinal into per-category arrays
    pub fn index(&self) -> usize {
        match self {
            EmotionCategory::Happy => 0,
            EmotionCategory::Sad => 1,
            EmotionCategory::Angry => 2,
            EmotionCategory::Neutral => 3,
            EmotionCategory::Anxious => 4,
        }
    }

    /// Lowercase key, same as the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "happy",
            EmotionCategory::Sad => "sad",
            EmotionCategory::Angry => "angry",
            EmotionCategory::Neutral => "neutral",
            EmotionCategory::Anxious => "anxious",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "Happy",
            EmotionCategory::Sad => "Sad",
            EmotionCategory::Angry => "Angry",
            EmotionCategory::Neutral => "Neutral",
            EmotionCategory::Anxious => "Anxious",
        }
    }

    /// Get emoji for category
    pub fn emoji(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "😊",
            EmotionCategory::Sad => "😢",
            EmotionCategory::Angry => "😠",
            EmotionCategory::Neutral => "😐",
            EmotionCategory::Anxious => "😰",
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            EmotionCategory::Happy => "\x1b[33m",   // Yellow
            EmotionCategory::Sad => "\x1b[34m",     // Blue
            EmotionCategory::Angry => "\x1b[31m",   // Red
            EmotionCategory::Neutral => "\x1b[90m", // Gray
            EmotionCategory::Anxious => "\x1b[35m", // Magenta
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
