//! Reason codes for fired rules
//!
//! One code per rule in the table, plus the floor code.

use serde::{Deserialize, Serialize};

use crate::types::EmotionCategory;

/// Evidence attached to an emotion score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // H: Happy
    // =========================================================================
    /// mouth = smile
    H01_SMILE,
    /// eyes = relaxed
    H02_RELAXED_EYES,
    /// brows = raised
    H03_RAISED_BROWS,
    /// eyes = open AND mouth = smile
    H04_OPEN_EYES_SMILE,

    // =========================================================================
    // S: Sad
    // =========================================================================
    /// mouth = frown
    S01_FROWN,
    /// eyes = relaxed AND mouth = frown
    S02_DROOPY_EYES_FROWN,
    /// brows = normal AND mouth = frown
    S03_NORMAL_BROWS_FROWN,

    // =========================================================================
    // A: Angry
    // =========================================================================
    /// brows = furrowed
    A01_FURROWED_BROWS,
    /// eyes = tense
    A02_TENSE_EYES,
    /// mouth = frown AND brows = furrowed
    A03_FROWN_FURROWED,

    // =========================================================================
    // N: Neutral
    // =========================================================================
    /// mouth = neutral
    N01_NEUTRAL_MOUTH,
    /// brows = normal
    N02_NORMAL_BROWS,
    /// eyes = open AND mouth = neutral
    N03_OPEN_EYES_NEUTRAL,

    // =========================================================================
    // X: Anxious
    // =========================================================================
    /// eyes = tense
    X01_TENSE_EYES,
    /// brows = raised AND eyes = tense
    X02_RAISED_TENSE,
    /// brows = furrowed AND mouth = neutral
    X03_FURROWED_CLOSED_MOUTH,
    /// eyes = open AND brows = raised
    X04_OPEN_RAISED,

    // =========================================================================
    // F: Floor
    // =========================================================================
    /// No rule matched; floor score applied
    F00_MINIMAL_MATCH,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::H01_SMILE => "H01_SMILE",
            Self::H02_RELAXED_EYES => "H02_RELAXED_EYES",
            Self::H03_RAISED_BROWS => "H03_RAISED_BROWS",
            Self::H04_OPEN_EYES_SMILE => "H04_OPEN_EYES_SMILE",
            Self::S01_FROWN => "S01_FROWN",
            Self::S02_DROOPY_EYES_FROWN => "S02_DROOPY_EYES_FROWN",
            Self::S03_NORMAL_BROWS_FROWN => "S03_NORMAL_BROWS_FROWN",
            Self::A01_FURROWED_BROWS => "A01_FURROWED_BROWS",
            Self::A02_TENSE_EYES => "A02_TENSE_EYES",
            Self::A03_FROWN_FURROWED => "A03_FROWN_FURROWED",
            Self::N01_NEUTRAL_MOUTH => "N01_NEUTRAL_MOUTH",
            Self::N02_NORMAL_BROWS => "N02_NORMAL_BROWS",
            Self::N03_OPEN_EYES_NEUTRAL => "N03_OPEN_EYES_NEUTRAL",
            Self::X01_TENSE_EYES => "X01_TENSE_EYES",
            Self::X02_RAISED_TENSE => "X02_RAISED_TENSE",
            Self::X03_FURROWED_CLOSED_MOUTH => "X03_FURROWED_CLOSED_MOUTH",
            Self::X04_OPEN_RAISED => "X04_OPEN_RAISED",
            Self::F00_MINIMAL_MATCH => "F00_MINIMAL_MATCH",
        }
    }

    /// Get human-readable description (the reason text shown to users)
    pub fn description(&self) -> &'static str {
        match self {
            Self::H01_SMILE => "Smiling mouth detected",
            Self::H02_RELAXED_EYES => "Relaxed eyes indicate comfort",
            Self::H03_RAISED_BROWS => "Raised eyebrows suggest positive surprise",
            Self::H04_OPEN_EYES_SMILE => "Open eyes with smile show engagement",
            Self::S01_FROWN => "Frowning mouth detected",
            Self::S02_DROOPY_EYES_FROWN => "Droopy eyes with frown suggest sadness",
            Self::S03_NORMAL_BROWS_FROWN => "Neutral brows with frown indicate melancholy",
            Self::A01_FURROWED_BROWS => "Furrowed eyebrows indicate tension",
            Self::A02_TENSE_EYES => "Tense eyes suggest frustration",
            Self::A03_FROWN_FURROWED => "Frown with furrowed brows is a strong anger signal",
            Self::N01_NEUTRAL_MOUTH => "Neutral mouth position",
            Self::N02_NORMAL_BROWS => "Normal eyebrow position",
            Self::N03_OPEN_EYES_NEUTRAL => "Open eyes with neutral expression",
            Self::X01_TENSE_EYES => "Tense eyes suggest worry",
            Self::X02_RAISED_TENSE => "Raised brows with tense eyes indicate anxiety",
            Self::X03_FURROWED_CLOSED_MOUTH => "Furrowed brows with closed mouth suggest unease",
            Self::X04_OPEN_RAISED => "Wide open eyes with raised brows show alertness",
            Self::F00_MINIMAL_MATCH => "Minimal feature match",
        }
    }

    /// Category this code contributes to. None for the floor code.
    pub fn category(&self) -> Option<EmotionCategory> {
        match self {
            Self::H01_SMILE | Self::H02_RELAXED_EYES | Self::H03_RAISED_BROWS | Self::H04_OPEN_EYES_SMILE => {
                Some(EmotionCategory::Happy)
            }
            Self::S01_FROWN | Self::S02_DROOPY_EYES_FROWN | Self::S03_NORMAL_BROWS_FROWN => {
                Some(EmotionCategory::Sad)
            }
            Self::A01_FURROWED_BROWS | Self::A02_TENSE_EYES | Self::A03_FROWN_FURROWED => {
                Some(EmotionCategory::Angry)
            }
            Self::N01_NEUTRAL_MOUTH | Self::N02_NORMAL_BROWS | Self::N03_OPEN_EYES_NEUTRAL => {
                Some(EmotionCategory::Neutral)
            }
            Self::X01_TENSE_EYES
            | Self::X02_RAISED_TENSE
            | Self::X03_FURROWED_CLOSED_MOUTH
            | Self::X04_OPEN_RAISED => Some(EmotionCategory::Anxious),
            Self::F00_MINIMAL_MATCH => None,
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
