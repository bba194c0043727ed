//! EmoLens: explainable emotion detection from discrete facial features
//!
//! Path: FeatureSnapshot → rule table → floor → normalize → rank → ClassificationResult

pub mod core;
pub mod types;

pub use crate::core::{classify, classify_raw, format_report};

// =============================================================================
// FLOOR RULE
// =============================================================================

/// Raw score given to a category that no rule matched
pub const FLOOR_SCORE: u32 = 5;

/// Percentage scale used by normalization
pub const PERCENT_SCALE: u32 = 100;

// =============================================================================
// RULE WEIGHTS - happy
// =============================================================================

pub const W_HAPPY_SMILE: u32 = 45;
pub const W_HAPPY_RELAXED_EYES: u32 = 25;
pub const W_HAPPY_RAISED_BROWS: u32 = 15;
pub const W_HAPPY_OPEN_EYES_SMILE: u32 = 10;

// =============================================================================
// RULE WEIGHTS - sad
// =============================================================================

pub const W_SAD_FROWN: u32 = 45;
pub const W_SAD_RELAXED_EYES_FROWN: u32 = 20;
pub const W_SAD_NORMAL_BROWS_FROWN: u32 = 15;

// =============================================================================
// RULE WEIGHTS - angry
// =============================================================================

pub const W_ANGRY_FURROWED_BROWS: u32 = 35;
pub const W_ANGRY_TENSE_EYES: u32 = 30;
pub const W_ANGRY_FROWN_FURROWED: u32 = 20;

// =============================================================================
// RULE WEIGHTS - neutral
// =============================================================================

pub const W_NEUTRAL_MOUTH: u32 = 35;
pub const W_NEUTRAL_NORMAL_BROWS: u32 = 30;
pub const W_NEUTRAL_OPEN_EYES_MOUTH: u32 = 15;

// =============================================================================
// RULE WEIGHTS - anxious
// =============================================================================

pub const W_ANXIOUS_TENSE_EYES: u32 = 30;
pub const W_ANXIOUS_RAISED_TENSE: u32 = 25;
pub const W_ANXIOUS_FURROWED_NEUTRAL: u32 = 20;
pub const W_ANXIOUS_OPEN_RAISED: u32 = 15;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
