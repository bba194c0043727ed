//! Emotion classifier: rules → floor → normalize → rank
//!
//! - Every rule in the table is evaluated; weights add up per category
//! - A category with raw score 0 is floored to 5 ("Minimal feature match")
//! - score = round_half_up(raw × 100 / total), computed in integers
//! - Stable descending sort; ties keep happy, sad, angry, neutral, anxious order

use tracing::debug;

use crate::core::clock::{Clock, SystemClock};
use crate::core::rules;
use crate::types::{
    ClassificationResult, EmotionCategory, EmotionScore, FeatureSnapshot, RawFeatureSnapshot, ReasonCode,
    ValidationError,
};
use crate::{FLOOR_SCORE, PERCENT_SCALE};

/// Raw evidence for one category before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Accumulator {
    raw: u32,
    reasons: Vec<ReasonCode>,
}

/// Classifier bound to a clock
#[derive(Debug, Clone, Default)]
pub struct EmotionClassifier<C: Clock = SystemClock> {
    clock: C,
}

impl EmotionClassifier<SystemClock> {
    /// Create classifier using the system clock
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> EmotionClassifier<C> {
    /// Create classifier with a specific clock
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Classify a snapshot. Never fails on a typed snapshot.
    pub fn classify(&self, snapshot: FeatureSnapshot) -> ClassificationResult {
        let scores = score(snapshot);
        let (detected, confidence) = (scores[0].emotion, scores[0].score);

        debug!(
            features = %snapshot,
            detected = %detected,
            confidence,
            "classified snapshot"
        );

        ClassificationResult {
            detected_emotion: detected,
            confidence,
            features: snapshot,
            scores,
            timestamp: self.clock.now(),
        }
    }

    /// Validate untyped input, then classify
    pub fn classify_raw(&self, raw: &RawFeatureSnapshot) -> Result<ClassificationResult, ValidationError> {
        let snapshot = raw.validate()?;
        Ok(self.classify(snapshot))
    }
}

/// Classify with the system clock
pub fn classify(snapshot: FeatureSnapshot) -> ClassificationResult {
    EmotionClassifier::new().classify(snapshot)
}

/// Validate and classify with the system clock
pub fn classify_raw(raw: &RawFeatureSnapshot) -> Result<ClassificationResult, ValidationError> {
    EmotionClassifier::new().classify_raw(raw)
}

/// Ranked, normalized scores for a snapshot. Pure; no timestamp.
pub fn score(snapshot: FeatureSnapshot) -> Vec<EmotionScore> {
    let accumulators = accumulate(&snapshot);
    let total: u32 = accumulators.iter().map(|a| a.raw).sum();

    let mut scores: Vec<EmotionScore> = EmotionCategory::ALL
        .into_iter()
        .zip(accumulators)
        .map(|(emotion, acc)| EmotionScore {
            emotion,
            score: normalize(acc.raw, total),
            raw_score: acc.raw,
            reasons: acc.reasons.iter().map(|r| r.description().to_string()).collect(),
            reason_codes: acc.reasons,
        })
        .collect();

    // sort_by is stable, so equal scores stay in canonical order
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

/// Floor-adjusted raw scores, indexed by category ordinal
pub fn raw_scores(snapshot: FeatureSnapshot) -> [u32; EmotionCategory::COUNT] {
    let accumulators = accumulate(&snapshot);
    let mut raw = [0; EmotionCategory::COUNT];
    for (slot, acc) in raw.iter_mut().zip(accumulators.iter()) {
        *slot = acc.raw;
    }
    raw
}

fn accumulate(snapshot: &FeatureSnapshot) -> [Accumulator; EmotionCategory::COUNT] {
    let mut acc: [Accumulator; EmotionCategory::COUNT] = Default::default();

    for rule in rules::fired(snapshot) {
        let slot = &mut acc[rule.category.index()];
        slot.raw += rule.weight;
        slot.reasons.push(rule.reason);
    }

    for slot in acc.iter_mut() {
        if slot.raw == 0 {
            slot.raw = FLOOR_SCORE;
            slot.reasons.push(ReasonCode::F00_MINIMAL_MATCH);
        }
    }

    acc
}

/// round_half_up(raw × 100 / total)
fn normalize(raw: u32, total: u32) -> u32 {
    debug_assert!(total > 0);
    (2 * raw * PERCENT_SCALE + total) / (2 * total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EyeState, EyebrowPosition, MouthShape};

    #[test]
    fn test_normalize_rounds_half_up() {
        assert_eq!(normalize(1, 8), 13); // 12.5
        assert_eq!(normalize(1, 3), 33); // 33.3
        assert_eq!(normalize(2, 3), 67); // 66.7
        assert_eq!(normalize(5, 5), 100);
    }

    #[test]
    fn test_floor_applied_once() {
        let snap = FeatureSnapshot::new(EyeState::Open, MouthShape::Smile, EyebrowPosition::Normal);
        let acc = accumulate(&snap);
        let sad = &acc[EmotionCategory::Sad.index()];
        assert_eq!(sad.raw, FLOOR_SCORE);
        assert_eq!(sad.reasons, vec![ReasonCode::F00_MINIMAL_MATCH]);
    }

    #[test]
    fn test_reasons_keep_rule_order() {
        let snap = FeatureSnapshot::new(EyeState::Tense, MouthShape::Frown, EyebrowPosition::Furrowed);
        let acc = accumulate(&snap);
        assert_eq!(
            acc[EmotionCategory::Angry.index()].reasons,
            vec![
                ReasonCode::A01_FURROWED_BROWS,
                ReasonCode::A02_TENSE_EYES,
                ReasonCode::A03_FROWN_FURROWED,
            ]
        );
    }

    #[test]
    fn test_raw_scores_by_index() {
        let snap = FeatureSnapshot::new(EyeState::Relaxed, MouthShape::Neutral, EyebrowPosition::Normal);
        assert_eq!(raw_scores(snap), [25, 5, 5, 65, 5]);
    }
}
