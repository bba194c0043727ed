//! Weighted rule table
//!
//! Each rule is a conjunction of field equalities, a target category,
//! a weight and a reason. Table order is evaluation order.

use crate::types::{EmotionCategory, EyeState, EyebrowPosition, FeatureSnapshot, MouthShape, ReasonCode};
use crate::{
    W_ANGRY_FROWN_FURROWED, W_ANGRY_FURROWED_BROWS, W_ANGRY_TENSE_EYES, W_ANXIOUS_FURROWED_NEUTRAL,
    W_ANXIOUS_OPEN_RAISED, W_ANXIOUS_RAISED_TENSE, W_ANXIOUS_TENSE_EYES, W_HAPPY_OPEN_EYES_SMILE,
    W_HAPPY_RAISED_BROWS, W_HAPPY_RELAXED_EYES, W_HAPPY_SMILE, W_NEUTRAL_MOUTH, W_NEUTRAL_NORMAL_BROWS,
    W_NEUTRAL_OPEN_EYES_MOUTH, W_SAD_FROWN, W_SAD_NORMAL_BROWS_FROWN, W_SAD_RELAXED_EYES_FROWN,
};

use EmotionCategory::{Angry, Anxious, Happy, Neutral, Sad};

/// Conjunction of optional field equalities. Unset fields match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub eye: Option<EyeState>,
    pub mouth: Option<MouthShape>,
    pub brow: Option<EyebrowPosition>,
}

impl Condition {
    const ANY: Condition = Condition {
        eye: None,
        mouth: None,
        brow: None,
    };

    /// Does the snapshot satisfy every set field?
    pub fn matches(&self, snapshot: &FeatureSnapshot) -> bool {
        self.eye.map_or(true, |e| e == snapshot.eye_state)
            && self.mouth.map_or(true, |m| m == snapshot.mouth_shape)
            && self.brow.map_or(true, |b| b == snapshot.eyebrow_position)
    }
}

/// One weighted piece of evidence for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub category: EmotionCategory,
    pub condition: Condition,
    pub weight: u32,
    pub reason: ReasonCode,
}

const fn rule(category: EmotionCategory, condition: Condition, weight: u32, reason: ReasonCode) -> Rule {
    Rule {
        category,
        condition,
        weight,
        reason,
    }
}

const fn eye(e: EyeState) -> Condition {
    Condition { eye: Some(e), ..Condition::ANY }
}

const fn mouth(m: MouthShape) -> Condition {
    Condition { mouth: Some(m), ..Condition::ANY }
}

const fn brow(b: EyebrowPosition) -> Condition {
    Condition { brow: Some(b), ..Condition::ANY }
}

const fn eye_mouth(e: EyeState, m: MouthShape) -> Condition {
    Condition { eye: Some(e), mouth: Some(m), brow: None }
}

const fn eye_brow(e: EyeState, b: EyebrowPosition) -> Condition {
    Condition { eye: Some(e), mouth: None, brow: Some(b) }
}

const fn mouth_brow(m: MouthShape, b: EyebrowPosition) -> Condition {
    Condition { eye: None, mouth: Some(m), brow: Some(b) }
}

/// The full rule table, in evaluation order
pub static RULES: [Rule; 17] = [
    // Happy
    rule(Happy, mouth(MouthShape::Smile), W_HAPPY_SMILE, ReasonCode::H01_SMILE),
    rule(Happy, eye(EyeState::Relaxed), W_HAPPY_RELAXED_EYES, ReasonCode::H02_RELAXED_EYES),
    rule(Happy, brow(EyebrowPosition::Raised), W_HAPPY_RAISED_BROWS, ReasonCode::H03_RAISED_BROWS),
    rule(
        Happy,
        eye_mouth(EyeState::Open, MouthShape::Smile),
        W_HAPPY_OPEN_EYES_SMILE,
        ReasonCode::H04_OPEN_EYES_SMILE,
    ),
    // Sad
    rule(Sad, mouth(MouthShape::Frown), W_SAD_FROWN, ReasonCode::S01_FROWN),
    rule(
        Sad,
        eye_mouth(EyeState::Relaxed, MouthShape::Frown),
        W_SAD_RELAXED_EYES_FROWN,
        ReasonCode::S02_DROOPY_EYES_FROWN,
    ),
    rule(
        Sad,
        mouth_brow(MouthShape::Frown, EyebrowPosition::Normal),
        W_SAD_NORMAL_BROWS_FROWN,
        ReasonCode::S03_NORMAL_BROWS_FROWN,
    ),
    // Angry
    rule(Angry, brow(EyebrowPosition::Furrowed), W_ANGRY_FURROWED_BROWS, ReasonCode::A01_FURROWED_BROWS),
    rule(Angry, eye(EyeState::Tense), W_ANGRY_TENSE_EYES, ReasonCode::A02_TENSE_EYES),
    rule(
        Angry,
        mouth_brow(MouthShape::Frown, EyebrowPosition::Furrowed),
        W_ANGRY_FROWN_FURROWED,
        ReasonCode::A03_FROWN_FURROWED,
    ),
    // Neutral
    rule(Neutral, mouth(MouthShape::Neutral), W_NEUTRAL_MOUTH, ReasonCode::N01_NEUTRAL_MOUTH),
    rule(Neutral, brow(EyebrowPosition::Normal), W_NEUTRAL_NORMAL_BROWS, ReasonCode::N02_NORMAL_BROWS),
    rule(
        Neutral,
        eye_mouth(EyeState::Open, MouthShape::Neutral),
        W_NEUTRAL_OPEN_EYES_MOUTH,
        ReasonCode::N03_OPEN_EYES_NEUTRAL,
    ),
    // Anxious
    rule(Anxious, eye(EyeState::Tense), W_ANXIOUS_TENSE_EYES, ReasonCode::X01_TENSE_EYES),
    rule(
        Anxious,
        eye_brow(EyeState::Tense, EyebrowPosition::Raised),
        W_ANXIOUS_RAISED_TENSE,
        ReasonCode::X02_RAISED_TENSE,
    ),
    rule(
        Anxious,
        mouth_brow(MouthShape::Neutral, EyebrowPosition::Furrowed),
        W_ANXIOUS_FURROWED_NEUTRAL,
        ReasonCode::X03_FURROWED_CLOSED_MOUTH,
    ),
    rule(
        Anxious,
        eye_brow(EyeState::Open, EyebrowPosition::Raised),
        W_ANXIOUS_OPEN_RAISED,
        ReasonCode::X04_OPEN_RAISED,
    ),
];

/// Rules whose condition the snapshot satisfies, in table order
pub fn fired(snapshot: &FeatureSnapshot) -> impl Iterator<Item = &'static Rule> + '_ {
    RULES.iter().filter(move |r| r.condition.matches(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_code_matches_category() {
        for r in RULES.iter() {
            assert_eq!(r.reason.category(), Some(r.category), "{}", r.reason.code());
        }
    }

    #[test]
    fn test_rules_grouped_in_canonical_order() {
        let order: Vec<usize> = RULES.iter().map(|r| r.category.index()).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_tense_eyes_feed_two_categories() {
        let snap = FeatureSnapshot::new(EyeState::Tense, MouthShape::Smile, EyebrowPosition::Normal);
        let codes: Vec<_> = fired(&snap).map(|r| r.reason).collect();
        assert!(codes.contains(&ReasonCode::A02_TENSE_EYES));
        assert!(codes.contains(&ReasonCode::X01_TENSE_EYES));
    }

    #[test]
    fn test_compound_condition_needs_both_fields() {
        let c = eye_mouth(EyeState::Open, MouthShape::Smile);
        assert!(c.matches(&FeatureSnapshot::new(EyeState::Open, MouthShape::Smile, EyebrowPosition::Furrowed)));
        assert!(!c.matches(&FeatureSnapshot::new(EyeState::Open, MouthShape::Frown, EyebrowPosition::Furrowed)));
        assert!(!c.matches(&FeatureSnapshot::new(EyeState::Tense, MouthShape::Smile, EyebrowPosition::Furrowed)));
    }
}
