//! Facial feature domains and the snapshot fed to the classifier

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::types::{FieldIssue, ValidationError};

/// Which field of a snapshot a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureField {
    EyeState,
    MouthShape,
    EyebrowPosition,
}

impl FeatureField {
    /// Field name as it appears in JSON input
    pub fn name(&self) -> &'static str {
        match self {
            FeatureField::EyeState => "eye_state",
            FeatureField::MouthShape => "mouth_shape",
            FeatureField::EyebrowPosition => "eyebrow_position",
        }
    }

    /// Human-readable label (used in reports)
    pub fn label(&self) -> &'static str {
        match self {
            FeatureField::EyeState => "Eye State",
            FeatureField::MouthShape => "Mouth Shape",
            FeatureField::EyebrowPosition => "Eyebrow Position",
        }
    }
}

impl std::fmt::Display for FeatureField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Observed eye state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeState {
    Open,
    Relaxed,
    Tense,
}

impl EyeState {
    pub const ALL: [EyeState; 3] = [EyeState::Open, EyeState::Relaxed, EyeState::Tense];

    pub fn as_str(&self) -> &'static str {
        match self {
            EyeState::Open => "open",
            EyeState::Relaxed => "relaxed",
            EyeState::Tense => "tense",
        }
    }
}

impl FromStr for EyeState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(EyeState::Open),
            "relaxed" => Ok(EyeState::Relaxed),
            "tense" => Ok(EyeState::Tense),
            _ => Err(ValidationError::out_of_domain(FeatureField::EyeState, s)),
        }
    }
}

/// Observed mouth shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouthShape {
    Smile,
    Neutral,
    Frown,
}

impl MouthShape {
    pub const ALL: [MouthShape; 3] = [MouthShape::Smile, MouthShape::Neutral, MouthShape::Frown];

    pub fn as_str(&self) -> &'static str {
        match self {
            MouthShape::Smile => "smile",
            MouthShape::Neutral => "neutral",
            MouthShape::Frown => "frown",
        }
    }
}

impl FromStr for MouthShape {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smile" => Ok(MouthShape::Smile),
            "neutral" => Ok(MouthShape::Neutral),
            "frown" => Ok(MouthShape::Frown),
            _ => Err(ValidationError::out_of_domain(FeatureField::MouthShape, s)),
        }
    }
}

/// Observed eyebrow position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyebrowPosition {
    Raised,
    Normal,
    Furrowed,
}

impl EyebrowPosition {
    pub const ALL: [EyebrowPosition; 3] = [
        EyebrowPosition::Raised,
        EyebrowPosition::Normal,
        EyebrowPosition::Furrowed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EyebrowPosition::Raised => "raised",
            EyebrowPosition::Normal => "normal",
            EyebrowPosition::Furrowed => "furrowed",
        }
    }
}

impl FromStr for EyebrowPosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raised" => Ok(EyebrowPosition::Raised),
            "normal" => Ok(EyebrowPosition::Normal),
            "furrowed" => Ok(EyebrowPosition::Furrowed),
            _ => Err(ValidationError::out_of_domain(FeatureField::EyebrowPosition, s)),
        }
    }
}

impl std::fmt::Display for EyeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for MouthShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for EyebrowPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One observation of eyes, mouth and eyebrows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub eye_state: EyeState,
    pub mouth_shape: MouthShape,
    pub eyebrow_position: EyebrowPosition,
}

impl FeatureSnapshot {
    pub fn new(eye_state: EyeState, mouth_shape: MouthShape, eyebrow_position: EyebrowPosition) -> Self {
        Self {
            eye_state,
            mouth_shape,
            eyebrow_position,
        }
    }

    /// Every valid snapshot (3 × 3 × 3), eye-major order
    pub fn all() -> impl Iterator<Item = FeatureSnapshot> {
        EyeState::ALL.into_iter().flat_map(|eye| {
            MouthShape::ALL.into_iter().flat_map(move |mouth| {
                EyebrowPosition::ALL
                    .into_iter()
                    .map(move |brow| FeatureSnapshot::new(eye, mouth, brow))
            })
        })
    }

    /// Parse three string values, collecting every invalid field
    pub fn parse(eye: &str, mouth: &str, brow: &str) -> Result<Self, ValidationError> {
        RawFeatureSnapshot::from_text(Some(eye), Some(mouth), Some(brow)).validate()
    }
}

impl Default for FeatureSnapshot {
    /// Starting selection: open eyes, neutral mouth, normal brows
    fn default() -> Self {
        Self::new(EyeState::Open, MouthShape::Neutral, EyebrowPosition::Normal)
    }
}

impl std::fmt::Display for FeatureSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "eyes={} mouth={} brows={}",
            self.eye_state, self.mouth_shape, self.eyebrow_position
        )
    }
}

/// Untyped snapshot as received from external input (JSON bodies).
/// Values of any JSON type are accepted here and checked by `validate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeatureSnapshot {
    #[serde(default)]
    pub eye_state: Option<Value>,
    #[serde(default)]
    pub mouth_shape: Option<Value>,
    #[serde(default)]
    pub eyebrow_position: Option<Value>,
}

impl RawFeatureSnapshot {
    /// Build from optional text values (CLI input)
    pub fn from_text(eye: Option<&str>, mouth: Option<&str>, brow: Option<&str>) -> Self {
        let text = |v: Option<&str>| v.map(|s| Value::String(s.to_string()));
        Self {
            eye_state: text(eye),
            mouth_shape: text(mouth),
            eyebrow_position: text(brow),
        }
    }

    /// Validate all three fields and build a typed snapshot
    pub fn validate(&self) -> Result<FeatureSnapshot, ValidationError> {
        let mut issues = Vec::new();

        let eye = parse_field::<EyeState>(FeatureField::EyeState, &self.eye_state, &mut issues);
        let mouth = parse_field::<MouthShape>(FeatureField::MouthShape, &self.mouth_shape, &mut issues);
        let brow = parse_field::<EyebrowPosition>(
            FeatureField::EyebrowPosition,
            &self.eyebrow_position,
            &mut issues,
        );

        match (eye, mouth, brow) {
            (Some(eye), Some(mouth), Some(brow)) => Ok(FeatureSnapshot::new(eye, mouth, brow)),
            _ => Err(ValidationError::new(issues)),
        }
    }
}

impl TryFrom<RawFeatureSnapshot> for FeatureSnapshot {
    type Error = ValidationError;

    fn try_from(raw: RawFeatureSnapshot) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

impl From<FeatureSnapshot> for RawFeatureSnapshot {
    fn from(snapshot: FeatureSnapshot) -> Self {
        Self::from_text(
            Some(snapshot.eye_state.as_str()),
            Some(snapshot.mouth_shape.as_str()),
            Some(snapshot.eyebrow_position.as_str()),
        )
    }
}

/// null and blank strings count as missing; non-string values are out of domain
fn parse_field<T>(field: FeatureField, value: &Option<Value>, issues: &mut Vec<FieldIssue>) -> Option<T>
where
    T: FromStr<Err = ValidationError>,
{
    match value {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::Missing { field });
            None
        }
        Some(Value::String(v)) if v.trim().is_empty() => {
            issues.push(FieldIssue::Missing { field });
            None
        }
        Some(Value::String(v)) => match v.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                issues.extend(err.issues);
                None
            }
        },
        Some(other) => {
            issues.push(FieldIssue::OutOfDomain {
                field,
                value: other.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("OPEN".parse::<EyeState>().unwrap(), EyeState::Open);
        assert_eq!(" frown ".parse::<MouthShape>().unwrap(), MouthShape::Frown);
        assert_eq!("Furrowed".parse::<EyebrowPosition>().unwrap(), EyebrowPosition::Furrowed);
    }

    #[test]
    fn test_all_snapshots_distinct() {
        let all: Vec<_> = FeatureSnapshot::all().collect();
        assert_eq!(all.len(), 27);
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 27);
    }

    #[test]
    fn test_validate_collects_every_field() {
        let raw = RawFeatureSnapshot::from_text(Some("squint"), None, Some("normal"));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.fields(), vec![FeatureField::EyeState, FeatureField::MouthShape]);
    }

    #[test]
    fn test_blank_value_is_missing() {
        let raw = RawFeatureSnapshot::from_text(Some("open"), Some("smile"), Some("   "));
        let err = raw.validate().unwrap_err();
        assert_eq!(
            err.issues,
            vec![FieldIssue::Missing { field: FeatureField::EyebrowPosition }]
        );
    }

    #[test]
    fn test_default_snapshot() {
        let snap = FeatureSnapshot::default();
        assert_eq!(snap.to_string(), "eyes=open mouth=neutral brows=normal");
    }

    #[test]
    fn test_non_string_values_are_out_of_domain() {
        let raw = RawFeatureSnapshot {
            eye_state: Some(Value::String("open".to_string())),
            mouth_shape: Some(serde_json::json!(["smile"])),
            eyebrow_position: Some(Value::Bool(true)),
        };
        let err = raw.validate().unwrap_err();
        assert_eq!(
            err.issues,
            vec![
                FieldIssue::OutOfDomain {
                    field: FeatureField::MouthShape,
                    value: "[\"smile\"]".to_string(),
                },
                FieldIssue::OutOfDomain {
                    field: FeatureField::EyebrowPosition,
                    value: "true".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_null_is_missing() {
        let raw: RawFeatureSnapshot =
            serde_json::from_str(r#"{"eye_state": null, "mouth_shape": "smile", "eyebrow_position": "normal"}"#)
                .unwrap();
        assert_eq!(raw.validate().unwrap_err().fields(), vec![FeatureField::EyeState]);
    }
}
