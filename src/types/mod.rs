//! Core types for EmoLens

mod emotion;
mod error;
mod features;
mod reason;
mod result;

pub use emotion::EmotionCategory;
pub use error::{FieldIssue, ValidationError};
pub use features::{EyeState, EyebrowPosition, FeatureField, FeatureSnapshot, MouthShape, RawFeatureSnapshot};
pub use reason::ReasonCode;
pub use result::{ClassificationResult, EmotionScore};
