//! Input validation errors

use serde::{Deserialize, Serialize};

use crate::types::FeatureField;

/// A single problem with one snapshot field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldIssue {
    /// Field absent or blank
    Missing { field: FeatureField },
    /// Field present but not in its domain
    OutOfDomain { field: FeatureField, value: String },
}

impl FieldIssue {
    pub fn field(&self) -> FeatureField {
        match self {
            FieldIssue::Missing { field } => *field,
            FieldIssue::OutOfDomain { field, .. } => *field,
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldIssue::Missing { field } => write!(f, "{} is missing", field),
            FieldIssue::OutOfDomain { field, value } => {
                write!(f, "{} has unknown value '{}'", field, value)
            }
        }
    }
}

/// Snapshot rejected at the boundary. Lists every offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("invalid feature snapshot: {}", describe(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn out_of_domain(field: FeatureField, value: &str) -> Self {
        Self::new(vec![FieldIssue::OutOfDomain {
            field,
            value: value.to_string(),
        }])
    }

    /// Offending fields, in snapshot field order
    pub fn fields(&self) -> Vec<FeatureField> {
        self.issues.iter().map(FieldIssue::field).collect()
    }
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_fields() {
        let err = ValidationError::new(vec![
            FieldIssue::OutOfDomain {
                field: FeatureField::EyeState,
                value: "closed".to_string(),
            },
            FieldIssue::Missing {
                field: FeatureField::MouthShape,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "invalid feature snapshot: eye_state has unknown value 'closed', mouth_shape is missing"
        );
    }
}
