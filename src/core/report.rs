//! Plain-text analysis report
//!
//! Output depends only on the result, so the same result always renders
//! to the same text.

use crate::types::{ClassificationResult, FeatureField};

const BANNER: &str = "═══════════════════════════════════════";
const TITLE: &str = "   AI EMOTION DETECTION — ANALYSIS REPORT";

const DISCLAIMER: [&str; 3] = [
    "This system provides facial emotion insights for educational",
    "and awareness purposes only. It is not intended for",
    "psychological diagnosis or clinical use.",
];

/// Timestamp layout used in reports
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render a result as a report
pub fn format_report(result: &ClassificationResult) -> String {
    let features = &result.features;
    let mut lines: Vec<String> = vec![
        BANNER.to_string(),
        TITLE.to_string(),
        BANNER.to_string(),
        String::new(),
        format!("Timestamp: {}", result.timestamp.format(REPORT_TIME_FORMAT)),
        format!("Detected Emotion: {}", result.detected_emotion.as_str().to_uppercase()),
        format!("Confidence: {}%", result.confidence),
        String::new(),
        "--- Facial Features Detected ---".to_string(),
        format!("  {}: {}", FeatureField::EyeState.label(), features.eye_state),
        format!("  {}: {}", FeatureField::MouthShape.label(), features.mouth_shape),
        format!("  {}: {}", FeatureField::EyebrowPosition.label(), features.eyebrow_position),
        String::new(),
        "--- Emotion Scores ---".to_string(),
    ];

    for score in &result.scores {
        lines.push(format!(
            "  {}: {}%\n    Reasons: {}",
            score.emotion.as_str().to_uppercase(),
            score.score,
            score.reasons.join("; ")
        ));
    }

    lines.push(String::new());
    lines.push("--- Disclaimer ---".to_string());
    lines.extend(DISCLAIMER.iter().map(|l| l.to_string()));
    lines.push(String::new());
    lines.push(BANNER.to_string());

    lines.join("\n")
}

/// Default file name for a saved report
pub fn report_file_name(result: &ClassificationResult) -> String {
    format!(
        "emotion-report-{}.txt",
        result.timestamp.format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EmotionClassifier, FixedClock};
    use crate::types::FeatureSnapshot;
    use chrono::{TimeZone, Utc};

    fn fixed_result() -> ClassificationResult {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        EmotionClassifier::with_clock(clock).classify(FeatureSnapshot::default())
    }

    #[test]
    fn test_banner_frames_report() {
        let report = format_report(&fixed_result());
        assert!(report.starts_with(BANNER));
        assert!(report.ends_with(BANNER));
    }

    #[test]
    fn test_timestamp_line() {
        let report = format_report(&fixed_result());
        assert!(report.contains("Timestamp: 2024-05-01 09:30:00 UTC"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(report_file_name(&fixed_result()), "emotion-report-20240501_093000.txt");
    }
}
