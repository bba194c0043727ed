//! Core modules for EmoLens

pub mod api;
pub mod classifier;
pub mod clock;
pub mod history;
pub mod report;
pub mod rules;

pub use api::{create_router, run_server, ApiConfig, ApiError};
pub use classifier::{classify, classify_raw, raw_scores, score, EmotionClassifier};
pub use clock::{Clock, FixedClock, SystemClock};
pub use history::{EmotionHistory, HistoryPoint};
pub use report::{format_report, report_file_name};
pub use rules::{Condition, Rule, RULES};
