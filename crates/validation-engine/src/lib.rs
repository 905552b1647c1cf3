pub mod aggregate;
pub mod fuzzy;
pub mod required;
pub mod similarity;

pub use fuzzy::NO_WINDOW;
pub use shared_types::ValidationReport;

use tracing::debug;

/// ValidationEngine entry point
///
/// Stateless; every call works on its own scratch buffers, so one engine can
/// serve concurrent requests.
pub struct ValidationEngine;

impl ValidationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Check required groups and score validate targets against `text`.
    pub fn validate(
        &self,
        text: &str,
        required_groups: &[Vec<String>],
        validate_targets: &[String],
    ) -> ValidationReport {
        let required_flags = required::check(text, required_groups);
        let match_scores = fuzzy::best_scores(text, validate_targets);
        let report = aggregate::aggregate(required_flags, match_scores);

        debug!(
            text_chars = text.chars().count(),
            groups = required_groups.len(),
            targets = validate_targets.len(),
            required = report.required,
            average = report.average_score,
            "Validated document text"
        );

        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
