// Combines required-group flags and target scores into one report
use shared_types::ValidationReport;

use crate::required::all_present;

/// Build the report for one document.
pub fn aggregate(required_flags: Vec<bool>, match_scores: Vec<i32>) -> ValidationReport {
    let required = all_present(&required_flags);
    let average_score = average_score(&match_scores);
    ValidationReport {
        required_flags,
        required,
        match_scores,
        average_score,
    }
}

/// Mean of `scores` truncated toward zero; `0` when there are no scores.
///
/// Sentinel `-1` scores are averaged like any other value.
pub fn average_score(scores: &[i32]) -> i32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: i64 = scores.iter().map(|&score| i64::from(score)).sum();
    // Bounded by the min and max score, so it fits back into i32
    (sum / scores.len() as i64) as i32
}
