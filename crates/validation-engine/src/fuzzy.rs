//! Fuzzy target scoring over fixed-length windows of document text
//!
//! Each target is compared against every window of the document that has the
//! same number of characters as the target. The best Jaro-Winkler score,
//! scaled to 0-100 and truncated, is the target's score.
//!
//! Cost is `O(targets × text × target)` character comparisons. The document
//! is decoded to characters once and windows are borrowed slices, so nothing
//! is allocated per window.

use crate::similarity::{jaro_winkler_chars, MatchScratch};

/// Score returned when the document is shorter than the target and no window
/// could be compared
pub const NO_WINDOW: i32 = -1;

/// Document text decoded once into Unicode scalar values for window scanning.
#[derive(Debug, Clone)]
pub struct CharText {
    chars: Vec<char>,
}

impl CharText {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    /// Every window of `width` characters, from offset 0 upwards.
    pub fn windows(&self, width: usize) -> impl Iterator<Item = &[char]> {
        let count = (self.chars.len() + 1).saturating_sub(width);
        (0..count).map(move |start| &self.chars[start..start + width])
    }

    /// Best score for `target` against this text; [`NO_WINDOW`] if the text is
    /// shorter than the target.
    pub fn best_score(&self, target: &str) -> i32 {
        let target: Vec<char> = target.chars().collect();
        if target.len() > self.len() {
            return NO_WINDOW;
        }
        let mut scratch = MatchScratch::with_capacity(target.len());

        let mut best = f64::from(NO_WINDOW);
        // At least one window exists past the length check
        for window in self.windows(target.len()) {
            let current = jaro_winkler_chars(&target, window, &mut scratch) * 100.0;
            if current > best {
                best = current;
            }
        }

        // Truncation, not rounding
        best as i32
    }
}

/// Best score for a single target; see [`CharText::best_score`].
pub fn best_score(text: &str, target: &str) -> i32 {
    CharText::new(text).best_score(target)
}

/// Scores for every target, in order.
pub fn best_scores(text: &str, targets: &[String]) -> Vec<i32> {
    let text = CharText::new(text);
    targets
        .iter()
        .map(|target| text.best_score(target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_substring_scores_100() {
        assert_eq!(best_score("the cat sat", "cat"), 100);
    }

    #[test]
    fn test_short_document_returns_sentinel() {
        assert_eq!(best_score("ab", "abcdef"), NO_WINDOW);
        assert_eq!(best_score("", "x"), NO_WINDOW);
    }

    #[test]
    fn test_window_equal_to_document_is_scanned() {
        assert_eq!(best_score("ab", "ab"), 100);
    }

    #[test]
    fn test_near_miss_is_truncated_score() {
        assert_eq!(best_score("hello wrld", "world"), 86);
        assert_eq!(best_score("invoice nmber 42", "number"), 90);
        assert_eq!(best_score("Tota1 Amoumt", "Total Amount"), 93);
    }

    #[test]
    fn test_window_comparison_ignores_ascii_case_for_exact_hits() {
        assert_eq!(best_score("PAYMENT TERMS: net 30", "payment terms"), 100);
    }

    #[test]
    fn test_no_common_characters_scores_zero() {
        assert_eq!(best_score("xyz", "q"), 0);
    }

    #[test]
    fn test_empty_target_matches_any_document() {
        assert_eq!(best_score("abc", ""), 100);
        assert_eq!(best_score("", ""), 100);
    }

    #[test]
    fn test_windows_are_codepoint_based() {
        assert_eq!(best_score("señor", "nor"), 77);
        assert_eq!(best_score("señor", "ñor"), 100);
        // Four characters even though "ñ" is two bytes in UTF-8
        assert_eq!(best_score("ñaño", "abcde"), NO_WINDOW);
    }

    #[test]
    fn test_target_one_character_longer_than_text() {
        let text = CharText::new("invoice");
        assert_eq!(text.best_score("invoices"), NO_WINDOW);
        assert_eq!(text.best_score("invoice"), 100);
    }

    #[test]
    fn test_window_count() {
        let text = CharText::new("abcde");
        assert_eq!(text.windows(2).count(), 4);
        assert_eq!(text.windows(5).count(), 1);
        assert_eq!(text.windows(6).count(), 0);
        assert_eq!(text.windows(0).count(), 6);
    }

    #[test]
    fn test_best_scores_keep_target_order() {
        let targets = vec!["cat".to_string(), "elephant".to_string(), "sat".to_string()];
        assert_eq!(best_scores("the cat sat", &targets), vec![100, 58, 100]);
    }

    proptest! {
        #[test]
        fn score_is_sentinel_or_percentage(text in "\\PC{0,24}", target in "\\PC{0,8}") {
            let score = best_score(&text, &target);
            if text.chars().count() < target.chars().count() {
                prop_assert_eq!(score, NO_WINDOW);
            } else {
                prop_assert!((0..=100).contains(&score), "score {} out of range", score);
            }
        }

        #[test]
        fn embedded_target_scores_100(
            prefix in "[a-z ]{0,10}",
            target in "[a-z]{1,8}",
            suffix in "[a-z ]{0,10}",
        ) {
            let text = format!("{}{}{}", prefix, target, suffix);
            prop_assert_eq!(best_score(&text, &target), 100);
        }
    }
}
