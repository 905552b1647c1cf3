//! Jaro-Winkler similarity between two short strings
//!
//! Strings are compared as sequences of Unicode scalar values. Case folding is
//! ASCII-only and applies to the exact-equality shortcut and the Winkler
//! prefix; characters inside the Jaro match window are compared as-is.

/// Jaro score above which the common-prefix boost is applied
pub const WINKLER_THRESHOLD: f64 = 0.7;

/// Scaling factor applied per shared prefix character
pub const PREFIX_SCALE: f64 = 0.1;

/// Longest prefix that contributes to the boost
pub const MAX_PREFIX: usize = 4;

/// Per-call match-tracking buffers.
///
/// A scanner that compares one target against many windows keeps a single
/// `MatchScratch` for the whole scan instead of allocating two flag vectors
/// per comparison. Never share one across threads or requests.
#[derive(Debug, Default)]
pub struct MatchScratch {
    a_matched: Vec<bool>,
    b_matched: Vec<bool>,
}

impl MatchScratch {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            a_matched: Vec::with_capacity(len),
            b_matched: Vec::with_capacity(len),
        }
    }

    fn reset(&mut self, a_len: usize, b_len: usize) {
        self.a_matched.clear();
        self.a_matched.resize(a_len, false);
        self.b_matched.clear();
        self.b_matched.resize(b_len, false);
    }
}

/// Jaro-Winkler similarity in `[0, 1]`.
///
/// ```
/// use validation_engine::similarity::jaro_winkler;
///
/// assert_eq!(jaro_winkler("Invoice", "INVOICE"), 1.0);
/// assert_eq!(jaro_winkler("", "x"), 0.0);
/// assert!(jaro_winkler("MARTHA", "MARHTA") > 0.96);
/// ```
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    jaro_winkler_chars(&a, &b, &mut MatchScratch::with_capacity(a.len().max(b.len())))
}

/// Slice form of [`jaro_winkler`] that reuses caller-owned scratch buffers.
pub fn jaro_winkler_chars(a: &[char], b: &[char], scratch: &mut MatchScratch) -> f64 {
    // Also covers two empty strings.
    if eq_ignore_ascii_case(a, b) {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let jaro = jaro_chars(a, b, scratch);
    if jaro > WINKLER_THRESHOLD {
        let prefix = common_prefix_len(a, b) as f64;
        jaro + prefix * PREFIX_SCALE * (1.0 - jaro)
    } else {
        jaro
    }
}

/// Plain Jaro similarity for two non-empty sequences.
fn jaro_chars(a: &[char], b: &[char], scratch: &mut MatchScratch) -> f64 {
    // Clamped: strings of length 1-2 would otherwise give a negative window.
    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    scratch.reset(a.len(), b.len());

    let mut matches = 0usize;
    for (i, ca) in a.iter().enumerate() {
        let low = i.saturating_sub(window);
        let high = (i + window + 1).min(b.len());
        for j in low..high {
            if scratch.b_matched[j] || b[j] != *ca {
                continue;
            }
            scratch.a_matched[i] = true;
            scratch.b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched characters of `a` and `b` are walked in order; every pair that
    // disagrees is half a transposition.
    let mut unordered = 0usize;
    let mut k = 0usize;
    for (i, ca) in a.iter().enumerate() {
        if !scratch.a_matched[i] {
            continue;
        }
        while !scratch.b_matched[k] {
            k += 1;
        }
        if *ca != b[k] {
            unordered += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let transpositions = unordered as f64 / 2.0;
    (m / a.len() as f64 + m / b.len() as f64 + (m - transpositions) / m) / 3.0
}

fn eq_ignore_ascii_case(a: &[char], b: &[char]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignore_ascii_case(y))
}

fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter()
        .zip(b)
        .take(MAX_PREFIX)
        .take_while(|(x, y)| x.eq_ignore_ascii_case(*y))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(jaro_winkler("contract", "contract"), 1.0);
    }

    #[test]
    fn test_equality_is_case_insensitive() {
        assert_eq!(jaro_winkler("Total Due", "tOTAL dUE"), 1.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(jaro_winkler("", "x"), 0.0);
        assert_eq!(jaro_winkler("x", ""), 0.0);
        assert_eq!(jaro_winkler("", ""), 1.0);
    }

    #[test]
    fn test_classic_pairs() {
        assert!(approx(jaro_winkler("MARTHA", "MARHTA"), 0.961_111_111_111_111_1));
        assert!(approx(jaro_winkler("DWAYNE", "DUANE"), 0.84));
        assert!(approx(jaro_winkler("DIXON", "DICKSONX"), 0.813_333_333_333_333_2));
    }

    #[test]
    fn test_no_common_prefix_means_no_boost() {
        // jaro = 0.7333... clears the threshold but 'C' != 'T'
        assert!(approx(jaro_winkler("CRATE", "TRACE"), 0.733_333_333_333_333_4));
    }

    #[test]
    fn test_below_threshold_ignores_prefix() {
        // jaro = 0.6666..., shared "a" prefix must not lift it
        assert!(approx(jaro_winkler("abcd", "adxc"), 0.666_666_666_666_666_6));
    }

    #[test]
    fn test_single_characters_use_zero_window() {
        assert_eq!(jaro_winkler("a", "b"), 0.0);
        assert_eq!(jaro_winkler("ab", "ba"), 0.0);
    }

    #[test]
    fn test_window_matching_is_case_sensitive() {
        // Only the equality shortcut folds case; 'A' and 'a' never match in the window
        assert_eq!(jaro_winkler("Ab", "aB"), 1.0);
        assert_eq!(jaro_winkler("Abc", "aBd"), 0.0);
    }

    #[test]
    fn test_non_ascii_counts_codepoints() {
        // "é" is one character, so these are equal-length strings differing in one place
        let score = jaro_winkler("café", "cafe");
        assert!(score > 0.85 && score < 1.0);
        assert_eq!(jaro_winkler("niño", "niño"), 1.0);
    }

    #[test]
    fn test_prefix_boost_capped_at_four() {
        let mut scratch = MatchScratch::default();
        let a: Vec<char> = "abcdefgh".chars().collect();
        let b: Vec<char> = "abcdefgx".chars().collect();
        let boosted = jaro_winkler_chars(&a, &b, &mut scratch);
        let jaro = jaro_chars(&a, &b, &mut scratch);
        assert!(approx(boosted, jaro + 4.0 * 0.1 * (1.0 - jaro)));
    }

    #[test]
    fn test_scratch_reuse_does_not_leak_between_calls() {
        let mut scratch = MatchScratch::default();
        let long: Vec<char> = "abcdefghij".chars().collect();
        let short_a: Vec<char> = "abc".chars().collect();
        let short_b: Vec<char> = "abd".chars().collect();
        let _ = jaro_winkler_chars(&long, &long[1..], &mut scratch);
        let reused = jaro_winkler_chars(&short_a, &short_b, &mut scratch);
        assert_eq!(reused, jaro_winkler("abc", "abd"));
    }

    proptest! {
        #[test]
        fn similarity_is_symmetric(a in "[abc]{0,8}", b in "[abc]{0,8}") {
            prop_assert_eq!(jaro_winkler(&a, &b), jaro_winkler(&b, &a));
        }

        #[test]
        fn similarity_is_bounded(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let score = jaro_winkler(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }

        #[test]
        fn string_matches_itself(s in "\\PC{1,16}") {
            prop_assert_eq!(jaro_winkler(&s, &s), 1.0);
        }
    }
}
