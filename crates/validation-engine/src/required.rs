// Required-content checks: each group is a list of alternative substrings

/// One flag per group, `true` when any candidate occurs in `text`.
///
/// Matching is exact and case-sensitive. Candidates are tried in order and
/// the first hit settles the group.
pub fn check(text: &str, groups: &[Vec<String>]) -> Vec<bool> {
    groups
        .iter()
        .map(|group| group_present(text, group))
        .collect()
}

/// Whether a single group of alternatives is satisfied by `text`.
pub fn group_present(text: &str, candidates: &[String]) -> bool {
    candidates
        .iter()
        .any(|candidate| text.contains(candidate.as_str()))
}

/// Logical AND over all flags; vacuously `true` for no groups.
pub fn all_present(flags: &[bool]) -> bool {
    flags.iter().all(|&flag| flag)
}
