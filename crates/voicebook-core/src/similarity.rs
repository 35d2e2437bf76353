//! Fuzzy name matching.
//!
//! Spoken names rarely match a display name byte for byte ("shojib khan" vs
//! "Shojib Khan", "sumi ahmad" vs "Sumi Ahmed"). Names are compared with the
//! Dice coefficient over character bigrams.

use std::collections::HashMap;

/// Minimum score a candidate needs before it counts as a match.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;

/// Search results must score strictly above this.
pub const SEARCH_THRESHOLD: f64 = 0.2;

fn normalize(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns a similarity score in `[0, 1]` for two free-text strings.
///
/// Both strings are lowercased and stripped of whitespace first. Equal
/// strings score 1; otherwise a string shorter than two characters scores 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut first: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *first.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut intersection = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = first.get_mut(&(pair[0], pair[1]))
            && *count > 0
        {
            *count -= 1;
            intersection += 1;
        }
    }

    let total = (a.len() - 1) + (b.len() - 1);
    (2 * intersection) as f64 / total as f64
}

/// A candidate together with its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch<'a, T> {
    pub item: &'a T,
    pub score: f64,
}

/// Picks the candidate whose key is most similar to `query`.
///
/// Returns `None` when no candidate reaches [`SIMILARITY_THRESHOLD`]. Ties go
/// to the earliest candidate.
pub fn best_match<'a, T, F>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a T>,
    key: F,
) -> Option<ScoredMatch<'a, T>>
where
    T: 'a,
    F: Fn(&T) -> &str,
{
    let mut best: Option<ScoredMatch<'a, T>> = None;
    for item in candidates {
        let score = similarity(key(item), query);
        if score < SIMILARITY_THRESHOLD {
            continue;
        }
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(ScoredMatch { item, score });
        }
    }
    best
}

/// Ranks every candidate scoring above [`SEARCH_THRESHOLD`], best first.
///
/// Looser than [`best_match`]: a search for "rohan" should still list
/// "Rohan Mahmud".
pub fn ranked_matches<'a, T, F>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a T>,
    key: F,
) -> Vec<ScoredMatch<'a, T>>
where
    T: 'a,
    F: Fn(&T) -> &str,
{
    let mut matches: Vec<ScoredMatch<'a, T>> = candidates
        .into_iter()
        .map(|item| ScoredMatch {
            item,
            score: similarity(key(item), query),
        })
        .filter(|m| m.score > SEARCH_THRESHOLD)
        .collect();
    // Stable sort keeps roster order among equal scores
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: [&str; 4] = ["Sumi Ahmed", "Shojib Khan", "Sharmin Chowdhury", "Rohan Mahmud"];

    #[test]
    fn test_identical_strings_score_one() {
        for s in ["", "a", "Shojib Khan", "শজীব", "  x y  "] {
            assert_eq!(similarity(s, s), 1.0, "{s:?}");
        }
    }

    #[test]
    fn test_normalization_ignores_case_and_whitespace() {
        assert_eq!(similarity("Shojib Khan", "shojibkhan"), 1.0);
        assert_eq!(similarity(" SUMI  ahmed", "sumi ahmed "), 1.0);
    }

    #[test]
    fn test_short_strings_score_zero() {
        assert_eq!(similarity("a", "ab"), 0.0);
        assert_eq!(similarity("ab", "b"), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity(" a ", "a b"), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("night", "nacht"),
            ("Sumi Ahmed", "sumi ahmad"),
            ("aaaa", "aa"),
            ("Shojib", "Shojib Khan"),
            ("abc", "xyz"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "{a:?} / {b:?}");
        }
    }

    #[test]
    fn test_dice_coefficient_value() {
        // ni ig gh ht vs na ac ch ht: one shared bigram out of 8
        assert!((similarity("night", "nacht") - 0.25).abs() < 1e-9);
        // aa aa aa vs aa: multiset intersection is 1
        assert!((similarity("aaaa", "aa") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        for a in ROSTER {
            for b in ["sumi", "khan", "rohan mahmud", "x"] {
                let score = similarity(a, b);
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_best_match_above_threshold() {
        let found = best_match("sumi ahmad", ROSTER.iter(), |s| *s).unwrap();
        assert_eq!(*found.item, "Sumi Ahmed");
        assert!(found.score >= SIMILARITY_THRESHOLD);
    }

    #[test]
    fn test_best_match_rejects_weak_candidates() {
        assert!(best_match("tanvir", ROSTER.iter(), |s| *s).is_none());
        assert!(best_match("", ROSTER.iter(), |s| *s).is_none());
    }

    #[test]
    fn test_ranked_matches_sorted_best_first() {
        let roster = ["Rohan Mahmud", "Rohan Mahmood", "Sumi Ahmed"];
        let ranked = ranked_matches("rohan mahmud", roster.iter(), |s| *s);
        let names: Vec<&str> = ranked.iter().map(|m| *m.item).collect();
        assert_eq!(names, ["Rohan Mahmud", "Rohan Mahmood", "Sumi Ahmed"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ranked_matches_keep_partial_names() {
        // "rohan" vs "rohanmahmud" is below the resolution threshold
        assert!(best_match("rohan", ROSTER.iter(), |s| *s).is_none());

        let ranked = ranked_matches("rohan", ROSTER.iter(), |s| *s);
        assert_eq!(*ranked[0].item, "Rohan Mahmud");
        assert!(ranked.iter().all(|m| m.score > SEARCH_THRESHOLD));
        assert!(!ranked.iter().any(|m| *m.item == "Sumi Ahmed"));
    }
}
