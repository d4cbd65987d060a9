//! Fuzzy title resolution.
//!
//! ## Algorithm
//! Ratcliff/Obershelp: find the longest common block of characters, recurse
//! on the pieces to its left and right, and sum the block lengths `M`.
//! The ratio is `2·M / (|a| + |b|)`, 1.0 for identical strings.
//!
//! Titles are compared lowercased; callers get the candidates back unchanged.
//! Two cheap upper bounds (length-only, then character multiset) reject most
//! candidates before the full match runs.

use std::collections::HashMap;

/// Similarity ratio of two strings in [0, 1]
///
/// Example: ratio("aliens", "aliiens") = 12/13
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b).ratio()
}

/// Up to `max_results` candidates with a ratio of at least `cutoff`, best first
///
/// Ties keep candidate order.
pub fn resolve<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    max_results: usize,
    cutoff: f64,
) -> Vec<String> {
    resolve_with_scores(query, candidates, max_results, cutoff)
        .into_iter()
        .map(|(title, _)| title)
        .collect()
}

/// Same as `resolve`, with each candidate's ratio
pub fn resolve_with_scores<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    max_results: usize,
    cutoff: f64,
) -> Vec<(String, f64)> {
    if max_results == 0 {
        return Vec::new();
    }

    let query: Vec<char> = query.to_lowercase().chars().collect();
    let mut matches: Vec<(String, f64)> = candidates
        .iter()
        .filter_map(|candidate| {
            let lowered: Vec<char> = candidate.as_ref().to_lowercase().chars().collect();
            let matcher = SequenceMatcher::new(&lowered, &query);
            if matcher.real_quick_ratio() < cutoff || matcher.quick_ratio() < cutoff {
                return None;
            }
            let score = matcher.ratio();
            (score >= cutoff).then(|| (candidate.as_ref().to_string(), score))
        })
        .collect();

    // Stable: equal ratios stay in candidate order
    matches.sort_by(|x, y| y.1.total_cmp(&x.1));
    matches.truncate(max_results);
    matches
}

/// Matching-block comparison of two character sequences
struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    fn ratio(&self) -> f64 {
        scaled_ratio(self.matching_characters(), self.a.len() + self.b.len())
    }

    /// Upper bound from the character multisets
    fn quick_ratio(&self) -> f64 {
        let mut available: HashMap<char, usize> = HashMap::new();
        for &c in self.b {
            *available.entry(c).or_insert(0) += 1;
        }
        let mut matches = 0;
        for c in self.a {
            if let Some(count) = available.get_mut(c) {
                if *count > 0 {
                    *count -= 1;
                    matches += 1;
                }
            }
        }
        scaled_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound from the lengths alone
    fn real_quick_ratio(&self) -> f64 {
        scaled_ratio(self.a.len().min(self.b.len()), self.a.len() + self.b.len())
    }

    /// Total length of all matching blocks
    fn matching_characters(&self) -> usize {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut total = 0;

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, size) = self.find_longest_match(alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            total += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }
        total
    }

    /// Longest block with `a[i..i+size] == b[j..j+size]` inside the given ranges
    ///
    /// The earliest such block in `a` (then in `b`) wins.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        // j -> length of the match ending at (i - 1, j)
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let previous = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let size = previous + 1;
                    next_j2len.insert(j, size);
                    if size > best_size {
                        best_i = i + 1 - size;
                        best_j = j + 1 - size;
                        best_size = size;
                    }
                }
            }
            j2len = next_j2len;
        }

        (best_i, best_j, best_size)
    }
}

fn scaled_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLES: [&str; 3] = ["Alien", "Aliens", "Predator"];

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("abcd", "abcd"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert!((ratio("aliens", "aliiens") - 12.0 / 13.0).abs() < 1e-12);
        assert!((ratio("alien", "aliiens") - 10.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_matching_blocks_recurse_on_both_sides() {
        // "ab" and "cd" on either side of a mismatch: M = 4
        assert!((ratio("abxcd", "abycd") - 8.0 / 10.0).abs() < 1e-12);
        assert!((ratio("abcd", "abxcd") - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_typo() {
        assert_eq!(resolve("Aliiens", &TITLES, 1, 0.6), vec!["Aliens"]);
        assert_eq!(resolve("aliiens", &TITLES, 3, 0.6), vec!["Aliens", "Alien"]);
    }

    #[test]
    fn test_resolve_ignores_case() {
        let scored = resolve_with_scores("ALIEN", &TITLES, 1, 0.6);
        assert_eq!(scored, vec![("Alien".to_string(), 1.0)]);
    }

    #[test]
    fn test_resolve_no_match() {
        assert!(resolve("Casablanca", &TITLES, 3, 0.6).is_empty());
        assert!(resolve("Alien", &TITLES, 0, 0.0).is_empty());
        assert!(resolve::<&str>("Alien", &[], 3, 0.0).is_empty());
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let candidates = ["abd", "abc", "abe"];
        assert_eq!(resolve("abx", &candidates, 3, 0.5), vec!["abd", "abc", "abe"]);
    }

    #[test]
    fn test_quick_ratios_bound_ratio() {
        let a: Vec<char> = "predator".chars().collect();
        let b: Vec<char> = "aliiens".chars().collect();
        let matcher = SequenceMatcher::new(&a, &b);
        assert!(matcher.real_quick_ratio() >= matcher.quick_ratio());
        assert!(matcher.quick_ratio() >= matcher.ratio());
    }
}
