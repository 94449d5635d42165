//! Word ranking
//!
//! Turns the accumulated word counts of a crawl into the ordered list of its most popular
//! words.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns the `k` most popular words, most popular first
///
/// Words are ordered by:
/// 1. Count, higher first
/// 2. Length, longer first
/// 3. Alphabetical order
///
/// The result has `min(k, counts.len())` entries and depends only on the content of
/// `counts`, never on its iteration order.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use wordtide::crawler::rank_words;
///
/// let counts: HashMap<String, usize> = [("a", 3), ("bb", 3), ("ccc", 3), ("d", 5)]
///     .into_iter()
///     .map(|(w, c)| (w.to_string(), c))
///     .collect();
///
/// let ranked = rank_words(&counts, 3);
/// assert_eq!(
///     ranked,
///     vec![("d".to_string(), 5), ("ccc".to_string(), 3), ("bb".to_string(), 3)]
/// );
/// ```
pub fn rank_words(counts: &HashMap<String, usize>, k: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(&String, &usize)> = counts.iter().collect();
    ranked.sort_unstable_by(|a, b| compare_words(a, b));

    ranked
        .into_iter()
        .take(k)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

/// Total order of `(word, count)` pairs, most popular first
fn compare_words(a: &(&String, &usize), b: &(&String, &usize)) -> Ordering {
    b.1.cmp(a.1)
        .then_with(|| b.0.len().cmp(&a.0.len()))
        .then_with(|| a.0.cmp(b.0))
}
