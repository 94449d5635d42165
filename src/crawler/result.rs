use serde::{Serialize, Serializer};

/// Outcome of one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most popular words with their counts, most popular first
    #[serde(serialize_with = "serialize_ranked")]
    pub word_counts: Vec<(String, usize)>,

    /// Number of distinct URLs visited
    pub urls_visited: usize,
}

impl CrawlResult {
    /// Count of `word` in the ranking, if it made the cut
    pub fn count_of(&self, word: &str) -> Option<usize> {
        self.word_counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }
}

/// Serializes the ranking as a JSON object whose keys keep rank order
fn serialize_ranked<S: Serializer>(
    ranked: &[(String, usize)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(ranked.iter().map(|(word, count)| (word, count)))
}
