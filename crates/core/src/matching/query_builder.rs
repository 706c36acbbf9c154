//! Search query expansion.
//!
//! The remote search has no fuzzy or structured matching, so a title is
//! expanded into separator variants and season probes up front.

/// Fixed hints appended to movie queries.
const MOVIE_EXTRAS: &[&str] = &["cz", "1080p", "720p"];

/// Builds the ordered, de-duplicated list of queries for a title.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    /// Seasons 1..=N are probed for series.
    default_seasons: u32,
}

impl QueryBuilder {
    pub fn new(default_seasons: u32) -> Self {
        Self { default_seasons }
    }

    /// Queries for a series: every separator variant, each followed by its
    /// season probes.
    pub fn series_queries(&self, title: &str) -> Vec<String> {
        let seasons: Vec<u32> = (1..=self.default_seasons).collect();
        build_queries(title, &seasons, &[])
    }

    /// Queries for a movie: the title, the title with each fixed hint, then
    /// the dot and dash rewrites.
    pub fn movie_queries(&self, title: &str) -> Vec<String> {
        let title = title.trim();
        if title.is_empty() {
            return Vec::new();
        }

        let mut queries = vec![title.to_string()];
        queries.extend(MOVIE_EXTRAS.iter().map(|extra| format!("{} {}", title, extra)));
        if title.contains(' ') {
            queries.push(title.replace(' ', "."));
            queries.push(title.replace(' ', "-"));
        }
        dedup_preserving_order(queries)
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Separator variants of a title: the title itself, then (only when it
/// contains spaces) the dot, dash and underscore rewrites.
fn separator_variants(title: &str) -> Vec<String> {
    let mut variants = vec![title.to_string()];
    if title.contains(' ') {
        variants.extend([".", "-", "_"].iter().map(|sep| title.replace(' ', sep)));
    }
    variants
}

/// Expand a title into search queries.
///
/// For each separator variant: the bare variant, then `<variant> sNN` per
/// season. Then `<title> <extra>` per extra hint. Duplicates are dropped,
/// keeping the first occurrence.
pub fn build_queries(title: &str, seasons: &[u32], extras: &[&str]) -> Vec<String> {
    let title = title.trim();
    if title.is_empty() {
        return Vec::new();
    }

    let mut queries = Vec::new();
    for variant in separator_variants(title) {
        let probes: Vec<String> = seasons
            .iter()
            .map(|season| format!("{} s{:02}", variant, season))
            .collect();
        queries.push(variant);
        queries.extend(probes);
    }

    queries.extend(extras.iter().map(|extra| format!("{} {}", title, extra)));

    dedup_preserving_order(queries)
}

fn dedup_preserving_order(queries: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    queries
        .into_iter()
        .filter(|q| seen.insert(q.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_series() {
        let builder = QueryBuilder::new(3);
        assert_eq!(
            builder.series_queries("Silo"),
            vec!["Silo", "Silo s01", "Silo s02", "Silo s03"]
        );
    }

    #[test]
    fn test_multi_word_series_variants() {
        let queries = build_queries("Breaking Bad", &[1], &[]);
        assert_eq!(
            queries,
            vec![
                "Breaking Bad",
                "Breaking Bad s01",
                "Breaking.Bad",
                "Breaking.Bad s01",
                "Breaking-Bad",
                "Breaking-Bad s01",
                "Breaking_Bad",
                "Breaking_Bad s01",
            ]
        );
    }

    #[test]
    fn test_default_series_probes_five_seasons() {
        let queries = QueryBuilder::default().series_queries("Silo");
        assert_eq!(queries.len(), 6);
        assert_eq!(queries.last().unwrap(), "Silo s05");
    }

    #[test]
    fn test_season_numbers_are_zero_padded() {
        let queries = build_queries("Show", &[7, 12], &[]);
        assert_eq!(queries, vec!["Show", "Show s07", "Show s12"]);
    }

    #[test]
    fn test_extras_use_original_title() {
        let queries = build_queries("Dune Part Two", &[], &["cz"]);
        assert_eq!(queries.first().unwrap(), "Dune Part Two");
        assert_eq!(queries.last().unwrap(), "Dune Part Two cz");
        assert_eq!(queries.len(), 5);
    }

    #[test]
    fn test_deduplicates_preserving_order() {
        let queries = build_queries("Show", &[1, 1], &["s01"]);
        assert_eq!(queries, vec!["Show", "Show s01"]);
    }

    #[test]
    fn test_empty_title() {
        assert!(build_queries("", &[1, 2], &["cz"]).is_empty());
        assert!(build_queries("   ", &[], &[]).is_empty());
        assert!(QueryBuilder::default().movie_queries("").is_empty());
    }

    #[test]
    fn test_movie_queries() {
        let builder = QueryBuilder::default();
        assert_eq!(
            builder.movie_queries("Dune"),
            vec!["Dune", "Dune cz", "Dune 1080p", "Dune 720p"]
        );
        assert_eq!(
            builder.movie_queries("Dune Part Two"),
            vec![
                "Dune Part Two",
                "Dune Part Two cz",
                "Dune Part Two 1080p",
                "Dune Part Two 720p",
                "Dune.Part.Two",
                "Dune-Part-Two",
            ]
        );
    }
}
