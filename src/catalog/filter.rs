//! Topic/query filtering and linear previous/next navigation over the
//! catalog's video order.

use super::{Catalog, Video, ALL_TOPICS};

/// Whether `video` matches an already lower-cased, non-empty query.
fn matches_query(video: &Video, query_lower: &str) -> bool {
    video.title.to_lowercase().contains(query_lower)
        || video.description.to_lowercase().contains(query_lower)
        || video.tool.to_lowercase().contains(query_lower)
        || video.topic_id.to_lowercase().contains(query_lower)
}

impl Catalog {
    /// Videos in catalog order that belong to `topic_id` (or any topic for
    /// `all`) and contain `query` case-insensitively in their title,
    /// description, tool or topic id.
    ///
    /// A query that is empty after trimming matches everything. Otherwise the
    /// query is matched as typed, surrounding whitespace included. An empty
    /// result is a valid outcome, not an error.
    pub fn filter<'a>(&'a self, topic_id: &str, query: &str) -> Vec<&'a Video> {
        let match_all = query.trim().is_empty();
        let query_lower = query.to_lowercase();

        self.videos
            .iter()
            .filter(|v| topic_id == ALL_TOPICS || v.topic_id == topic_id)
            .filter(|v| match_all || matches_query(v, &query_lower))
            .collect()
    }

    /// Index of a video in catalog order.
    pub fn position(&self, video_id: &str) -> Option<usize> {
        self.videos.iter().position(|v| v.id == video_id)
    }

    /// The video before `video_id` in catalog order, if any.
    pub fn previous(&self, video_id: &str) -> Option<&Video> {
        let index = self.position(video_id)?;
        index.checked_sub(1).and_then(|i| self.videos.get(i))
    }

    /// The video after `video_id` in catalog order, if any.
    pub fn next(&self, video_id: &str) -> Option<&Video> {
        let index = self.position(video_id)?;
        self.videos.get(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::abc_catalog;
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(videos: &[&Video]) -> Vec<String> {
        videos.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn all_with_empty_query_returns_everything_in_order() {
        let catalog = abc_catalog();
        assert_eq!(ids(&catalog.filter(ALL_TOPICS, "")), vec!["1", "2", "3"]);
    }

    #[test]
    fn topic_filter_keeps_order() {
        let catalog = abc_catalog();
        assert_eq!(ids(&catalog.filter("a", "")), vec!["1", "3"]);
        assert_eq!(ids(&catalog.filter("b", "")), vec!["2"]);
    }

    #[test]
    fn query_is_case_insensitive() {
        let catalog = abc_catalog();
        assert_eq!(ids(&catalog.filter(ALL_TOPICS, "bRAVO")), vec!["2"]);
    }

    #[test]
    fn query_matches_tool_and_topic_id() {
        let catalog = abc_catalog();
        // Every tool is "<Title> Tool"
        assert_eq!(ids(&catalog.filter(ALL_TOPICS, "charlie tool")), vec!["3"]);

        // "model-health" with the dash only occurs in the topic id
        let builtin = Catalog::builtin().unwrap();
        assert_eq!(ids(&builtin.filter(ALL_TOPICS, "MODEL-HEALTH")), vec!["6"]);
    }

    #[test]
    fn whitespace_query_matches_everything() {
        let catalog = abc_catalog();
        assert_eq!(catalog.filter(ALL_TOPICS, "   ").len(), 3);
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_query() {
        let catalog = abc_catalog();
        assert!(catalog.filter(ALL_TOPICS, " alpha").is_empty());
        assert!(catalog.filter(ALL_TOPICS, "bravo ").is_empty());
        // Inner spaces still match: every tool is "<Title> Tool"
        assert_eq!(ids(&catalog.filter(ALL_TOPICS, "alpha tool")), vec!["1"]);
    }

    #[test]
    fn unknown_topic_yields_empty() {
        let catalog = abc_catalog();
        assert!(catalog.filter("nope", "").is_empty());
    }

    #[test]
    fn no_match_yields_empty() {
        let catalog = abc_catalog();
        assert!(catalog.filter(ALL_TOPICS, "zzzz").is_empty());
    }

    #[test]
    fn neighbors_in_the_middle() {
        let catalog = abc_catalog();
        assert_eq!(catalog.previous("2").map(|v| v.id.as_str()), Some("1"));
        assert_eq!(catalog.next("2").map(|v| v.id.as_str()), Some("3"));
    }

    #[test]
    fn neighbors_at_the_edges() {
        let catalog = abc_catalog();
        assert!(catalog.previous("1").is_none());
        assert!(catalog.next("3").is_none());
    }

    #[test]
    fn neighbors_of_unknown_id() {
        let catalog = abc_catalog();
        assert!(catalog.previous("404").is_none());
        assert!(catalog.next("404").is_none());
        assert!(catalog.position("404").is_none());
    }
}
