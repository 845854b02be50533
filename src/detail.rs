//! Resolution of the detail pane content for a selected topic id.
//!
//! Pure: takes the catalog and a topic id, returns what to draw. Unknown ids
//! resolve to `NotFound`, which is a normal, user-visible state.

use crate::catalog::{Catalog, RoadmapItem, Topic, ALL_TOPICS};

/// Summary card data for the all-topics overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub brief: &'a str,
    pub feature_count: usize,
}

/// Lazy, restartable iterator over topic summaries.
///
/// Cloning yields a fresh iterator positioned where the original was, so a
/// renderer can walk it once for layout and again for drawing.
#[derive(Debug, Clone)]
pub struct TopicSummaries<'a> {
    topics: std::slice::Iter<'a, Topic>,
}

impl<'a> Iterator for TopicSummaries<'a> {
    type Item = TopicSummary<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.topics.next().map(|t| TopicSummary {
            id: &t.id,
            name: &t.detail.title,
            brief: &t.detail.brief,
            feature_count: t.detail.features.len(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.topics.size_hint()
    }
}

impl ExactSizeIterator for TopicSummaries<'_> {}

/// What the detail pane shows for a topic id.
#[derive(Debug, Clone)]
pub enum DetailContent<'a> {
    /// `all`: one summary card per topic.
    Overview(TopicSummaries<'a>),
    /// A regular topic with its description and embedded video reference.
    Topic(&'a Topic),
    /// The roadmap topic: planned features instead of the standard layout.
    Roadmap {
        topic: &'a Topic,
        items: &'a [RoadmapItem],
    },
    /// No topic with this id.
    NotFound(&'a str),
}

impl<'a> DetailContent<'a> {
    pub fn resolve(catalog: &'a Catalog, topic_id: &'a str) -> Self {
        if topic_id == ALL_TOPICS {
            return Self::Overview(TopicSummaries {
                topics: catalog.topics().iter(),
            });
        }

        match catalog.topic(topic_id) {
            Some(topic) if catalog.is_roadmap_topic(topic_id) => Self::Roadmap {
                topic,
                items: catalog.roadmap(),
            },
            Some(topic) => Self::Topic(topic),
            None => Self::NotFound(topic_id),
        }
    }

    /// Video reference embedded in this view, if it has one.
    pub fn video_ref(&self) -> Option<&'a str> {
        match self {
            Self::Topic(topic) | Self::Roadmap { topic, .. } => Some(&topic.detail.video_ref),
            Self::Overview(_) | Self::NotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::abc_catalog;

    #[test]
    fn all_yields_one_summary_per_topic() {
        let catalog = abc_catalog();
        let DetailContent::Overview(summaries) = DetailContent::resolve(&catalog, ALL_TOPICS)
        else {
            panic!("expected overview");
        };
        assert_eq!(summaries.len(), 2);
        let names: Vec<_> = summaries.map(|s| s.id).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn overview_is_restartable() {
        let catalog = abc_catalog();
        let DetailContent::Overview(summaries) = DetailContent::resolve(&catalog, ALL_TOPICS)
        else {
            panic!("expected overview");
        };
        let first: Vec<_> = summaries.clone().collect();
        let second: Vec<_> = summaries.collect();
        assert_eq!(first, second);
        assert_eq!(first[0].feature_count, 2);
    }

    #[test]
    fn known_topic_resolves_with_video() {
        let catalog = abc_catalog();
        let content = DetailContent::resolve(&catalog, "a");
        assert!(matches!(content, DetailContent::Topic(t) if t.id == "a"));
        assert_eq!(content.video_ref(), Some("https://example.com/a"));
    }

    #[test]
    fn unknown_topic_is_not_found() {
        let catalog = abc_catalog();
        let content = DetailContent::resolve(&catalog, "ghost");
        assert!(matches!(content, DetailContent::NotFound("ghost")));
        assert!(content.video_ref().is_none());
    }

    #[test]
    fn roadmap_topic_renders_roadmap() {
        let catalog = Catalog::builtin().unwrap();
        let content = DetailContent::resolve(&catalog, "up-next");
        match content {
            DetailContent::Roadmap { topic, items } => {
                assert_eq!(topic.id, "up-next");
                assert_eq!(items.len(), 8);
            }
            other => panic!("expected roadmap, got {:?}", other),
        }
    }
}
