//! Static documentation content: topics, roadmap and tutorial videos.
//!
//! The catalog is declarative data. A built-in TOML document is compiled into
//! the binary; a user-supplied file with the same shape can replace it at
//! startup. Everything here is immutable after `Catalog::load`.

mod filter;
mod types;

pub use types::{CatalogError, RoadmapItem, RoadmapStatus, Topic, TopicDetail, TopicIcon, Video};

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Synthetic topic id selecting every topic / every video.
pub const ALL_TOPICS: &str = "all";

/// Built-in catalog document.
const BUILTIN_CATALOG: &str = include_str!("content.toml");

/// On-disk shape of a catalog document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    roadmap_topic: Option<String>,
    #[serde(default)]
    topics: Vec<Topic>,
    #[serde(default)]
    roadmap: Vec<RoadmapItem>,
    #[serde(default)]
    videos: Vec<Video>,
}

/// Validated, ordered documentation catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    topics: Vec<Topic>,
    roadmap: Vec<RoadmapItem>,
    roadmap_topic: Option<String>,
    videos: Vec<Video>,
}

impl Catalog {
    /// Maximum catalog file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(CatalogError::TooLarge(format!(
                "Catalog file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            topics = catalog.topics.len(),
            videos = catalog.videos.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = toml::from_str(content)?;
        Self::from_parts(doc.topics, doc.roadmap, doc.roadmap_topic, doc.videos)
    }

    /// Build a catalog from already-constructed records.
    ///
    /// Rejects duplicate topic or video ids, the reserved `all` id as a real
    /// topic, videos tagged with an undefined topic, and a roadmap topic that
    /// is not listed. Recomputes each topic's `video_count`.
    pub fn from_parts(
        mut topics: Vec<Topic>,
        roadmap: Vec<RoadmapItem>,
        roadmap_topic: Option<String>,
        videos: Vec<Video>,
    ) -> Result<Self, CatalogError> {
        let mut topic_ids = HashSet::new();
        for topic in &topics {
            if topic.id == ALL_TOPICS {
                return Err(CatalogError::Invalid(format!(
                    "topic id '{}' is reserved",
                    ALL_TOPICS
                )));
            }
            if !topic_ids.insert(topic.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate topic id '{}'",
                    topic.id
                )));
            }
        }

        let mut video_ids = HashSet::new();
        for video in &videos {
            if !video_ids.insert(video.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate video id '{}'",
                    video.id
                )));
            }
            if video.topic_id != ALL_TOPICS && !topic_ids.contains(video.topic_id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "video '{}' refers to unknown topic '{}'",
                    video.id, video.topic_id
                )));
            }
        }

        if let Some(id) = &roadmap_topic {
            if !topic_ids.contains(id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "roadmap topic '{}' is not a listed topic",
                    id
                )));
            }
        }

        for topic in &mut topics {
            topic.video_count = videos.iter().filter(|v| v.topic_id == topic.id).count();
        }

        Ok(Self {
            topics,
            roadmap,
            roadmap_topic,
            videos,
        })
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn roadmap(&self) -> &[RoadmapItem] {
        &self.roadmap
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Look up a topic by id. The synthetic `all` id is never a topic.
    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// Whether `id` names the topic that renders the roadmap.
    pub fn is_roadmap_topic(&self, id: &str) -> bool {
        self.roadmap_topic.as_deref() == Some(id)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.topics().len(), 8);
        assert_eq!(catalog.videos().len(), 8);
        assert_eq!(catalog.roadmap().len(), 8);
        assert!(catalog.is_roadmap_topic("up-next"));
        assert!(!catalog.is_roadmap_topic("about"));
    }

    #[test]
    fn builtin_video_counts_are_computed() {
        let catalog = Catalog::builtin().unwrap();
        for topic in catalog.topics() {
            assert_eq!(topic.video_count, 1, "topic {}", topic.id);
        }
    }

    #[test]
    fn duplicate_video_id_rejected() {
        let result = Catalog::from_parts(
            vec![topic("a")],
            vec![],
            None,
            vec![video("1", "a", "One"), video("1", "a", "Again")],
        );
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn duplicate_topic_id_rejected() {
        let result = Catalog::from_parts(vec![topic("a"), topic("a")], vec![], None, vec![]);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn reserved_topic_id_rejected() {
        let result = Catalog::from_parts(vec![topic(ALL_TOPICS)], vec![], None, vec![]);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn dangling_topic_reference_rejected() {
        let result = Catalog::from_parts(
            vec![topic("a")],
            vec![],
            None,
            vec![video("1", "missing", "One")],
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unknown topic 'missing'"));
    }

    #[test]
    fn video_tagged_all_is_accepted() {
        let catalog =
            Catalog::from_parts(vec![topic("a")], vec![], None, vec![video("1", "all", "One")])
                .unwrap();
        assert_eq!(catalog.topic("a").unwrap().video_count, 0);
    }

    #[test]
    fn unlisted_roadmap_topic_rejected() {
        let result = Catalog::from_parts(vec![topic("a")], vec![], Some("b".to_string()), vec![]);
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn topic_lookup_never_returns_all() {
        let catalog = abc_catalog();
        assert!(catalog.topic(ALL_TOPICS).is_none());
        assert!(catalog.topic("a").is_some());
        assert!(catalog.topic("zzz").is_none());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Catalog::load(Path::new("/tmp/onedoc_test_nonexistent_catalog.toml"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join("onedoc_catalog_test_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[topics]]
id = "intro"
name = "Intro"
icon = "book-open"
description = "Start here"

[topics.detail]
title = "Introduction"
brief = "Short"
video_ref = "/videos/intro.mp4"
overview = "Long"

[[videos]]
id = "v1"
title = "Welcome"
description = "Hello"
video_ref = "/videos/welcome.mp4"
topic_id = "intro"
tool = "None"
duration = "0:30"
"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.topics().len(), 1);
        assert_eq!(catalog.topic("intro").unwrap().video_count, 1);
        assert!(catalog.roadmap().is_empty());
        assert!(catalog.video("v1").unwrap().steps.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }
}
