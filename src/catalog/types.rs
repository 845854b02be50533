use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while loading or validating a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but its contents are inconsistent
    /// (duplicate ids, dangling topic references).
    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("Catalog file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Topics
// ============================================================================

/// Symbolic icon tag for a topic, rendered as a single glyph in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicIcon {
    GridFour,
    Info,
    Certificate,
    Wrench,
    Ruler,
    NumberTwo,
    Heart,
    Toolbox,
    ArrowRight,
    BookOpen,
}

impl TopicIcon {
    /// Glyph used when the sidebar is collapsed down to icons.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::GridFour => "▦",
            Self::Info => "ℹ",
            Self::Certificate => "✪",
            Self::Wrench => "⚒",
            Self::Ruler => "📏",
            Self::NumberTwo => "②",
            Self::Heart => "♥",
            Self::Toolbox => "⚙",
            Self::ArrowRight => "➜",
            Self::BookOpen => "📖",
        }
    }
}

/// Long-form description shown in the detail view for a single topic.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicDetail {
    pub title: String,
    pub brief: String,
    /// Opaque reference to the topic's embedded tutorial video.
    pub video_ref: String,
    pub overview: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub usage: String,
}

/// A documentation topic ("panel") listed in the sidebar.
#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub icon: TopicIcon,
    pub description: String,
    pub detail: TopicDetail,
    /// Number of catalog videos tagged with this topic. Filled in at load.
    #[serde(skip)]
    pub video_count: usize,
}

// ============================================================================
// Roadmap
// ============================================================================

/// Development status of a planned feature.
///
/// The set is closed: unknown status strings fail catalog parsing instead of
/// reaching the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoadmapStatus {
    Planned,
    InDevelopment,
    Testing,
}

impl RoadmapStatus {
    /// Badge label: `in-development` → `IN DEVELOPMENT`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::InDevelopment => "IN DEVELOPMENT",
            Self::Testing => "TESTING",
        }
    }

    /// Theme role used to color the status badge.
    pub fn style_role(self) -> &'static str {
        match self {
            Self::Planned => "roadmap_planned",
            Self::InDevelopment => "roadmap_in_development",
            Self::Testing => "roadmap_testing",
        }
    }
}

/// A planned feature listed on the roadmap topic.
#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub status: RoadmapStatus,
    pub estimated_release: String,
}

// ============================================================================
// Videos
// ============================================================================

/// Metadata for one tutorial video. Playback is handled outside the app.
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    pub video_ref: String,
    pub topic_id: String,
    pub tool: String,
    pub duration: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_replace_dash() {
        assert_eq!(RoadmapStatus::Planned.label(), "PLANNED");
        assert_eq!(RoadmapStatus::InDevelopment.label(), "IN DEVELOPMENT");
        assert_eq!(RoadmapStatus::Testing.label(), "TESTING");
    }

    #[test]
    fn status_roles_are_distinct() {
        let roles = [
            RoadmapStatus::Planned.style_role(),
            RoadmapStatus::InDevelopment.style_role(),
            RoadmapStatus::Testing.style_role(),
        ];
        assert_ne!(roles[0], roles[1]);
        assert_ne!(roles[1], roles[2]);
        assert_ne!(roles[0], roles[2]);
    }

    #[test]
    fn unknown_status_is_rejected() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[allow(dead_code)]
            status: RoadmapStatus,
        }
        let result: Result<Wrapper, _> = toml::from_str("status = \"shipped\"");
        assert!(result.is_err());
    }
}
