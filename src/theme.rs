//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Lowercase name as stored in preferences.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Navigation panel --
    pub sidebar_normal: Style,
    pub sidebar_selected: Style,
    pub sidebar_description: Style,
    pub resize_handle: Style,
    pub resize_handle_active: Style,

    // -- Detail view --
    pub detail_heading: Style,
    pub detail_body: Style,
    pub detail_muted: Style,
    pub detail_bullet: Style,
    pub not_found: Style,

    // -- Tutorials --
    pub video_title: Style,
    pub video_selected: Style,
    pub video_watched: Style,
    pub video_meta: Style,
    pub modal_step: Style,
    pub modal_step_current: Style,
    pub badge_completed: Style,

    // -- Roadmap badges --
    pub roadmap_planned: Style,
    pub roadmap_in_development: Style,
    pub roadmap_testing: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub search_input: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            sidebar_normal: Style::default(),
            sidebar_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            sidebar_description: Style::default().fg(Color::Gray),
            resize_handle: Style::default().fg(Color::DarkGray),
            resize_handle_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            detail_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default(),
            detail_muted: Style::default().fg(Color::DarkGray),
            detail_bullet: Style::default().fg(Color::Cyan),
            not_found: Style::default().fg(Color::Red),

            video_title: Style::default().add_modifier(Modifier::BOLD),
            video_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            video_watched: Style::default().fg(Color::Gray),
            video_meta: Style::default().fg(Color::DarkGray),
            modal_step: Style::default(),
            modal_step_current: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            badge_completed: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),

            roadmap_planned: Style::default().fg(Color::Blue),
            roadmap_in_development: Style::default().fg(Color::Yellow),
            roadmap_testing: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            search_input: Style::default().fg(Color::Yellow),
        }
    }

    /// Light palette, adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            sidebar_normal: Style::default().fg(Color::Black),
            sidebar_selected: Style::default().bg(Color::Blue).fg(Color::White),
            sidebar_description: Style::default().fg(Color::DarkGray),
            resize_handle: Style::default().fg(Color::Gray),
            resize_handle_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            detail_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_muted: Style::default().fg(Color::DarkGray),
            detail_bullet: Style::default().fg(Color::Blue),
            not_found: Style::default().fg(Color::Red),

            video_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            video_selected: Style::default().bg(Color::Blue).fg(Color::White),
            video_watched: Style::default().fg(Color::DarkGray),
            video_meta: Style::default().fg(Color::DarkGray),
            modal_step: Style::default().fg(Color::Black),
            modal_step_current: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            badge_completed: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),

            roadmap_planned: Style::default().fg(Color::Blue),
            roadmap_in_development: Style::default().fg(Color::Magenta),
            roadmap_testing: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            search_input: Style::default().fg(Color::Magenta),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"detail_heading"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 24] = [
    "sidebar_normal",
    "sidebar_selected",
    "sidebar_description",
    "resize_handle",
    "resize_handle_active",
    "detail_heading",
    "detail_body",
    "detail_muted",
    "detail_bullet",
    "not_found",
    "video_title",
    "video_selected",
    "video_watched",
    "video_meta",
    "modal_step",
    "modal_step_current",
    "badge_completed",
    "roadmap_planned",
    "roadmap_in_development",
    "roadmap_testing",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "search_input",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 24] = [
            p.sidebar_normal,
            p.sidebar_selected,
            p.sidebar_description,
            p.resize_handle,
            p.resize_handle_active,
            p.detail_heading,
            p.detail_body,
            p.detail_muted,
            p.detail_bullet,
            p.not_found,
            p.video_title,
            p.video_selected,
            p.video_watched,
            p.video_meta,
            p.modal_step,
            p.modal_step_current,
            p.badge_completed,
            p.roadmap_planned,
            p.roadmap_in_development,
            p.roadmap_testing,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.search_input,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
