//! Video detail modal: current video, step cursor, and previous/next
//! navigation over catalog order.
//!
//! Navigating to another video resets the step cursor to the first step.

use crate::catalog::{Catalog, Video};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoModal {
    video_id: String,
    step: usize,
    scroll: u16,
}

impl VideoModal {
    /// Open the modal on `video_id`. Returns `None` for unknown ids.
    pub fn open(catalog: &Catalog, video_id: &str) -> Option<Self> {
        catalog.video(video_id)?;
        Some(Self {
            video_id: video_id.to_string(),
            step: 0,
            scroll: 0,
        })
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn video<'a>(&self, catalog: &'a Catalog) -> Option<&'a Video> {
        catalog.video(&self.video_id)
    }

    pub fn previous<'a>(&self, catalog: &'a Catalog) -> Option<&'a Video> {
        catalog.previous(&self.video_id)
    }

    pub fn next<'a>(&self, catalog: &'a Catalog) -> Option<&'a Video> {
        catalog.next(&self.video_id)
    }

    /// Move to the previous video. Returns `false` at the start of the list.
    pub fn navigate_previous(&mut self, catalog: &Catalog) -> bool {
        match self.previous(catalog) {
            Some(video) => {
                let id = video.id.clone();
                self.show(id);
                true
            }
            None => false,
        }
    }

    /// Move to the next video. Returns `false` at the end of the list.
    pub fn navigate_next(&mut self, catalog: &Catalog) -> bool {
        match self.next(catalog) {
            Some(video) => {
                let id = video.id.clone();
                self.show(id);
                true
            }
            None => false,
        }
    }

    fn show(&mut self, video_id: String) {
        tracing::debug!(from = %self.video_id, to = %video_id, "Modal navigated");
        self.video_id = video_id;
        self.step = 0;
        self.scroll = 0;
    }

    // ------------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------------

    /// Index of the highlighted tutorial step.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Highlight step `index`, clamped to the video's step list.
    pub fn select_step(&mut self, catalog: &Catalog, index: usize) {
        let count = self.video(catalog).map_or(0, |v| v.steps.len());
        self.step = index.min(count.saturating_sub(1));
    }

    pub fn step_down(&mut self, catalog: &Catalog) {
        self.select_step(catalog, self.step.saturating_add(1));
    }

    pub fn step_up(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    // ------------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------------

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Clamp scroll to the rendered content height.
    pub fn clamp_scroll(&mut self, content_lines: u16, visible_lines: u16) {
        self.scroll = self.scroll.min(content_lines.saturating_sub(visible_lines));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::abc_catalog;

    #[test]
    fn open_unknown_is_none() {
        let catalog = abc_catalog();
        assert!(VideoModal::open(&catalog, "nope").is_none());
    }

    #[test]
    fn middle_video_has_both_neighbors() {
        let catalog = abc_catalog();
        let modal = VideoModal::open(&catalog, "2").unwrap();
        assert_eq!(modal.previous(&catalog).unwrap().id, "1");
        assert_eq!(modal.next(&catalog).unwrap().id, "3");
    }

    #[test]
    fn navigation_stops_at_edges() {
        let catalog = abc_catalog();
        let mut modal = VideoModal::open(&catalog, "1").unwrap();
        assert!(!modal.navigate_previous(&catalog));
        assert_eq!(modal.video_id(), "1");

        assert!(modal.navigate_next(&catalog));
        assert!(modal.navigate_next(&catalog));
        assert_eq!(modal.video_id(), "3");
        assert!(!modal.navigate_next(&catalog));
        assert_eq!(modal.video_id(), "3");
    }

    #[test]
    fn navigation_resets_step_and_scroll() {
        let catalog = abc_catalog();
        let mut modal = VideoModal::open(&catalog, "1").unwrap();
        modal.step_down(&catalog);
        modal.step_down(&catalog);
        modal.scroll_down(5);
        assert_eq!(modal.step(), 2);

        assert!(modal.navigate_next(&catalog));
        assert_eq!(modal.step(), 0);
        assert_eq!(modal.scroll(), 0);
    }

    #[test]
    fn failed_navigation_keeps_step() {
        let catalog = abc_catalog();
        let mut modal = VideoModal::open(&catalog, "3").unwrap();
        modal.step_down(&catalog);
        assert!(!modal.navigate_next(&catalog));
        assert_eq!(modal.step(), 1);
    }

    #[test]
    fn step_cursor_is_bounded() {
        let catalog = abc_catalog();
        let mut modal = VideoModal::open(&catalog, "2").unwrap();
        for _ in 0..10 {
            modal.step_down(&catalog);
        }
        assert_eq!(modal.step(), 2);
        modal.select_step(&catalog, 99);
        assert_eq!(modal.step(), 2);
        for _ in 0..10 {
            modal.step_up();
        }
        assert_eq!(modal.step(), 0);
    }

    #[test]
    fn clamp_scroll_limits_offset() {
        let catalog = abc_catalog();
        let mut modal = VideoModal::open(&catalog, "2").unwrap();
        modal.scroll_down(100);
        modal.clamp_scroll(30, 10);
        assert_eq!(modal.scroll(), 20);
        modal.clamp_scroll(5, 10);
        assert_eq!(modal.scroll(), 0);
    }
}
