//! Sidebar state: topic selection plus a resizable, collapsible width.
//!
//! Width is tracked in logical pixels and kept separate from the collapsed
//! flag, so collapsing and expanding again restores the last dragged width.
//!
//! While a resize drag is in progress the global pointer presentation
//! (resize cursor, selection suppression) is overridden. The override is
//! held by a [`DragGuard`]; dropping the guard releases it, so every exit
//! path (button release, cancel, collapse, panel teardown) restores it.

use std::sync::Arc;

use crate::catalog::{Catalog, TopicIcon, ALL_TOPICS};

/// Narrowest expanded sidebar width, in logical pixels.
pub const MIN_WIDTH: u16 = 200;
/// Widest expanded sidebar width, in logical pixels.
pub const MAX_WIDTH: u16 = 400;
/// Initial sidebar width, in logical pixels.
pub const DEFAULT_WIDTH: u16 = 280;
/// Rendered width while collapsed, in logical pixels.
pub const COLLAPSED_WIDTH: u16 = 64;
/// Width change per keyboard resize step.
pub const KEYBOARD_STEP: u16 = 16;

/// Clamp a pointer position to the allowed sidebar width range.
pub fn clamp_width(pointer_x: u32) -> u16 {
    pointer_x.clamp(MIN_WIDTH as u32, MAX_WIDTH as u32) as u16
}

// ============================================================================
// Pointer override
// ============================================================================

/// Global pointer presentation that is overridden during a resize drag.
///
/// Implementations must tolerate `release` without a matching `engage`.
pub trait PointerOverride: Send + Sync {
    /// Show the resize cursor and suppress text selection.
    fn engage(&self);
    /// Restore the normal cursor and selection behavior.
    fn release(&self);
}

/// Scoped ownership of the pointer override for one drag gesture.
pub struct DragGuard {
    pointer: Arc<dyn PointerOverride>,
    start_width: u16,
}

impl DragGuard {
    fn acquire(pointer: Arc<dyn PointerOverride>, start_width: u16) -> Self {
        pointer.engage();
        Self {
            pointer,
            start_width,
        }
    }
}

impl Drop for DragGuard {
    fn drop(&mut self) {
        self.pointer.release();
        tracing::debug!("Sidebar resize finished");
    }
}

// ============================================================================
// Navigation panel
// ============================================================================

/// One row of the sidebar.
#[derive(Debug, Clone)]
pub struct PanelEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: TopicIcon,
    pub video_count: usize,
}

/// Emitted when the selected topic changes. The parent applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SelectionChanged {
    pub topic_id: String,
}

pub struct NavigationPanel {
    entries: Vec<PanelEntry>,
    selected: usize,
    width: u16,
    collapsed: bool,
    drag: Option<DragGuard>,
    pointer: Arc<dyn PointerOverride>,
}

impl NavigationPanel {
    /// Build the sidebar for a catalog. The synthetic "All Panels" entry is
    /// listed first and selected initially.
    pub fn new(catalog: &Catalog, pointer: Arc<dyn PointerOverride>) -> Self {
        let mut entries = Vec::with_capacity(catalog.topics().len() + 1);
        entries.push(PanelEntry {
            id: ALL_TOPICS.to_string(),
            name: "All Panels".to_string(),
            description: "Overview of all available plugin panels and tools".to_string(),
            icon: TopicIcon::GridFour,
            video_count: catalog.videos().len(),
        });
        entries.extend(catalog.topics().iter().map(|t| PanelEntry {
            id: t.id.clone(),
            name: t.name.clone(),
            description: t.description.clone(),
            icon: t.icon,
            video_count: t.video_count,
        }));

        Self {
            entries,
            selected: 0,
            width: DEFAULT_WIDTH,
            collapsed: false,
            drag: None,
            pointer,
        }
    }

    /// Set the expanded width, clamped to the allowed range.
    pub fn set_width(&mut self, width: u16) {
        self.width = clamp_width(width as u32);
    }

    pub fn entries(&self) -> &[PanelEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> &str {
        &self.entries[self.selected].id
    }

    /// Select a topic by id.
    ///
    /// Ids not in the sidebar are still accepted and reported, so the detail
    /// pane can show its not-found state; the highlight stays where it was.
    pub fn select_topic(&mut self, id: &str) -> SelectionChanged {
        if let Some(index) = self.entries.iter().position(|e| e.id == id) {
            self.selected = index;
        }
        SelectionChanged {
            topic_id: id.to_string(),
        }
    }

    /// Select the entry at `index`, clamped to the list.
    pub fn select_index(&mut self, index: usize) -> SelectionChanged {
        self.selected = index.min(self.entries.len().saturating_sub(1));
        SelectionChanged {
            topic_id: self.selected_id().to_string(),
        }
    }

    pub fn select_next(&mut self) -> SelectionChanged {
        self.select_index(self.selected.saturating_add(1))
    }

    pub fn select_previous(&mut self) -> SelectionChanged {
        self.select_index(self.selected.saturating_sub(1))
    }

    // ------------------------------------------------------------------------
    // Width and collapse
    // ------------------------------------------------------------------------

    /// Last expanded width, preserved while collapsed.
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Width the sidebar is drawn at.
    pub fn effective_width(&self) -> u16 {
        if self.collapsed {
            COLLAPSED_WIDTH
        } else {
            self.width
        }
    }

    /// Enter dragging mode. Ignored while collapsed, since no resize handle
    /// is shown, and while a drag is already active.
    ///
    /// The width is left alone; only later pointer moves change it.
    pub fn begin_resize(&mut self, pointer_x: u32) {
        if self.collapsed || self.drag.is_some() {
            return;
        }
        tracing::debug!(pointer_x, width = self.width, "Sidebar resize started");
        self.drag = Some(DragGuard::acquire(self.pointer.clone(), self.width));
    }

    /// Track the pointer while dragging; no-op otherwise.
    pub fn on_pointer_move(&mut self, pointer_x: u32) {
        if self.drag.is_some() {
            self.width = clamp_width(pointer_x);
        }
    }

    /// Finish the drag, keeping the current width.
    pub fn end_resize(&mut self) {
        self.drag = None;
    }

    /// Abort the drag and restore the width it started from.
    pub fn cancel_resize(&mut self) {
        if let Some(guard) = self.drag.take() {
            self.width = guard.start_width;
        }
    }

    /// Flip between collapsed and expanded. A drag in progress ends first.
    pub fn toggle_collapse(&mut self) {
        self.end_resize();
        self.collapsed = !self.collapsed;
        tracing::debug!(collapsed = self.collapsed, width = self.width, "Sidebar toggled");
    }

    /// Keyboard resize: adjust the expanded width by `delta` pixels.
    pub fn resize_by(&mut self, delta: i32) {
        if self.collapsed {
            return;
        }
        let target = (self.width as i32 + delta).max(0) as u32;
        self.width = clamp_width(target);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingPointer;
    use super::*;
    use crate::catalog::test_support::abc_catalog;
    use proptest::prelude::*;
    use std::sync::atomic::Ordering;

    fn panel() -> (NavigationPanel, Arc<RecordingPointer>) {
        let pointer = Arc::new(RecordingPointer::default());
        let panel = NavigationPanel::new(&abc_catalog(), pointer.clone());
        (panel, pointer)
    }

    #[test]
    fn all_entry_is_first_and_selected() {
        let (panel, _) = panel();
        assert_eq!(panel.entries().len(), 3);
        assert_eq!(panel.selected_id(), ALL_TOPICS);
        assert_eq!(panel.entries()[0].video_count, 3);
        assert_eq!(panel.entries()[1].video_count, 2);
    }

    #[test]
    fn select_topic_reports_selection() {
        let (mut panel, _) = panel();
        let event = panel.select_topic("b");
        assert_eq!(event.topic_id, "b");
        assert_eq!(panel.selected_id(), "b");
    }

    #[test]
    fn select_unknown_topic_keeps_highlight() {
        let (mut panel, _) = panel();
        let _ = panel.select_topic("a");
        let event = panel.select_topic("ghost");
        assert_eq!(event.topic_id, "ghost");
        assert_eq!(panel.selected_id(), "a");
    }

    #[test]
    fn select_next_and_previous_clamp() {
        let (mut panel, _) = panel();
        let _ = panel.select_previous();
        assert_eq!(panel.selected_index(), 0);
        for _ in 0..10 {
            let _ = panel.select_next();
        }
        assert_eq!(panel.selected_index(), 2);
    }

    #[test]
    fn move_without_drag_is_noop() {
        let (mut panel, _) = panel();
        panel.on_pointer_move(350);
        assert_eq!(panel.width(), DEFAULT_WIDTH);
    }

    #[test]
    fn press_and_release_without_move_keeps_width() {
        let (mut panel, _) = panel();
        panel.begin_resize(240);
        assert!(panel.is_dragging());
        assert_eq!(panel.width(), DEFAULT_WIDTH);
        panel.end_resize();
        assert_eq!(panel.width(), DEFAULT_WIDTH);
    }

    #[test]
    fn drag_clamps_to_bounds() {
        let (mut panel, _) = panel();
        panel.begin_resize(280);
        panel.on_pointer_move(10);
        assert_eq!(panel.width(), MIN_WIDTH);
        panel.on_pointer_move(10_000);
        assert_eq!(panel.width(), MAX_WIDTH);
        panel.on_pointer_move(333);
        assert_eq!(panel.width(), 333);
        panel.end_resize();
        assert_eq!(panel.width(), 333);
        assert!(!panel.is_dragging());
    }

    #[test]
    fn override_held_exactly_for_the_drag() {
        let (mut panel, pointer) = panel();
        assert!(!pointer.is_engaged());

        panel.begin_resize(300);
        assert!(pointer.is_engaged());
        // Second begin does not re-acquire
        panel.begin_resize(300);
        assert_eq!(pointer.engage_calls.load(Ordering::SeqCst), 1);

        panel.end_resize();
        assert!(!pointer.is_engaged());
        assert_eq!(pointer.release_calls.load(Ordering::SeqCst), 1);

        // Ending again does not release twice
        panel.end_resize();
        assert_eq!(pointer.release_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_restores_start_width_and_releases() {
        let (mut panel, pointer) = panel();
        panel.begin_resize(300);
        panel.on_pointer_move(390);
        panel.cancel_resize();
        assert_eq!(panel.width(), DEFAULT_WIDTH);
        assert!(!pointer.is_engaged());
        assert!(!panel.is_dragging());
    }

    #[test]
    fn dropping_panel_mid_drag_releases() {
        let (mut panel, pointer) = panel();
        panel.begin_resize(300);
        assert!(pointer.is_engaged());
        drop(panel);
        assert!(!pointer.is_engaged());
        assert_eq!(pointer.release_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn collapse_mid_drag_releases() {
        let (mut panel, pointer) = panel();
        panel.begin_resize(300);
        panel.toggle_collapse();
        assert!(!pointer.is_engaged());
        assert!(!panel.is_dragging());
    }

    #[test]
    fn begin_resize_ignored_while_collapsed() {
        let (mut panel, pointer) = panel();
        panel.toggle_collapse();
        panel.begin_resize(300);
        assert!(!panel.is_dragging());
        assert_eq!(pointer.engage_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn collapse_round_trip_restores_width() {
        let (mut panel, _) = panel();
        panel.begin_resize(300);
        panel.on_pointer_move(371);
        panel.end_resize();

        panel.toggle_collapse();
        assert_eq!(panel.effective_width(), COLLAPSED_WIDTH);
        assert_eq!(panel.width(), 371);

        panel.toggle_collapse();
        assert_eq!(panel.effective_width(), 371);
    }

    #[test]
    fn keyboard_resize_clamps() {
        let (mut panel, _) = panel();
        for _ in 0..100 {
            panel.resize_by(KEYBOARD_STEP as i32);
        }
        assert_eq!(panel.width(), MAX_WIDTH);
        for _ in 0..100 {
            panel.resize_by(-(KEYBOARD_STEP as i32));
        }
        assert_eq!(panel.width(), MIN_WIDTH);
    }

    #[test]
    fn configured_width_is_clamped() {
        let (mut panel, _) = panel();
        panel.set_width(1000);
        assert_eq!(panel.width(), MAX_WIDTH);
        panel.set_width(0);
        assert_eq!(panel.width(), MIN_WIDTH);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(x in any::<u32>()) {
            let w = clamp_width(x);
            prop_assert!((MIN_WIDTH..=MAX_WIDTH).contains(&w));
        }

        #[test]
        fn clamp_is_monotonic(a in 0u32..2000, b in 0u32..2000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(clamp_width(lo) <= clamp_width(hi));
        }

        #[test]
        fn collapse_twice_is_identity(x in 0u32..2000) {
            let (mut panel, _) = panel();
            panel.begin_resize(x);
            panel.end_resize();
            let before = panel.width();
            panel.toggle_collapse();
            panel.toggle_collapse();
            prop_assert_eq!(panel.width(), before);
            prop_assert_eq!(panel.effective_width(), before);
        }
    }
}
