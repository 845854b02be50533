use crate::catalog::{Catalog, Video};
use crate::config::Config;
use crate::detail::DetailContent;
use crate::keybindings::KeybindingRegistry;
use crate::modal::VideoModal;
use crate::panel::{NavigationPanel, PointerOverride, SelectionChanged, KEYBOARD_STEP};
use crate::preferences::{PreferenceManager, THEME_KEY};
use crate::storage::Database;
use crate::theme::{StyleMap, ThemeVariant};
use crate::watched::WatchedSet;
use anyhow::{Context as _, Result};
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

/// Maximum search query length accepted from the keyboard.
pub const MAX_SEARCH_LENGTH: usize = 256;

// ============================================================================
// View and Focus Enums
// ============================================================================

/// Which content the right-hand pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Topic documentation (detail view).
    Docs,
    /// Tutorial video list for the selected topic.
    Tutorials,
}

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

// ============================================================================
// Layout Cache
// ============================================================================

/// Screen areas from the last frame, used to hit-test mouse events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutCache {
    /// Whole sidebar including its border.
    pub sidebar: Rect,
    /// Column of the resize handle; `None` while collapsed.
    pub handle_x: Option<u16>,
    /// First row of the sidebar entry list and the list's scroll offset.
    pub sidebar_list: Rect,
    pub sidebar_offset: usize,
    /// Right-hand pane.
    pub content: Rect,
    /// Inner area of the tutorial list and its scroll offset.
    pub video_list: Rect,
    pub video_offset: usize,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub db: Database,
    pub catalog: Arc<Catalog>,

    // Theme
    pub theme_variant: ThemeVariant,
    /// Active style map for all UI rendering.
    pub theme: StyleMap,

    pub prefs: PreferenceManager,
    pub keybindings: KeybindingRegistry,

    pub panel: NavigationPanel,
    /// Topic id last reported by the sidebar. May name an unknown topic.
    pub selected_topic: String,

    pub view: View,
    pub focus: Focus,

    // Search
    pub search_mode: bool,
    pub search_input: String,

    /// Index into `filtered_videos()`.
    pub selected_video: usize,
    pub modal: Option<VideoModal>,
    pub watched: WatchedSet,

    /// Scroll offset of the detail pane.
    pub scroll_offset: u16,
    /// Visible rows of the detail pane or modal body from the last frame.
    pub visible_lines: u16,

    /// Logical pixels per terminal column.
    pub cell_width_px: u16,
    pub layout: LayoutCache,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Set whenever state changes; cleared after a frame is drawn.
    pub needs_redraw: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,
}

impl App {
    pub fn new(
        db: Database,
        catalog: Arc<Catalog>,
        prefs: PreferenceManager,
        pointer: Arc<dyn PointerOverride>,
    ) -> Self {
        let panel = NavigationPanel::new(&catalog, pointer);
        let selected_topic = panel.selected_id().to_string();
        let mut app = Self {
            db,
            catalog,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            prefs,
            keybindings: KeybindingRegistry::new(),
            panel,
            selected_topic,
            view: View::Docs,
            focus: Focus::Sidebar,
            search_mode: false,
            search_input: String::new(),
            selected_video: 0,
            modal: None,
            watched: WatchedSet::new(),
            scroll_offset: 0,
            visible_lines: 0,
            cell_width_px: Config::default().cell_width_px,
            layout: LayoutCache::default(),
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
        };
        app.apply_preferences();
        app
    }

    /// Apply startup configuration: sidebar width and cell size.
    pub fn apply_config(&mut self, config: &Config) {
        self.cell_width_px = config.cell_width_px.max(1);
        self.panel.set_width(config.sidebar_width);
    }

    /// Theme and keybinding overrides from the merged preferences.
    fn apply_preferences(&mut self) {
        let theme_name = self.prefs.theme_variant().to_string();
        match ThemeVariant::from_str_name(&theme_name) {
            Some(variant) => self.set_theme(variant),
            None => tracing::warn!(theme = %theme_name, "Unknown theme, using dark"),
        }

        let overrides = self.prefs.keybindings();
        for warning in self.keybindings.apply_overrides(&overrides) {
            tracing::warn!("{}", warning);
        }
    }

    /// Load the watched list from the database. A failed read starts empty.
    pub async fn load_watched(&mut self) {
        match WatchedSet::load(&self.db).await {
            Ok(set) => self.watched = set,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load watched list");
                self.set_status("Could not load watched videos");
            }
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant and persist the choice.
    ///
    /// Returns the name of the new theme for status display.
    pub async fn cycle_theme(&mut self) -> Result<&'static str> {
        let next = self.theme_variant.next();
        self.set_theme(next);
        self.prefs
            .set(&self.db, THEME_KEY, next.key())
            .await
            .context("Failed to save theme")?;
        Ok(next.name())
    }

    // ------------------------------------------------------------------------
    // Topic selection
    // ------------------------------------------------------------------------

    /// Apply a selection reported by the sidebar.
    pub fn apply_selection(&mut self, change: SelectionChanged) {
        tracing::debug!(topic = %change.topic_id, "Topic selected");
        self.selected_topic = change.topic_id;
        self.selected_video = 0;
        self.scroll_offset = 0;
        self.needs_redraw = true;
    }

    pub fn select_topic(&mut self, id: &str) {
        let change = self.panel.select_topic(id);
        self.apply_selection(change);
    }

    pub fn detail(&self) -> DetailContent<'_> {
        DetailContent::resolve(&self.catalog, &self.selected_topic)
    }

    // ------------------------------------------------------------------------
    // Tutorials
    // ------------------------------------------------------------------------

    pub fn filtered_videos(&self) -> Vec<&Video> {
        self.catalog.filter(&self.selected_topic, &self.search_input)
    }

    pub fn selected_video(&self) -> Option<&Video> {
        self.filtered_videos().get(self.selected_video).copied()
    }

    pub fn is_watched(&self, video_id: &str) -> bool {
        self.watched.contains(video_id)
    }

    /// `(completed, total)` over the catalog. Stale ids are not counted.
    pub fn progress(&self) -> (usize, usize) {
        let videos = self.catalog.videos();
        let done = self.watched.count_known(videos.iter().map(|v| v.id.as_str()));
        (done, videos.len())
    }

    /// Open the modal on the highlighted tutorial. Returns `false` when the
    /// list is empty.
    pub fn open_selected_video(&mut self) -> bool {
        let Some(id) = self.selected_video().map(|v| v.id.clone()) else {
            return false;
        };
        self.open_video(&id)
    }

    pub fn open_video(&mut self, video_id: &str) -> bool {
        match VideoModal::open(&self.catalog, video_id) {
            Some(modal) => {
                tracing::debug!(video = %video_id, "Opened video");
                self.modal = Some(modal);
                self.needs_redraw = true;
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.needs_redraw = true;
    }

    /// Move the modal to the previous video in catalog order.
    pub fn modal_previous(&mut self) {
        let moved = match self.modal.as_mut() {
            Some(modal) => modal.navigate_previous(&self.catalog),
            None => return,
        };
        if moved {
            self.follow_modal();
        } else {
            self.set_status("Already at the first video");
        }
    }

    /// Move the modal to the next video in catalog order.
    pub fn modal_next(&mut self) {
        let moved = match self.modal.as_mut() {
            Some(modal) => modal.navigate_next(&self.catalog),
            None => return,
        };
        if moved {
            self.follow_modal();
        } else {
            self.set_status("Already at the last video");
        }
    }

    /// Keep the list highlight on the modal's video when it is listed.
    fn follow_modal(&mut self) {
        let Some(id) = self.modal.as_ref().map(|m| m.video_id().to_string()) else {
            return;
        };
        if let Some(index) = self.filtered_videos().iter().position(|v| v.id == id) {
            self.selected_video = index;
        }
        self.needs_redraw = true;
    }

    /// Video the watched toggle applies to: the modal's, else the highlighted one.
    pub fn current_video_id(&self) -> Option<String> {
        if let Some(modal) = &self.modal {
            return Some(modal.video_id().to_string());
        }
        match self.view {
            View::Tutorials => self.selected_video().map(|v| v.id.clone()),
            View::Docs => None,
        }
    }

    /// Flip the watched state of the current video and persist the set.
    ///
    /// Returns the new membership, or `None` when no video is current. A
    /// failed save reverts the change.
    pub async fn toggle_watched(&mut self) -> Result<Option<bool>> {
        let Some(id) = self.current_video_id() else {
            return Ok(None);
        };

        let watched = self.watched.toggle(&id);
        if let Err(e) = self.watched.save(&self.db).await {
            self.watched.toggle(&id);
            return Err(e.context("Failed to save watched videos"));
        }

        tracing::info!(video = %id, watched, "Toggled watched");
        self.set_status(if watched {
            "Marked as completed"
        } else {
            "Marked as not completed"
        });
        Ok(Some(watched))
    }

    /// Opaque video reference for the current context: the modal's video,
    /// the highlighted tutorial, or the topic's embedded video.
    pub fn current_video_ref(&self) -> Option<String> {
        if let Some(modal) = &self.modal {
            return modal.video(&self.catalog).map(|v| v.video_ref.clone());
        }
        match self.view {
            View::Tutorials => self.selected_video().map(|v| v.video_ref.clone()),
            View::Docs => self.detail().video_ref().map(str::to_string),
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Docs => View::Tutorials,
            View::Tutorials => View::Docs,
        };
        self.selected_video = 0;
        self.scroll_offset = 0;
        self.needs_redraw = true;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Content,
            Focus::Content => Focus::Sidebar,
        };
    }

    pub fn nav_down(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.step_down(&self.catalog);
            return;
        }
        match (self.focus, self.view) {
            (Focus::Sidebar, _) => {
                let change = self.panel.select_next();
                self.apply_selection(change);
            }
            (Focus::Content, View::Tutorials) => {
                let count = self.filtered_videos().len();
                if count > 0 {
                    self.selected_video = (self.selected_video + 1).min(count - 1);
                }
            }
            (Focus::Content, View::Docs) => self.scroll_down(1),
        }
    }

    pub fn nav_up(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.step_up();
            return;
        }
        match (self.focus, self.view) {
            (Focus::Sidebar, _) => {
                let change = self.panel.select_previous();
                self.apply_selection(change);
            }
            (Focus::Content, View::Tutorials) => {
                self.selected_video = self.selected_video.saturating_sub(1);
            }
            (Focus::Content, View::Docs) => self.scroll_up(1),
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        match self.modal.as_mut() {
            Some(modal) => modal.scroll_down(lines),
            None => self.scroll_offset = self.scroll_offset.saturating_add(lines),
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        match self.modal.as_mut() {
            Some(modal) => modal.scroll_up(lines),
            None => self.scroll_offset = self.scroll_offset.saturating_sub(lines),
        }
    }

    /// Half the visible pane, at least one line.
    pub fn page_size(&self) -> u16 {
        (self.visible_lines / 2).max(1)
    }

    /// Clamp the detail scroll to its rendered height.
    pub fn clamp_scroll(&mut self, content_lines: u16, visible_lines: u16) {
        self.scroll_offset = self
            .scroll_offset
            .min(content_lines.saturating_sub(visible_lines));
    }

    // ------------------------------------------------------------------------
    // Sidebar width
    // ------------------------------------------------------------------------

    pub fn shrink_sidebar(&mut self) {
        self.panel.resize_by(-(KEYBOARD_STEP as i32));
    }

    pub fn grow_sidebar(&mut self) {
        self.panel.resize_by(KEYBOARD_STEP as i32);
    }

    /// Terminal columns the sidebar occupies, at least one.
    pub fn sidebar_columns(&self) -> u16 {
        (self.panel.effective_width() / self.cell_width_px.max(1)).max(1)
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// Start typing a query. Search applies to the tutorial list.
    pub fn enter_search(&mut self) {
        self.search_mode = true;
        if self.view != View::Tutorials {
            self.view = View::Tutorials;
            self.scroll_offset = 0;
        }
        self.selected_video = 0;
    }

    /// Leave search mode and drop the query.
    pub fn exit_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
        self.selected_video = 0;
    }

    /// Leave search mode keeping the query as an active filter.
    pub fn commit_search(&mut self) {
        self.search_mode = false;
        self.focus = Focus::Content;
    }

    /// Append a typed character. Returns `false` when the query is full.
    pub fn push_search_char(&mut self, c: char) -> bool {
        if self.search_input.len() + c.len_utf8() > MAX_SEARCH_LENGTH {
            return false;
        }
        self.search_input.push(c);
        self.selected_video = 0;
        true
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.selected_video = 0;
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
