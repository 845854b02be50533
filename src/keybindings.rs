//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data, not match arms: the registry holds the defaults, user
//! overrides from config.toml or the preferences table replace them, and the
//! help overlay lists whatever is currently bound.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    Select,
    Back,
    CycleFocus,
    ToggleView,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    ToggleCollapse,
    ShrinkSidebar,
    GrowSidebar,
    ToggleWatched,
    PrevVideo,
    NextVideo,
    OpenVideo,
    PageDown,
    PageUp,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::Select => "Select / open",
            Self::Back => "Go back / dismiss",
            Self::CycleFocus => "Cycle panel focus",
            Self::ToggleView => "Switch between docs and tutorials",
            Self::EnterSearch => "Search tutorials",
            Self::ExitSearch => "Clear search",
            Self::CommitSearch => "Keep search and return",
            Self::ToggleCollapse => "Collapse / expand sidebar",
            Self::ShrinkSidebar => "Narrow sidebar",
            Self::GrowSidebar => "Widen sidebar",
            Self::ToggleWatched => "Mark video completed / not completed",
            Self::PrevVideo => "Previous video",
            Self::NextVideo => "Next video",
            Self::OpenVideo => "Open video in system player",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context. Determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Sidebar,
    Content,
    Modal,
    Search,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Sidebar => "Sidebar",
            Self::Content => "Content",
            Self::Modal => "Video",
            Self::Search => "Search",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Left", "Right", "Backspace", "Space"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then_some(KeySpec::ctrl(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::char(' ')),
        _ => {}
    }

    if let Some(n) = s.strip_prefix(['F', 'f']) {
        if let Ok(n) = n.parse::<u8>() {
            return (1..=12).contains(&n).then_some(KeySpec::plain(KeyCode::F(n)));
        }
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(KeySpec::char(c))
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// fall back to Global when the context has no binding for the key.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action::*;
        use Context::*;

        let defaults: &[(Context, KeySpec, Action)] = &[
            // === Global ===
            (Global, KeySpec::char('q'), Quit),
            (Global, KeySpec::char('j'), NavDown),
            (Global, KeySpec::plain(KeyCode::Down), NavDown),
            (Global, KeySpec::char('k'), NavUp),
            (Global, KeySpec::plain(KeyCode::Up), NavUp),
            (Global, KeySpec::plain(KeyCode::Enter), Select),
            (Global, KeySpec::plain(KeyCode::Esc), Back),
            (Global, KeySpec::plain(KeyCode::Tab), CycleFocus),
            (Global, KeySpec::char('v'), ToggleView),
            (Global, KeySpec::char('/'), EnterSearch),
            (Global, KeySpec::char('\\'), ToggleCollapse),
            (Global, KeySpec::char('['), ShrinkSidebar),
            (Global, KeySpec::char(']'), GrowSidebar),
            (Global, KeySpec::char('o'), OpenVideo),
            (Global, KeySpec::char('T'), CycleTheme),
            (Global, KeySpec::char('?'), ShowHelp),
            // === Content (detail text or tutorial list) ===
            (Content, KeySpec::char('w'), ToggleWatched),
            (Content, KeySpec::ctrl('d'), PageDown),
            (Content, KeySpec::ctrl('u'), PageUp),
            // === Video modal ===
            (Modal, KeySpec::plain(KeyCode::Esc), Back),
            (Modal, KeySpec::char('w'), ToggleWatched),
            (Modal, KeySpec::char('h'), PrevVideo),
            (Modal, KeySpec::plain(KeyCode::Left), PrevVideo),
            (Modal, KeySpec::char('l'), NextVideo),
            (Modal, KeySpec::plain(KeyCode::Right), NextVideo),
            (Modal, KeySpec::ctrl('d'), PageDown),
            (Modal, KeySpec::ctrl('u'), PageUp),
            // === Search mode ===
            (Search, KeySpec::plain(KeyCode::Esc), ExitSearch),
            (Search, KeySpec::plain(KeyCode::Enter), CommitSearch),
        ];

        for &(context, key, action) in defaults {
            self.bind(context, key, action);
        }
    }

    /// Apply user overrides from a keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "toggle_watched").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5"). The new key
    /// replaces every existing binding of the action, in the same contexts.
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        // Sorted so that conflicting overrides resolve the same way every run.
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();

        for (action_name, key_str) in entries {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    /// Search mode never falls back: typed characters are query text.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        match context {
            Context::Global | Context::Search => None,
            _ => self.lookup.get(&(Context::Global, key)).copied(),
        }
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "select" | "enter" => Some(Action::Select),
        "back" => Some(Action::Back),
        "cycle_focus" | "tab" => Some(Action::CycleFocus),
        "toggle_view" | "view" => Some(Action::ToggleView),
        "enter_search" | "search" => Some(Action::EnterSearch),
        "exit_search" => Some(Action::ExitSearch),
        "commit_search" => Some(Action::CommitSearch),
        "toggle_collapse" | "collapse" => Some(Action::ToggleCollapse),
        "shrink_sidebar" | "shrink" => Some(Action::ShrinkSidebar),
        "grow_sidebar" | "grow" => Some(Action::GrowSidebar),
        "toggle_watched" | "watched" => Some(Action::ToggleWatched),
        "prev_video" | "previous_video" | "prev" => Some(Action::PrevVideo),
        "next_video" | "next" => Some(Action::NextVideo),
        "open_video" | "open" => Some(Action::OpenVideo),
        "page_down" => Some(Action::PageDown),
        "page_up" => Some(Action::PageUp),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
