//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on the open overlay, search mode and focused pane.

use crate::app::{App, Focus, View};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::validate_video_ref;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Keybinding context for the current state.
pub(super) fn current_context(app: &App) -> KbContext {
    if app.modal.is_some() {
        return KbContext::Modal;
    }
    match app.focus {
        Focus::Sidebar => KbContext::Sidebar,
        Focus::Content => KbContext::Content,
    }
}

/// Main input dispatch function.
///
/// Routes input to the appropriate handler based on current mode and view.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<Action> {
    // Help overlay captures all keys when visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if app.search_mode {
        handle_search_input(app, code, modifiers);
        return Ok(Action::Continue);
    }

    let context = current_context(app);
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };

    dispatch(app, action).await
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while typing a search query.
///
/// Bound keys (Esc, Enter by default) end the search; other printable
/// characters are query text.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search)
    {
        Some(KbAction::ExitSearch) => app.exit_search(),
        Some(KbAction::CommitSearch) => app.commit_search(),
        _ => match code {
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                if !app.push_search_char(c) {
                    app.set_status(format!(
                        "Search query too long (max {} chars)",
                        crate::app::MAX_SEARCH_LENGTH
                    ));
                }
            }
            _ => {}
        },
    }
}

async fn dispatch(app: &mut App, action: KbAction) -> Result<Action> {
    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::Select => handle_select(app),
        KbAction::Back => handle_back(app),
        KbAction::CycleFocus => {
            if app.modal.is_none() {
                app.cycle_focus();
            }
        }
        KbAction::ToggleView => {
            if app.modal.is_none() {
                app.toggle_view();
            }
        }
        KbAction::EnterSearch => {
            app.close_modal();
            app.enter_search();
        }
        // Only meaningful in search mode, which is handled above
        KbAction::ExitSearch | KbAction::CommitSearch => {}
        KbAction::ToggleCollapse => app.panel.toggle_collapse(),
        KbAction::ShrinkSidebar => app.shrink_sidebar(),
        KbAction::GrowSidebar => app.grow_sidebar(),
        KbAction::ToggleWatched => {
            if app.toggle_watched().await?.is_none() {
                app.set_status("Select a tutorial first");
            }
        }
        KbAction::PrevVideo => app.modal_previous(),
        KbAction::NextVideo => app.modal_next(),
        KbAction::OpenVideo => open_current_video(app),
        KbAction::PageDown => page(app, true),
        KbAction::PageUp => page(app, false),
        KbAction::CycleTheme => {
            let name = app.cycle_theme().await?;
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
    }
    Ok(Action::Continue)
}

/// Enter: move from the sidebar into the content pane, or open the
/// highlighted tutorial.
fn handle_select(app: &mut App) {
    if app.modal.is_some() {
        return;
    }
    match (app.focus, app.view) {
        (Focus::Sidebar, _) => app.focus = Focus::Content,
        (Focus::Content, View::Tutorials) => {
            if !app.open_selected_video() {
                app.set_status("No tutorials found");
            }
        }
        (Focus::Content, View::Docs) => {}
    }
}

/// Esc, in priority order: cancel a drag, close the modal, clear an active
/// search filter, return focus to the sidebar.
fn handle_back(app: &mut App) {
    if app.panel.is_dragging() {
        app.panel.cancel_resize();
    } else if app.modal.is_some() {
        app.close_modal();
    } else if !app.search_input.is_empty() {
        app.exit_search();
    } else {
        app.focus = Focus::Sidebar;
    }
}

fn page(app: &mut App, down: bool) {
    let lines = app.page_size();
    if app.modal.is_none() && app.view == View::Tutorials {
        let count = app.filtered_videos().len();
        let step = lines as usize;
        app.selected_video = if down {
            (app.selected_video + step).min(count.saturating_sub(1))
        } else {
            app.selected_video.saturating_sub(step)
        };
    } else if down {
        app.scroll_down(lines);
    } else {
        app.scroll_up(lines);
    }
}

/// Hand the current video reference to the system opener.
fn open_current_video(app: &mut App) {
    let Some(reference) = app.current_video_ref() else {
        app.set_status("Nothing to open here");
        return;
    };

    match validate_video_ref(&reference) {
        Err(e) => app.set_status(e.to_string()),
        Ok(target) => match open::that(target) {
            Ok(()) => {
                tracing::info!(reference = %target, "Opened video");
                app.set_status("Opening video...");
            }
            Err(e) => {
                tracing::warn!(reference = %target, error = %e, "Failed to open video");
                app.set_status(format!("Failed to open video: {}", e));
            }
        },
    }
}
