//! Render functions for the TUI.
//!
//! This module handles all rendering logic: the header, the sidebar and
//! content panes, the status bar, and overlays on top.

use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{detail, help, modal, sidebar, status, tutorials};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
///
/// Handles terminal size validation, then draws the frame and records the
/// areas mouse input is tested against.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        // Nothing is clickable on this screen
        app.layout = Default::default();
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, rows[0]);

    // Keep at least MIN_WIDTH / 2 columns for content on narrow terminals
    let sidebar_cols = app
        .sidebar_columns()
        .min(rows[1].width.saturating_sub(MIN_WIDTH / 2));
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_cols), Constraint::Min(0)])
        .split(rows[1]);

    app.layout.content = panes[1];
    sidebar::render(f, app, panes[0]);
    match app.view {
        View::Docs => {
            app.layout.video_list = Rect::default();
            detail::render(f, app, panes[1]);
        }
        View::Tutorials => tutorials::render(f, app, panes[1]),
    }
    status::render(f, app, rows[2]);

    if app.modal.is_some() {
        modal::render(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// One-line header: title, view tabs and the search field.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        let style = if active {
            app.style("sidebar_selected")
        } else {
            app.style("detail_muted")
        };
        Span::styled(format!(" {} ", label), style)
    };

    let mut spans = vec![
        Span::styled(" OneDoc ", app.style("detail_heading")),
        Span::raw(" "),
        tab("Docs", app.view == View::Docs),
        tab("Tutorials", app.view == View::Tutorials),
        Span::raw("  "),
    ];

    if app.search_mode {
        spans.push(Span::styled(
            format!("/{}_", app.search_input),
            app.style("search_input"),
        ));
    } else if !app.search_input.is_empty() {
        spans.push(Span::styled(
            format!("filter: {}", app.search_input),
            app.style("search_input"),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
