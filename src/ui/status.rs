use crate::app::{App, Focus, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar: a message or key hints on the left, tutorial
/// progress on the right.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.panel.is_dragging() {
        Cow::Owned(format!(
            "Resizing sidebar: {}px | release to keep, Esc to cancel",
            app.panel.width()
        ))
    } else if app.search_mode {
        Cow::Borrowed("Type to search tutorials | ESC cancel | ENTER confirm")
    } else if app.modal.is_some() {
        Cow::Borrowed("[h/l]prev/next [j/k]steps [w]atched [o]pen [Esc]close")
    } else {
        match (app.view, app.focus) {
            (_, Focus::Sidebar) => {
                Cow::Borrowed("[j/k]select [Enter]open [\\]collapse [[/]]resize [v]iew [?]help [q]uit")
            }
            (View::Docs, Focus::Content) => {
                Cow::Borrowed("[j/k]scroll [Ctrl+d/u]page [o]pen video [Esc]back [?]help")
            }
            (View::Tutorials, Focus::Content) => {
                Cow::Borrowed("[j/k]select [Enter]watch [w]atched [/]search [Esc]back [?]help")
            }
        }
    };

    let (done, total) = app.progress();
    let progress = format!(" Completed {}/{} ", done, total);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(progress.chars().count() as u16),
        ])
        .split(area);

    let style = app.style("status_bar");
    f.render_widget(Paragraph::new(text).style(style), chunks[0]);
    f.render_widget(
        Paragraph::new(Span::styled(progress, app.style("badge_completed"))).style(style),
        chunks[1],
    );
}
