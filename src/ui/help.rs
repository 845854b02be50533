//! Help overlay: keyboard bindings and mouse gestures, grouped by the pane
//! they apply to.
//!
//! Key rows come from the live registry, so config overrides show up here.
//! The section for the pane that currently receives input is marked.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::input::current_context;

const SECTION_ORDER: [Context; 5] = [
    Context::Global,
    Context::Sidebar,
    Context::Content,
    Context::Modal,
    Context::Search,
];

/// Mouse gestures per context. Search mode ignores the mouse.
fn mouse_gestures(context: Context) -> &'static [(&'static str, &'static str)] {
    match context {
        Context::Global => &[("Wheel", "Scroll the pane under the pointer")],
        Context::Sidebar => &[
            ("Click", "Select topic"),
            ("Drag border", "Resize sidebar"),
            ("Esc/focus loss", "Cancel resize, restore width"),
        ],
        Context::Content => &[
            ("Click", "Select tutorial"),
            ("Click again", "Open tutorial"),
        ],
        Context::Modal => &[("Click outside", "Close video")],
        Context::Search => &[],
    }
}

/// One help row: key column, description, and whether it is a mouse gesture.
type HelpRow = (String, &'static str, bool);

/// Sections in display order, each with its key rows then its mouse rows.
fn sections(app: &App) -> Vec<(Context, Vec<HelpRow>)> {
    let bindings = app.keybindings.all_bindings();
    SECTION_ORDER
        .iter()
        .map(|&ctx| {
            let mut rows: Vec<HelpRow> = bindings
                .iter()
                .filter(|(c, _, _, _)| *c == ctx)
                .map(|(_, key, _, description)| (key.clone(), *description, false))
                .collect();
            rows.extend(
                mouse_gestures(ctx)
                    .iter()
                    .map(|(gesture, description)| (gesture.to_string(), *description, true)),
            );
            (ctx, rows)
        })
        .filter(|(_, rows)| !rows.is_empty())
        .collect()
}

fn help_lines(app: &App) -> Vec<Line<'static>> {
    let active = current_context(app);
    let sections = sections(app);
    let key_width = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(key, _, _)| key.chars().count()))
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines = Vec::new();
    for (ctx, rows) in sections {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let marker = if ctx == active { "▸ " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, ctx.label()),
            app.style("detail_heading").add_modifier(Modifier::BOLD),
        )));
        for (key, description, mouse) in rows {
            let key_style = if mouse {
                app.style("detail_muted")
            } else {
                app.style("detail_bullet")
            };
            lines.push(Line::from(vec![
                Span::styled(format!("    {:<key_width$}", key), key_style),
                Span::styled(description, app.style("detail_body")),
            ]));
        }
    }
    lines
}

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &mut App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    let lines = help_lines(app);
    let visible = overlay.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    // Keep the stored offset in range so scrolling back up responds at once
    app.help_scroll_offset = app.help_scroll_offset.min(max_scroll);
    let scroll = app.help_scroll_offset;

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) j/k scroll, ? close ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    f.render_widget(Clear, overlay);
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(app.style("panel_border_focused"))
                    .title(title),
            )
            .scroll((scroll.min(u16::MAX as usize) as u16, 0)),
        overlay,
    );
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::abc_catalog;
    use crate::config::Config;
    use crate::panel::test_support::RecordingPointer;
    use crate::preferences::PreferenceManager;
    use crate::storage::Database;
    use std::sync::Arc;

    async fn test_app(config: &Config) -> App {
        let db = Database::open(":memory:").await.unwrap();
        App::new(
            db,
            Arc::new(abc_catalog()),
            PreferenceManager::from_config(config),
            Arc::new(RecordingPointer::default()),
        )
    }

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_mouse_gestures_listed_under_their_pane() {
        let app = test_app(&Config::default()).await;
        let lines = text(&help_lines(&app));

        let sidebar = lines.iter().position(|l| l.ends_with("Sidebar")).unwrap();
        let content = lines.iter().position(|l| l.ends_with("Content")).unwrap();
        let resize = lines
            .iter()
            .position(|l| l.contains("Drag border") && l.contains("Resize sidebar"))
            .unwrap();
        assert!(sidebar < resize && resize < content);
        assert!(lines.iter().any(|l| l.contains("Click outside")));
    }

    #[tokio::test]
    async fn test_active_section_follows_focus_and_modal() {
        let mut app = test_app(&Config::default()).await;
        let marked = |app: &App| {
            text(&help_lines(app))
                .into_iter()
                .filter(|l| l.starts_with('▸'))
                .collect::<Vec<_>>()
        };
        assert_eq!(marked(&app), vec!["▸ Sidebar".to_string()]);

        app.open_video("2");
        assert_eq!(marked(&app), vec!["▸ Video".to_string()]);
    }

    #[tokio::test]
    async fn test_overridden_key_is_shown() {
        let mut config = Config::default();
        config
            .keybindings
            .insert("toggle_collapse".to_string(), "b".to_string());
        let app = test_app(&config).await;
        let lines = text(&help_lines(&app));
        assert!(lines
            .iter()
            .any(|l| l.trim_start().starts_with("b ") && l.contains("Collapse")));
    }
}
