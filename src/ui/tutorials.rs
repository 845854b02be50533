use crate::app::{App, Focus};
use crate::util::{display_width, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the tutorial list for the selected topic and search query
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    app.layout.video_list = Rect::default();
    if area.width < 3 || area.height < 3 {
        return;
    }

    let border_style = if app.focus == Focus::Content && app.modal.is_none() {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let count = app.filtered_videos().len();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" Tutorials ({}) ", count));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if count == 0 {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("No tutorials found", app.style("detail_muted"))),
        ];
        if !app.search_input.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                format!("for \"{}\"", strip_control_chars(&app.search_input)),
                app.style("detail_muted"),
            )));
        }
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        return;
    }

    let height = inner.height as usize;
    if app.selected_video >= count {
        app.selected_video = count - 1;
    }
    let offset = app.selected_video.saturating_sub(height.saturating_sub(1));
    app.layout.video_list = inner;
    app.layout.video_offset = offset;

    let width = inner.width as usize;
    let items: Vec<ListItem> = app
        .filtered_videos()
        .into_iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, video)| {
            let selected = i == app.selected_video;
            let title_style = if selected {
                app.style("video_selected")
            } else {
                app.style("video_title")
            };
            let badge = if app.is_watched(&video.id) {
                Span::styled(" ✓ ", app.style("badge_completed"))
            } else {
                Span::styled("   ", title_style)
            };

            let meta = format!(
                "  {} · {}",
                strip_control_chars(&video.tool),
                strip_control_chars(&video.duration)
            );
            let title_room = width.saturating_sub(3 + display_width(&meta));
            let title = strip_control_chars(&video.title);
            let title = truncate_to_width(&title, title_room).into_owned();
            let padding = " ".repeat(title_room.saturating_sub(display_width(&title)));

            ListItem::new(Line::from(vec![
                badge,
                Span::styled(title, title_style),
                Span::styled(padding, title_style),
                Span::styled(meta, app.style("video_meta")),
            ]))
        })
        .collect();

    f.render_widget(List::new(items), inner);
}
