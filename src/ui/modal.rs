//! Video detail overlay drawn over the content pane.

use crate::app::App;
use crate::catalog::Video;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;

use super::detail::wrapped_height;
use super::mouse::modal_area;

pub fn render(f: &mut Frame, app: &mut App) {
    let area = modal_area(app);
    if area.width < 10 || area.height < 6 {
        return;
    }

    // Owned handle so the catalog borrow does not pin `app`
    let catalog = Arc::clone(&app.catalog);
    let Some(modal) = app.modal.as_ref() else {
        return;
    };
    let Some(video) = modal.video(&catalog) else {
        return;
    };
    let step = modal.step();
    let previous = modal.previous(&catalog);
    let next = modal.next(&catalog);

    let position = catalog
        .position(&video.id)
        .map(|i| format!(" Video {}/{} ", i + 1, catalog.videos().len()))
        .unwrap_or_default();

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(position);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let lines = body_lines(app, video, step);
    let visible = chunks[0].height;
    let content_height = wrapped_height(&lines, chunks[0].width);

    let nav = nav_line(app, previous, next, chunks[1].width as usize);

    if let Some(modal) = app.modal.as_mut() {
        modal.clamp_scroll(content_height, visible);
    }
    let scroll = app.modal.as_ref().map_or(0, |m| m.scroll());

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(vec![Line::from(""), nav]),
        chunks[1],
    );
}

fn clean(s: &str) -> String {
    strip_control_chars(s).into_owned()
}

fn body_lines(app: &App, video: &Video, step: usize) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(
        clean(&video.title),
        app.style("detail_heading").add_modifier(Modifier::BOLD),
    )];
    if app.is_watched(&video.id) {
        title.push(Span::raw("  "));
        title.push(Span::styled("✓ Completed", app.style("badge_completed")));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("{} · {}", clean(&video.tool), clean(&video.duration)),
            app.style("video_meta"),
        )),
        Line::from(""),
        Line::from(Span::styled(clean(&video.description), app.style("detail_body"))),
        Line::from(""),
        Line::from(vec![
            Span::styled("▶ ", app.style("video_title")),
            Span::styled(clean(&video.video_ref), app.style("video_meta")),
            Span::styled(" (o to open)", app.style("detail_muted")),
        ]),
        Line::from(""),
    ];

    if !video.steps.is_empty() {
        lines.push(Line::from(Span::styled(
            "Steps",
            app.style("detail_heading").add_modifier(Modifier::BOLD),
        )));
        for (i, text) in video.steps.iter().enumerate() {
            let style = if i == step {
                app.style("modal_step_current")
            } else {
                app.style("modal_step")
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>2}. ", i + 1), style),
                Span::styled(clean(text), style),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !video.screenshots.is_empty() {
        lines.push(Line::from(Span::styled(
            "Screenshots",
            app.style("detail_heading").add_modifier(Modifier::BOLD),
        )));
        for shot in &video.screenshots {
            lines.push(Line::from(vec![
                Span::styled("  • ", app.style("detail_bullet")),
                Span::styled(clean(shot), app.style("detail_muted")),
            ]));
        }
    }
    lines
}

/// "← Previous: title | h/l | Next: title →", with missing sides omitted.
fn nav_line(
    app: &App,
    previous: Option<&Video>,
    next: Option<&Video>,
    width: usize,
) -> Line<'static> {
    let side = width.saturating_sub(9) / 2;
    let prev_text = previous
        .map(|v| format!("← Previous: {}", clean(&v.title)))
        .unwrap_or_default();
    let next_text = next
        .map(|v| format!("Next: {} →", clean(&v.title)))
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(
            format!("{:<side$}", truncate_to_width(&prev_text, side), side = side),
            app.style("detail_body"),
        ),
        Span::styled("  h/l  ", app.style("detail_muted")),
        Span::styled(
            truncate_to_width(&next_text, side).into_owned(),
            app.style("detail_body"),
        ),
    ])
}
