//! Docs view: the detail pane for the selected sidebar topic.

use crate::app::{App, Focus};
use crate::catalog::{RoadmapItem, Topic};
use crate::detail::{DetailContent, TopicSummaries};
use crate::util::strip_control_chars;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the detail pane
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let (title, lines) = build_lines(app);

    let inner_width = area.width.saturating_sub(2);
    app.visible_lines = area.height.saturating_sub(2);
    // Clamp before drawing so a resize never shows an invalid offset
    app.clamp_scroll(wrapped_height(&lines, inner_width), app.visible_lines);

    let border_style = if app.focus == Focus::Content && app.modal.is_none() {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    f.render_widget(paragraph, area);
}

/// Rows `lines` occupy when wrapped at `width` columns.
pub(super) fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    rows.min(u16::MAX as usize) as u16
}

fn build_lines(app: &App) -> (String, Vec<Line<'static>>) {
    match app.detail() {
        DetailContent::Overview(summaries) => (" Overview ".to_string(), overview(app, summaries)),
        DetailContent::Topic(topic) => (format!(" {} ", clean(&topic.name)), topic_lines(app, topic)),
        DetailContent::Roadmap { topic, items } => (
            format!(" {} ", clean(&topic.name)),
            roadmap_lines(app, topic, items),
        ),
        DetailContent::NotFound(id) => (
            " Not Found ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Panel not found",
                    app.style("not_found").add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("Topic '{}' not found", clean(id)),
                    app.style("detail_muted"),
                )),
            ],
        ),
    }
}

fn clean(s: &str) -> String {
    strip_control_chars(s).into_owned()
}

fn heading(app: &App, text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        app.style("detail_heading").add_modifier(Modifier::BOLD),
    ))
}

fn bullets(app: &App, items: &[String]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled("  • ", app.style("detail_bullet")),
                Span::styled(clean(item), app.style("detail_body")),
            ])
        })
        .collect()
}

fn overview(app: &App, summaries: TopicSummaries<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(app, "Plugin Documentation"),
        Line::from(Span::styled(
            format!("{} panels. Select one in the sidebar for details.", summaries.len()),
            app.style("detail_muted"),
        )),
        Line::from(""),
    ];

    for summary in summaries {
        lines.push(Line::from(Span::styled(
            clean(summary.name),
            app.style("detail_heading"),
        )));
        lines.push(Line::from(Span::styled(
            clean(summary.brief),
            app.style("detail_body"),
        )));
        lines.push(Line::from(Span::styled(
            format!("{} features", summary.feature_count),
            app.style("detail_muted"),
        )));
        lines.push(Line::from(""));
    }
    lines
}

/// Title, brief and embedded video line shared by regular and roadmap topics.
fn topic_header(app: &App, topic: &Topic) -> Vec<Line<'static>> {
    let detail = &topic.detail;
    vec![
        heading(app, &clean(&detail.title)),
        Line::from(Span::styled(clean(&detail.brief), app.style("detail_muted"))),
        Line::from(""),
        Line::from(vec![
            Span::styled("▶ Video: ", app.style("video_title")),
            Span::styled(clean(&detail.video_ref), app.style("video_meta")),
            Span::styled(" (o to open)", app.style("detail_muted")),
        ]),
        Line::from(""),
    ]
}

fn topic_lines(app: &App, topic: &Topic) -> Vec<Line<'static>> {
    let detail = &topic.detail;
    let mut lines = topic_header(app, topic);

    lines.push(heading(app, "Overview"));
    lines.push(Line::from(Span::styled(
        clean(&detail.overview),
        app.style("detail_body"),
    )));
    lines.push(Line::from(""));

    if !detail.features.is_empty() {
        lines.push(heading(app, "Key Features"));
        lines.extend(bullets(app, &detail.features));
        lines.push(Line::from(""));
    }

    if !detail.benefits.is_empty() {
        lines.push(heading(app, "Benefits"));
        lines.extend(bullets(app, &detail.benefits));
        lines.push(Line::from(""));
    }

    if !detail.usage.is_empty() {
        lines.push(heading(app, "How to Use"));
        lines.push(Line::from(Span::styled(
            clean(&detail.usage),
            app.style("detail_body"),
        )));
    }
    lines
}

fn roadmap_lines(app: &App, topic: &Topic, items: &[RoadmapItem]) -> Vec<Line<'static>> {
    let mut lines = topic_header(app, topic);
    lines.push(heading(app, "Upcoming Features"));
    lines.push(Line::from(""));

    if items.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing planned yet",
            app.style("detail_muted"),
        )));
        return lines;
    }

    for item in items {
        let badge = Style::default()
            .patch(app.style(item.status.style_role()))
            .add_modifier(Modifier::BOLD);
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", item.status.label()), badge),
            Span::styled(clean(&item.name), app.style("detail_heading")),
        ]));
        lines.push(Line::from(Span::styled(
            clean(&item.description),
            app.style("detail_body"),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "{} | Expected {}",
                clean(&item.category),
                clean(&item.estimated_release)
            ),
            app.style("detail_muted"),
        )));
        lines.push(Line::from(""));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height_counts_wrapped_rows() {
        let lines = vec![Line::from("abcdefghij"), Line::from(""), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 4), 3 + 1 + 1);
        assert_eq!(wrapped_height(&lines, 20), 3);
    }

    #[test]
    fn test_wrapped_height_zero_width() {
        let lines = vec![Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 0), 3);
    }
}
