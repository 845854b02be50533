//! Navigation sidebar: topic entries, the selected entry's description and
//! the resize handle on the right border.

use crate::app::{App, Focus};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Lines reserved under the list for the selected entry's description.
const DESCRIPTION_LINES: u16 = 3;

pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    app.layout.sidebar = area;
    app.layout.handle_x = None;
    app.layout.sidebar_list = Rect::default();
    if area.width < 3 || area.height < 3 {
        return;
    }

    let collapsed = app.panel.is_collapsed();
    let border_style = if app.focus == Focus::Sidebar && app.modal.is_none() {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if !collapsed {
        block = block.title(" Panels ");
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let show_description = !collapsed && inner.height > DESCRIPTION_LINES + 1;
    let list_height = if show_description {
        inner.height - DESCRIPTION_LINES - 1
    } else {
        inner.height
    };
    let list_area = Rect { height: list_height, ..inner };

    // Keep the selection in view
    let selected = app.panel.selected_index();
    let offset = selected.saturating_sub(list_height.saturating_sub(1) as usize);
    app.layout.sidebar_list = list_area;
    app.layout.sidebar_offset = offset;

    let width = inner.width as usize;
    let items: Vec<ListItem> = app
        .panel
        .entries()
        .iter()
        .enumerate()
        .skip(offset)
        .take(list_height as usize)
        .map(|(i, entry)| {
            let style = if i == selected {
                app.style("sidebar_selected")
            } else {
                app.style("sidebar_normal")
            };
            let text = if collapsed {
                format!(" {}", entry.icon.glyph())
            } else {
                let name = strip_control_chars(&entry.name);
                if entry.video_count > 0 {
                    format!(" {} {} ({})", entry.icon.glyph(), name, entry.video_count)
                } else {
                    format!(" {} {}", entry.icon.glyph(), name)
                }
            };
            ListItem::new(Line::from(Span::styled(
                truncate_to_width(&text, width).into_owned(),
                style,
            )))
        })
        .collect();
    f.render_widget(List::new(items), list_area);

    if show_description {
        if let Some(entry) = app.panel.entries().get(selected) {
            let desc_area = Rect {
                y: list_area.y + list_height + 1,
                height: DESCRIPTION_LINES,
                ..inner
            };
            let description = strip_control_chars(&entry.description).into_owned();
            f.render_widget(
                Paragraph::new(description)
                    .style(app.style("sidebar_description"))
                    .wrap(Wrap { trim: true }),
                desc_area,
            );
        }
    }

    if !collapsed {
        render_handle(f, app, area);
    }
}

/// Draw the resize handle over the right border and record its column.
fn render_handle(f: &mut Frame, app: &mut App, area: Rect) {
    let x = area.x + area.width - 1;
    app.layout.handle_x = Some(x);

    let (symbol, style) = if app.panel.is_dragging() {
        ("┃", app.style("resize_handle_active"))
    } else {
        ("│", app.style("resize_handle"))
    };
    let buf = f.buffer_mut();
    for y in area.y + 1..area.y + area.height - 1 {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}
