//! Mouse input: sidebar resize drag, click selection and wheel scrolling.
//!
//! Hit-testing uses the areas the renderer recorded in `App::layout` on the
//! previous frame. Terminal columns convert to logical pixels through
//! `App::cell_width_px`; a pointer over column `c` (counted from the sidebar's
//! left edge) sits at `(c + 1) * cell_width_px`, the right edge of that cell.

use crate::app::{App, Focus, View};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Logical pixel position of the pointer relative to the sidebar's left edge.
fn pointer_px(app: &App, column: u16) -> u32 {
    let offset = column.saturating_sub(app.layout.sidebar.x) as u32;
    (offset + 1) * app.cell_width_px.max(1) as u32
}

fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_press(app, column, row),
        MouseEventKind::Drag(MouseButton::Left) => {
            // Moves only reach the panel while a drag is active
            if app.panel.is_dragging() {
                let px = pointer_px(app, column);
                app.panel.on_pointer_move(px);
                app.needs_redraw = true;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.panel.is_dragging() {
                app.panel.end_resize();
                tracing::debug!(width = app.panel.width(), "Sidebar resized");
                app.needs_redraw = true;
            }
        }
        MouseEventKind::ScrollDown => handle_wheel(app, column, row, true),
        MouseEventKind::ScrollUp => handle_wheel(app, column, row, false),
        _ => {}
    }
}

fn handle_press(app: &mut App, column: u16, row: u16) {
    if app.show_help || app.search_mode {
        return;
    }
    if app.modal.is_some() {
        // Clicking outside the overlay dismisses it
        if !hit(app.layout.content, column, row) && !hit(app.layout.sidebar, column, row) {
            return;
        }
        if !hit(modal_area(app), column, row) {
            app.close_modal();
        }
        return;
    }

    let layout = app.layout;
    if layout.handle_x == Some(column) && hit(layout.sidebar, column, row) {
        let px = pointer_px(app, column);
        app.panel.begin_resize(px);
        app.needs_redraw = true;
        return;
    }

    if hit(layout.sidebar_list, column, row) {
        let index = layout.sidebar_offset + (row - layout.sidebar_list.y) as usize;
        if index < app.panel.entries().len() {
            let change = app.panel.select_index(index);
            app.apply_selection(change);
        }
        app.focus = Focus::Sidebar;
        app.needs_redraw = true;
        return;
    }

    if app.view == View::Tutorials && hit(layout.video_list, column, row) {
        app.focus = Focus::Content;
        let index = layout.video_offset + (row - layout.video_list.y) as usize;
        if index < app.filtered_videos().len() {
            // A click on the highlighted row opens it
            if index == app.selected_video {
                app.open_selected_video();
            } else {
                app.selected_video = index;
            }
        }
        app.needs_redraw = true;
        return;
    }

    if hit(layout.content, column, row) {
        app.focus = Focus::Content;
        app.needs_redraw = true;
    }
}

fn handle_wheel(app: &mut App, column: u16, row: u16, down: bool) {
    if app.panel.is_dragging() {
        return;
    }
    if app.modal.is_none() && hit(app.layout.sidebar, column, row) {
        let change = if down {
            app.panel.select_next()
        } else {
            app.panel.select_previous()
        };
        app.apply_selection(change);
        return;
    }

    let saved = app.focus;
    app.focus = Focus::Content;
    if down {
        app.nav_down();
    } else {
        app.nav_up();
    }
    app.focus = saved;
    app.needs_redraw = true;
}

/// Area the video modal covers within the content pane.
pub(super) fn modal_area(app: &App) -> Rect {
    let area = app.layout.content;
    let width = (area.width * 9 / 10).max(area.width.min(20));
    let height = (area.height * 9 / 10).max(area.height.min(8));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}
