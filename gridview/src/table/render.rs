//! Presentation shell: draws the engine's projection into a
//! [`Surface`] and maps pointer interaction back into state changes.

use crate::rect::Rect;
use crate::style::{Style, Theme};
use crate::surface::Surface;
use crate::text::{center_offset, display_width, fit_to_width};

use super::state::TableState;
use crate::event::{Event, MouseButton};

const SORT_DESC_GLYPH: char = '▼';
const SORT_ASC_GLYPH: char = '▲';
const RESIZE_HANDLE: char = '│';
const PREV_LABEL: &str = "[<]";
const NEXT_LABEL: &str = "[>]";

/// What a point in the table's area addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    /// Header cell of column `i`.
    Header(usize),
    /// Resize handle between column `i` and `i + 1`.
    ResizeHandle(usize),
    /// Visible (projected) row `i` on the current page.
    Row(usize),
    PrevPage,
    NextPage,
    Outside,
}

/// Resolve a point against the table layout.
pub fn hit_test<R>(state: &TableState<R>, area: Rect, x: u16, y: u16) -> TableHit {
    if !area.contains(x, y) {
        return TableHit::Outside;
    }

    // The bar is not drawn while loading, so it must not be
    // clickable either.
    if state.paginated() && !state.loading() && y == area.bottom() - 1 {
        let (prev, next) = pagination_buttons(state, area);
        if prev.contains(x, y) {
            return TableHit::PrevPage;
        }
        if next.contains(x, y) {
            return TableHit::NextPage;
        }
        return TableHit::Outside;
    }

    if y == area.y {
        let widths = state.layout_widths(area.width);
        let mut cx = area.x;
        for (i, width) in widths.iter().enumerate() {
            if x < cx + width {
                return TableHit::Header(i);
            }
            cx += width;
            // Handle cell after every column but the last.
            if i + 1 < widths.len() {
                if x == cx {
                    return TableHit::ResizeHandle(i);
                }
                cx += 1;
            }
        }
        return TableHit::Outside;
    }

    let row = (y - area.y - 1) as usize;
    if row < state.visible_rows().len() {
        TableHit::Row(row)
    } else {
        TableHit::Outside
    }
}

/// Feed a pointer event into the engine. Returns the hit that was
/// acted on, so callers can react to row clicks themselves.
pub fn handle_event<R>(state: &mut TableState<R>, area: Rect, event: &Event) -> TableHit {
    match *event {
        Event::Click {
            x,
            y,
            button: MouseButton::Left,
        } => {
            let hit = hit_test(state, area, x, y);
            match hit {
                TableHit::Header(i) => {
                    let key = state.columns()[i].key().to_string();
                    state.toggle_sort(&key);
                }
                TableHit::ResizeHandle(i) => state.begin_resize(i, x),
                TableHit::PrevPage => state.prev_page(),
                TableHit::NextPage => state.next_page(),
                TableHit::Row(_) | TableHit::Outside => {}
            }
            hit
        }
        Event::Drag { x, .. } if state.resizing() => {
            state.drag_resize(x);
            TableHit::Outside
        }
        Event::Release { .. } if state.resizing() => {
            state.end_resize();
            TableHit::Outside
        }
        _ => TableHit::Outside,
    }
}

/// Draw the table into `area`: header, body (or loading placeholder)
/// and, when enabled, the pagination bar on the last line.
pub fn draw<R>(
    surface: &mut Surface,
    area: Rect,
    state: &TableState<R>,
    theme: &Theme,
    loading_frame: Option<&str>,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let widths = state.layout_widths(area.width);
    draw_header(surface, area, state, theme, &widths);

    let body_height = area
        .height
        .saturating_sub(1)
        .saturating_sub(if state.paginated() { 1 } else { 0 });
    let body = Rect::new(area.x, area.y + 1, area.width, body_height);

    if state.loading() {
        draw_loading(surface, body, theme, loading_frame);
    } else {
        draw_rows(surface, body, state, theme, &widths);
    }

    if state.paginated() && !state.loading() && area.height >= 2 {
        draw_pagination(surface, area, state, theme);
    }
}

fn draw_header<R>(
    surface: &mut Surface,
    area: Rect,
    state: &TableState<R>,
    theme: &Theme,
    widths: &[u16],
) {
    let header_style = Style::new().fg(theme.text).bg(theme.surface).bold();
    let handle_style = Style::new().fg(theme.muted).bg(theme.surface);
    surface.fill(Rect::new(area.x, area.y, area.width, 1), header_style);

    let sort = state.sort();
    let mut cx = area.x;
    for (i, column) in state.columns().iter().enumerate() {
        let width = widths[i] as usize;
        let mut label = String::new();
        if sort.column() == column.key() {
            label.push(match sort.ascending() {
                Some(true) => SORT_ASC_GLYPH,
                _ => SORT_DESC_GLYPH,
            });
            label.push(' ');
        }
        label.push_str(column.header_text());
        surface.put_str(cx, area.y, &fit_to_width(&label, width), header_style);
        cx += widths[i];
        if i + 1 < widths.len() {
            surface.put_str(cx, area.y, &RESIZE_HANDLE.to_string(), handle_style);
            cx += 1;
        }
    }
}

fn draw_rows<R>(
    surface: &mut Surface,
    body: Rect,
    state: &TableState<R>,
    theme: &Theme,
    widths: &[u16],
) {
    let cell_style = Style::new().fg(theme.text).bg(theme.background);
    let sep_style = Style::new().fg(theme.muted).bg(theme.background);

    for (r, row) in state.visible_rows().iter().enumerate() {
        let y = body.y + r as u16;
        if y >= body.bottom() {
            break;
        }
        let mut cx = body.x;
        for (i, column) in state.columns().iter().enumerate() {
            let text = column.display(row);
            surface.put_str(cx, y, &fit_to_width(&text, widths[i] as usize), cell_style);
            cx += widths[i];
            if i + 1 < widths.len() {
                surface.put_str(cx, y, " ", sep_style);
                cx += 1;
            }
        }
    }
}

fn draw_loading(surface: &mut Surface, body: Rect, theme: &Theme, frame: Option<&str>) {
    if body.height == 0 {
        return;
    }
    let text = frame.unwrap_or("Loading…");
    let x = body.x + center_offset(display_width(text), body.width as usize) as u16;
    let style = Style::new().fg(theme.accent).bg(theme.background);
    surface.put_str(x, body.y, text, style);
}

fn draw_pagination<R>(surface: &mut Surface, area: Rect, state: &TableState<R>, theme: &Theme) {
    let y = area.bottom() - 1;
    let bar = Rect::new(area.x, y, area.width, 1);
    surface.fill(bar, Style::new().bg(theme.surface));

    let enabled = Style::new().fg(theme.accent).bg(theme.surface);
    let disabled = Style::new().fg(theme.muted).bg(theme.surface).dim();
    let label_style = Style::new().fg(theme.text).bg(theme.surface);

    let (prev, next) = pagination_buttons(state, area);
    let prev_style = if state.can_prev_page() {
        enabled
    } else {
        disabled
    };
    let next_style = if state.can_next_page() {
        enabled
    } else {
        disabled
    };

    surface.put_str(prev.x, y, PREV_LABEL, prev_style);
    let label = pagination_label(state);
    let label_x = prev.right() + 1;
    surface.put_str(label_x, y, &label, label_style);
    surface.put_str(next.x, y, NEXT_LABEL, next_style);
}

fn pagination_label<R>(state: &TableState<R>) -> String {
    format!(
        "Page {} of {}",
        state.page().page_index() + 1,
        state.display_page_count()
    )
}

/// Button rectangles on the pagination bar: `[<] Page X of Y [>]`,
/// anchored left. Shared by the renderer and the hit tester.
fn pagination_buttons<R>(state: &TableState<R>, area: Rect) -> (Rect, Rect) {
    let y = area.bottom() - 1;
    let prev_w = PREV_LABEL.len() as u16;
    let label_w = display_width(&pagination_label(state)) as u16;
    let prev = Rect::new(area.x, y, prev_w, 1);
    let next_x = (area.x + prev_w + 1 + label_w + 1).min(area.right().saturating_sub(1));
    let next = Rect::new(next_x, y, NEXT_LABEL.len() as u16, 1);
    (prev, next)
}
