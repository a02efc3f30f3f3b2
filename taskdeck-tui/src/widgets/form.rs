//! Form layout helpers: labelled fields, buttons, framed boxes.

use gridview::{Rect, Style, Surface, TextInput, Theme};

use super::Select;

/// Rows one labelled field occupies: label, value, error line.
pub const FIELD_HEIGHT: u16 = 3;

pub fn draw_input(
    surface: &mut Surface,
    area: Rect,
    label: &str,
    input: &TextInput,
    theme: &Theme,
    focused: bool,
) {
    draw_label(surface, area, label, theme, focused);
    input.draw(
        surface,
        Rect::new(area.x, area.y + 1, area.width, 1),
        theme,
        focused,
    );
    draw_error(surface, area, input.error(), theme);
}

pub fn draw_select(
    surface: &mut Surface,
    area: Rect,
    label: &str,
    select: &Select,
    theme: &Theme,
    focused: bool,
) {
    draw_label(surface, area, label, theme, focused);
    select.draw(
        surface,
        Rect::new(area.x, area.y + 1, area.width, 1),
        theme,
        focused,
    );
    draw_error(surface, area, select.error(), theme);
}

fn draw_label(surface: &mut Surface, area: Rect, label: &str, theme: &Theme, focused: bool) {
    let fg = if focused { theme.accent } else { theme.muted };
    surface.put_str(area.x, area.y, label, Style::new().fg(fg).bg(theme.surface));
}

fn draw_error(surface: &mut Surface, area: Rect, error: Option<&str>, theme: &Theme) {
    if let Some(error) = error {
        surface.put_str(
            area.x,
            area.y + 2,
            error,
            Style::new().fg(theme.error).bg(theme.surface),
        );
    }
}

/// `[ label ]`, highlighted when focused. Returns the drawn width.
pub fn draw_button(
    surface: &mut Surface,
    x: u16,
    y: u16,
    label: &str,
    theme: &Theme,
    focused: bool,
) -> u16 {
    let text = format!("[ {label} ]");
    let style = if focused {
        Style::new().fg(theme.background).bg(theme.primary).bold()
    } else {
        Style::new().fg(theme.text).bg(theme.surface)
    };
    surface.put_str(x, y, &text, style)
}

/// Fill a panel and draw its title; returns the inner content area.
pub fn draw_panel(surface: &mut Surface, area: Rect, title: &str, theme: &Theme) -> Rect {
    surface.fill(area, Style::new().bg(theme.surface));
    let inner = area.inset(2);
    surface.put_str(
        inner.x,
        area.y + 1,
        title,
        Style::new().fg(theme.accent).bg(theme.surface).bold(),
    );
    Rect::new(
        inner.x,
        area.y + 3,
        inner.width,
        area.height.saturating_sub(4),
    )
}
