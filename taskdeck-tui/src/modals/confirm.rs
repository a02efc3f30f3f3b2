//! Standardized confirmation modal.
//!
//! Enter/`y` confirms, Escape/`n` cancels.

use gridview::{Event, Key, Style, Surface, Theme};

use crate::widgets::form;

pub struct ConfirmModal {
    title: String,
    message: String,
}

impl ConfirmModal {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: "Confirm".to_string(),
            message: message.into(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// `Some(true)` confirmed, `Some(false)` cancelled, `None` still
    /// open.
    pub fn handle_event(&mut self, event: &Event) -> Option<bool> {
        match event {
            Event::Key { key, .. } => match key {
                Key::Enter | Key::Char('y') => Some(true),
                Key::Escape | Key::Char('n') => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn draw(&self, surface: &mut Surface, theme: &Theme) {
        let width = (self.message.len() as u16 + 8).clamp(30, 60);
        let area = surface.area().centered(width, 8);
        let content = form::draw_panel(surface, area, &self.title, theme);

        surface.put_str(
            content.x,
            content.y,
            &self.message,
            Style::new().fg(theme.text).bg(theme.surface),
        );

        let y = area.bottom() - 2;
        let cancel_w = form::draw_button(surface, content.x, y, "Cancel (n)", theme, false);
        form::draw_button(surface, content.x + cancel_w + 2, y, "Ok (y)", theme, true);
    }
}
