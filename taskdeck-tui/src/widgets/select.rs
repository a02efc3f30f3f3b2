//! Horizontal option picker: `◂ value ▸`.

use gridview::{Event, Key, Rect, Style, Surface, Theme};

pub struct Select {
    options: Vec<String>,
    selected: Option<usize>,
    /// Whether cycling passes through an empty "no selection" stop.
    allow_none: bool,
    placeholder: String,
    error: Option<String>,
}

impl Select {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            selected: None,
            allow_none: true,
            placeholder: "Any".to_string(),
            error: None,
        }
    }

    /// Require a selection; cycling skips the empty stop and the
    /// first option starts selected.
    pub fn required(mut self) -> Self {
        self.allow_none = false;
        if self.selected.is_none() && !self.options.is_empty() {
            self.selected = Some(0);
        }
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        if let Some(i) = self.selected {
            if i >= self.options.len() {
                self.selected = if self.allow_none || self.options.is_empty() {
                    None
                } else {
                    Some(0)
                };
            }
        } else if !self.allow_none && !self.options.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_selected(&mut self, selected: Option<usize>) {
        self.selected = match selected {
            Some(i) if i < self.options.len() => Some(i),
            _ if self.allow_none => None,
            _ => self.selected,
        };
    }

    pub fn clear(&mut self) {
        if self.allow_none {
            self.selected = None;
        } else {
            self.selected = Some(0).filter(|_| !self.options.is_empty());
        }
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Returns whether the selection changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key { key, .. } = event else {
            return false;
        };
        if self.options.is_empty() {
            return false;
        }
        match key {
            Key::Right => {
                self.selected = match self.selected {
                    None => Some(0),
                    Some(i) if i + 1 < self.options.len() => Some(i + 1),
                    Some(_) if self.allow_none => None,
                    Some(_) => Some(0),
                };
                true
            }
            Key::Left => {
                self.selected = match self.selected {
                    None => Some(self.options.len() - 1),
                    Some(0) if self.allow_none => None,
                    Some(0) => Some(self.options.len() - 1),
                    Some(i) => Some(i - 1),
                };
                true
            }
            _ => false,
        }
    }

    pub fn draw(&self, surface: &mut Surface, area: Rect, theme: &Theme, focused: bool) {
        let value = self
            .selected
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
            .unwrap_or(&self.placeholder);

        let fg = if self.error.is_some() {
            theme.error
        } else if self.selected.is_none() {
            theme.muted
        } else {
            theme.text
        };
        let arrows = if focused { theme.accent } else { theme.muted };

        surface.fill(Rect::new(area.x, area.y, area.width, 1), Style::new().bg(theme.surface));
        surface.put_str(area.x, area.y, "◂", Style::new().fg(arrows).bg(theme.surface));
        surface.put_str(
            area.x + 2,
            area.y,
            value,
            Style::new().fg(fg).bg(theme.surface),
        );
        if area.width > 0 {
            surface.put_str(
                area.right() - 1,
                area.y,
                "▸",
                Style::new().fg(arrows).bg(theme.surface),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridview::Modifiers;

    fn right() -> Event {
        Event::Key {
            key: Key::Right,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn optional_select_cycles_through_none() {
        let mut select = Select::new(vec!["a".into(), "b".into()]);
        assert_eq!(select.selected(), None);
        select.handle_event(&right());
        assert_eq!(select.selected(), Some(0));
        select.handle_event(&right());
        assert_eq!(select.selected(), Some(1));
        select.handle_event(&right());
        assert_eq!(select.selected(), None);
    }

    #[test]
    fn required_select_always_has_a_value() {
        let mut select = Select::new(vec!["a".into(), "b".into()]).required();
        assert_eq!(select.selected(), Some(0));
        select.handle_event(&right());
        select.handle_event(&right());
        assert_eq!(select.selected(), Some(0));
    }
}
