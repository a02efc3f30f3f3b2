//! Single-line text input with optional masking.

use chrono::NaiveDate;

use crate::event::{Event, Key};
use crate::rect::Rect;
use crate::style::{Style, Theme};
use crate::surface::Surface;
use crate::text::{display_width, fit_to_width};

/// How the input transforms and displays what is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMask {
    #[default]
    None,
    /// Echo bullets instead of the value.
    Password,
    /// DD/MM/YYYY with automatic slash insertion.
    Date,
}

/// What a key event did to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key was not for this input.
    Unhandled,
    /// Value or cursor changed.
    Edited,
    /// Enter pressed.
    Submitted,
    /// Escape pressed.
    Cancelled,
}

/// A focusable single-line editor. The owning page routes key events
/// to whichever input currently has focus.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
    mask: InputMask,
    placeholder: String,
    error: Option<String>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mask(mut self, mask: InputMask) -> Self {
        self.mask = mask;
        if mask == InputMask::Date && self.placeholder.is_empty() {
            self.placeholder = "DD/MM/YYYY".to_string();
        }
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if self.mask == InputMask::Date {
            self.value = apply_date_mask(&self.value);
        }
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
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

    /// Date-mask inputs parse to a calendar date once fully typed.
    /// Empty counts as valid; a partial or impossible date does not.
    pub fn date_value(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.value, "%d/%m/%Y").ok()
    }

    pub fn is_valid_date(&self) -> bool {
        self.value.is_empty() || self.date_value().is_some()
    }

    pub fn handle_key(&mut self, key: Key) -> InputEvent {
        match key {
            Key::Char(c) => {
                self.insert(c);
                InputEvent::Edited
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at(self.cursor);
                }
                InputEvent::Edited
            }
            Key::Delete => {
                if self.cursor < self.value.chars().count() {
                    self.remove_at(self.cursor);
                }
                InputEvent::Edited
            }
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputEvent::Edited
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                InputEvent::Edited
            }
            Key::Home => {
                self.cursor = 0;
                InputEvent::Edited
            }
            Key::End => {
                self.cursor = self.value.chars().count();
                InputEvent::Edited
            }
            Key::Enter => InputEvent::Submitted,
            Key::Escape => InputEvent::Cancelled,
            _ => InputEvent::Unhandled,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> InputEvent {
        match event {
            Event::Key { key, modifiers } if !modifiers.ctrl && !modifiers.alt => {
                self.handle_key(*key)
            }
            _ => InputEvent::Unhandled,
        }
    }

    fn insert(&mut self, c: char) {
        match self.mask {
            InputMask::Date => {
                // The date mask always edits at the tail.
                if c.is_ascii_digit() || c == '/' {
                    self.value.push(c);
                    self.value = apply_date_mask(&self.value);
                }
                self.cursor = self.value.chars().count();
            }
            _ => {
                let byte = byte_index(&self.value, self.cursor);
                self.value.insert(byte, c);
                self.cursor += 1;
            }
        }
    }

    fn remove_at(&mut self, index: usize) {
        let byte = byte_index(&self.value, index);
        self.value.remove(byte);
        if self.mask == InputMask::Date {
            // Re-applying the mask here would put auto-inserted
            // slashes straight back; drop them instead so deletion
            // can make progress.
            while self.value.ends_with('/') {
                self.value.pop();
            }
            self.cursor = self.value.chars().count();
        }
    }

    /// What the input echoes: bullets for passwords, the placeholder
    /// when empty, the value otherwise.
    pub fn display_text(&self) -> String {
        if self.value.is_empty() {
            return self.placeholder.clone();
        }
        match self.mask {
            InputMask::Password => "•".repeat(self.value.chars().count()),
            _ => self.value.clone(),
        }
    }

    /// Cursor position in display cells.
    pub fn cursor_offset(&self) -> usize {
        match self.mask {
            InputMask::Password => self.cursor,
            _ => {
                let prefix: String = self.value.chars().take(self.cursor).collect();
                display_width(&prefix)
            }
        }
    }

    /// Render into a one-line area. The focused input shows a block
    /// cursor; errored inputs draw in the theme's error colour.
    pub fn draw(&self, surface: &mut Surface, area: Rect, theme: &Theme, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let fg = if self.error.is_some() {
            theme.error
        } else if self.value.is_empty() {
            theme.muted
        } else {
            theme.text
        };
        let style = Style::new().fg(fg).bg(theme.surface);
        let text = fit_to_width(&self.display_text(), area.width as usize);
        surface.put_str(area.x, area.y, &text, style);

        if focused {
            let offset = (self.cursor_offset() as u16).min(area.width.saturating_sub(1));
            let under = self
                .display_text()
                .chars()
                .nth(self.cursor)
                .filter(|_| !self.value.is_empty())
                .unwrap_or(' ');
            let cursor_style = Style::new().fg(theme.background).bg(theme.primary);
            surface.put_str(area.x + offset, area.y, &under.to_string(), cursor_style);
        }
    }
}

/// Normalize raw date text to at most `DD/MM/YYYY`: digits and
/// slashes only, slashes auto-inserted after the day and month, never
/// more than two of them, capped at ten characters.
pub fn apply_date_mask(raw: &str) -> String {
    let mut out = String::new();
    for c in raw.chars() {
        if c.is_ascii_digit() || c == '/' {
            out.push(c);
        }
    }

    if out.len() == 2 && !out.contains('/') {
        out.push('/');
    } else if out.len() == 5 && out.as_bytes()[2] == b'/' && !out[3..].contains('/') {
        out.push('/');
    }

    while out.matches('/').count() > 2 {
        match out.rfind('/') {
            Some(i) => out.truncate(i),
            None => break,
        }
    }

    if out.len() > 10 {
        out.truncate(10);
    }
    out
}

fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_mask_inserts_slashes() {
        assert_eq!(apply_date_mask("12"), "12/");
        assert_eq!(apply_date_mask("12/03"), "12/03/");
        assert_eq!(apply_date_mask("12/03/2024"), "12/03/2024");
    }

    #[test]
    fn date_mask_strips_garbage() {
        assert_eq!(apply_date_mask("1a2b"), "12/");
        assert_eq!(apply_date_mask("12/03/2024xx"), "12/03/2024");
        assert_eq!(apply_date_mask("1/2/3/4"), "1/2/3");
    }

    #[test]
    fn typing_a_date_masks_as_it_goes() {
        let mut input = TextInput::new().with_mask(InputMask::Date);
        for c in "31122024".chars() {
            input.handle_key(Key::Char(c));
        }
        assert_eq!(input.value(), "31/12/2024");
        assert!(input.is_valid_date());
    }

    #[test]
    fn impossible_date_is_invalid() {
        let mut input = TextInput::new().with_mask(InputMask::Date);
        input.set_value("31/02/2024");
        assert!(!input.is_valid_date());
        assert!(input.date_value().is_none());
    }

    #[test]
    fn backspace_makes_progress_past_auto_slashes() {
        let mut input = TextInput::new().with_mask(InputMask::Date);
        for c in "12".chars() {
            input.handle_key(Key::Char(c));
        }
        assert_eq!(input.value(), "12/");
        input.handle_key(Key::Backspace);
        assert_eq!(input.value(), "12");
        input.handle_key(Key::Backspace);
        assert_eq!(input.value(), "1");
    }

    #[test]
    fn empty_date_is_valid() {
        let input = TextInput::new().with_mask(InputMask::Date);
        assert!(input.is_valid_date());
    }

    #[test]
    fn password_echoes_bullets() {
        let mut input = TextInput::new().with_mask(InputMask::Password);
        input.set_value("hunter2");
        assert_eq!(input.display_text(), "•••••••");
    }

    #[test]
    fn cursor_editing_mid_string() {
        let mut input = TextInput::new();
        input.set_value("helo");
        input.handle_key(Key::Left);
        input.handle_key(Key::Left);
        input.handle_key(Key::Char('l'));
        assert_eq!(input.value(), "hello");
    }
}
