//! Transient notification queue, drawn as a stack in the bottom-right
//! corner.

use std::time::{Duration, Instant};

use log::debug;

use crate::rect::Rect;
use crate::style::{Rgb, Style, Theme};
use crate::surface::Surface;
use crate::text::{display_width, truncate_to_width};

const DEFAULT_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    fn color(self, theme: &Theme) -> Rgb {
        match self {
            Self::Success => theme.success,
            Self::Error => theme.error,
            Self::Warning => theme.warning,
            Self::Info => theme.accent,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✗",
            Self::Warning => "!",
            Self::Info => "i",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub kind: NoticeKind,
    deadline: Instant,
}

/// FIFO queue of notices, each expiring on its own deadline.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind) -> u64 {
        self.push_with_ttl(message, kind, DEFAULT_TTL)
    }

    pub fn push_with_ttl(
        &mut self,
        message: impl Into<String>,
        kind: NoticeKind,
        ttl: Duration,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        debug!("notice {id}: {message}");
        self.notices.push(Notice {
            id,
            message,
            kind,
            deadline: Instant::now() + ttl,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, NoticeKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, NoticeKind::Error);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    /// Drop expired notices; returns whether anything changed so the
    /// caller knows to redraw.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        let before = self.notices.len();
        self.notices.retain(|n| n.deadline > now);
        self.notices.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Draw the stack into the bottom-right of `area`, newest at the
    /// bottom. Each notice is one line: ` ✓ message `.
    pub fn draw(&self, surface: &mut Surface, area: Rect, theme: &Theme) {
        if self.notices.is_empty() || area.height == 0 {
            return;
        }
        let max_width = (area.width.saturating_sub(2)) as usize;
        let shown = self
            .notices
            .iter()
            .rev()
            .take(area.height as usize)
            .collect::<Vec<_>>();
        for (i, notice) in shown.iter().enumerate() {
            let y = area.bottom() - 1 - i as u16;
            let body = truncate_to_width(&notice.message, max_width.saturating_sub(4));
            let line = format!(" {} {} ", notice.kind.glyph(), body);
            let w = display_width(&line) as u16;
            let x = area.right().saturating_sub(w);
            let style = Style::new()
                .fg(theme.background)
                .bg(notice.kind.color(theme))
                .bold();
            surface.put_str(x, y, &line, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_expire_on_tick() {
        let mut queue = NoticeQueue::new();
        queue.push_with_ttl("gone", NoticeKind::Info, Duration::ZERO);
        queue.push("stays", NoticeKind::Success);
        assert!(queue.tick());
        assert_eq!(queue.notices().len(), 1);
        assert_eq!(queue.notices()[0].message, "stays");
    }

    #[test]
    fn dismiss_removes_by_id() {
        let mut queue = NoticeQueue::new();
        let id = queue.push("a", NoticeKind::Error);
        queue.push("b", NoticeKind::Error);
        queue.dismiss(id);
        assert_eq!(queue.notices().len(), 1);
        assert_eq!(queue.notices()[0].message, "b");
    }
}
