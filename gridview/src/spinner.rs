//! Loading spinner: a bouncing bar that snakes across a short track.

use std::time::{Duration, Instant};

use crate::style::{Style, Theme};
use crate::surface::Surface;

const SNAKE: char = '■';
const TRACK: char = '⬝';

/// Frame-stepped spinner. Callers drive it from their tick timer and
/// redraw when [`Spinner::tick`] reports a frame change.
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: Vec<String>,
    current: usize,
    frame_ms: u64,
    last_advance: Instant,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(8, 6)
    }
}

impl Spinner {
    /// `track_width` cells of track, with a `snake_len`-cell bar that
    /// sweeps right, pauses, sweeps back and rests on the left.
    pub fn new(track_width: u16, snake_len: u16) -> Self {
        Self {
            frames: build_frames(track_width as i32, snake_len as i32, 1, 20),
            current: 0,
            frame_ms: 60,
            last_advance: Instant::now(),
        }
    }

    pub fn frame_ms(mut self, ms: u64) -> Self {
        self.frame_ms = ms;
        self
    }

    /// Advance if the frame interval has elapsed; returns whether the
    /// visible frame changed.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_advance) < Duration::from_millis(self.frame_ms) {
            return false;
        }
        self.last_advance = now;
        self.current = (self.current + 1) % self.frames.len();
        true
    }

    pub fn frame(&self) -> &str {
        &self.frames[self.current]
    }

    /// Draw the current frame at `(x, y)`, bar in the accent colour
    /// over a dimmed track.
    pub fn draw(&self, surface: &mut Surface, x: u16, y: u16, theme: &Theme) {
        let bar = Style::new().fg(theme.accent).bg(theme.background);
        let track = Style::new()
            .fg(theme.accent.darken(0.5))
            .bg(theme.background);
        for (i, c) in self.frame().chars().enumerate() {
            let style = if c == SNAKE { bar } else { track };
            surface.put_str(x + i as u16, y, &c.to_string(), style);
        }
    }
}

fn build_frames(track_width: i32, snake_len: i32, right_pause: usize, left_pause: usize) -> Vec<String> {
    let mut frames = Vec::new();
    let empty: String = std::iter::repeat(TRACK).take(track_width as usize).collect();

    // Right pass: the bar enters from the left and exits right.
    for head in 0..=(track_width + snake_len - 2) {
        frames.push(snake_frame(track_width, snake_len, head));
    }
    for _ in 0..right_pause {
        frames.push(empty.clone());
    }
    // Left pass, then a long rest before the cycle repeats.
    for head in (0..=(track_width + snake_len - 2)).rev() {
        frames.push(snake_frame(track_width, snake_len, head));
    }
    for _ in 0..left_pause {
        frames.push(empty.clone());
    }
    frames
}

fn snake_frame(track_width: i32, snake_len: i32, head: i32) -> String {
    let tail = head - snake_len + 1;
    (0..track_width)
        .map(|i| if i >= tail && i <= head { SNAKE } else { TRACK })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cover_both_sweeps_and_pauses() {
        let spinner = Spinner::new(8, 6);
        // 13 right + 1 pause + 13 left + 20 rest
        assert_eq!(spinner.frames.len(), 47);
        assert!(spinner.frames.iter().all(|f| f.chars().count() == 8));
    }

    #[test]
    fn bar_is_clipped_at_the_edges() {
        let frames = build_frames(4, 3, 0, 0);
        assert_eq!(frames[0], "■⬝⬝⬝");
        assert_eq!(frames[2], "■■■⬝");
        assert_eq!(frames[5], "⬝⬝⬝■");
    }
}
