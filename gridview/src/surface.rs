//! Double-bufferable cell grid the widgets render into.

use crate::rect::Rect;
use crate::style::{Rgb, Style, TextStyle};
use crate::text::char_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub text: TextStyle,
    /// Occupied by the wide character in the cell to the left.
    pub wide_tail: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::new(220, 222, 228),
            bg: Rgb::new(16, 18, 24),
            text: TextStyle::new(),
            wide_tail: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[self.index(x, y)])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Fill a rectangle with spaces in the given style.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let cell = self.styled_cell(' ', style);
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                let idx = self.index(x, y);
                self.cells[idx] = cell;
            }
        }
    }

    /// Write a string starting at `(x, y)`, clipped to the surface.
    /// Returns the number of cells written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }
        let mut cx = x;
        for ch in s.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if cx >= self.width || cx + w > self.width {
                break;
            }
            let cell = self.styled_cell(ch, style);
            let idx = self.index(cx, y);
            self.cells[idx] = cell;
            if w == 2 {
                let idx = self.index(cx + 1, y);
                self.cells[idx] = Cell {
                    ch: ' ',
                    wide_tail: true,
                    ..cell
                };
            }
            cx += w;
        }
        cx - x
    }

    fn styled_cell(&self, ch: char, style: Style) -> Cell {
        let base = Cell::default();
        Cell {
            ch,
            fg: style.fg.unwrap_or(base.fg),
            bg: style.bg.unwrap_or(base.bg),
            text: style.text,
            wide_tail: false,
        }
    }

    /// Cells that differ from `other`, in row-major order.
    pub fn diff<'a>(&'a self, other: &'a Surface) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_edge() {
        let mut s = Surface::new(4, 1);
        let written = s.put_str(2, 0, "abcd", Style::new());
        assert_eq!(written, 2);
        assert_eq!(s.get(2, 0).unwrap().ch, 'a');
        assert_eq!(s.get(3, 0).unwrap().ch, 'b');
    }

    #[test]
    fn wide_chars_mark_tail_cells() {
        let mut s = Surface::new(4, 1);
        s.put_str(0, 0, "漢", Style::new());
        assert_eq!(s.get(0, 0).unwrap().ch, '漢');
        assert!(s.get(1, 0).unwrap().wide_tail);
    }

    #[test]
    fn diff_reports_only_changes() {
        let a = Surface::new(3, 1);
        let mut b = Surface::new(3, 1);
        b.put_str(1, 0, "x", Style::new());
        let changes: Vec<_> = b.diff(&a).collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, 1);
    }
}
