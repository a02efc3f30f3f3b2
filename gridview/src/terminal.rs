//! Terminal driver: raw mode, alternate screen, mouse capture and
//! diff-based flushing of a [`Surface`].

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::style::{Rgb, TextStyle};
use crate::surface::Surface;
use crate::text::char_width;

pub struct Terminal {
    stdout: io::Stdout,
    current: Surface,
    previous: Surface,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current: Surface::new(width, height),
            previous: Surface::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Start a frame: resync with the terminal size and hand out a
    /// cleared surface to draw into.
    pub fn frame(&mut self) -> io::Result<&mut Surface> {
        let (width, height) = terminal::size()?;
        if width != self.current.width() || height != self.current.height() {
            self.current = Surface::new(width, height);
            self.previous = Surface::new(width, height);
            // Force a full repaint after resize.
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        self.current.clear();
        Ok(&mut self.current)
    }

    /// Write the cells that changed since the previous frame.
    pub fn flush(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Rgb::new(255, 255, 255);
        let mut last_bg = Rgb::new(0, 0, 0);
        let mut last_text = TextStyle::new();

        execute!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            // The wide char to the left already painted this cell.
            if cell.wide_tail {
                continue;
            }

            if y != last_y || x != last_x + last_char_width {
                execute!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.fg != last_fg {
                execute!(self.stdout, SetForegroundColor(ct_color(cell.fg)))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                execute!(self.stdout, SetBackgroundColor(ct_color(cell.bg)))?;
                last_bg = cell.bg;
            }
            apply_text_style(&mut self.stdout, last_text, cell.text)?;
            last_text = cell.text;

            write!(self.stdout, "{}", cell.ch)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.ch).max(1) as u16;
        }

        execute!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;

        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }
}

fn ct_color(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Emit only the attribute transitions between two text styles.
fn apply_text_style(stdout: &mut io::Stdout, from: TextStyle, to: TextStyle) -> io::Result<()> {
    use Attribute::{Bold, Dim, Italic, NoItalic, NoUnderline, NormalIntensity, Underlined};

    let transitions = [
        (from.bold, to.bold, Bold, NormalIntensity),
        (from.dim, to.dim, Dim, NormalIntensity),
        (from.italic, to.italic, Italic, NoItalic),
        (from.underline, to.underline, Underlined, NoUnderline),
    ];
    for (was, now, on, off) in transitions {
        if was != now {
            execute!(stdout, SetAttribute(if now { on } else { off }))?;
        }
    }
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
