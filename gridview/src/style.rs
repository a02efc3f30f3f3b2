//! Colors, text attributes and the application theme.

/// 24-bit terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale towards black by `amount` (0.0 = unchanged, 1.0 = black).
    pub fn darken(self, amount: f32) -> Self {
        let f = (1.0 - amount).clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * f) as u8,
            g: (self.g as f32 * f) as u8,
            b: (self.b as f32 * f) as u8,
        }
    }
}

/// Text attributes applied per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            italic: false,
            underline: false,
        }
    }

    pub const fn bold() -> Self {
        Self {
            bold: true,
            ..Self::new()
        }
    }

    pub const fn dim() -> Self {
        Self {
            dim: true,
            ..Self::new()
        }
    }
}

/// Combined foreground/background/attribute style.
#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub text: TextStyle,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.text.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.text.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.text.underline = true;
        self
    }
}

/// Named colors shared by every screen.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub primary: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub error: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::new(16, 18, 24),
            surface: Rgb::new(30, 33, 43),
            text: Rgb::new(220, 222, 228),
            muted: Rgb::new(130, 135, 150),
            primary: Rgb::new(97, 140, 255),
            accent: Rgb::new(137, 180, 250),
            success: Rgb::new(100, 190, 120),
            warning: Rgb::new(230, 190, 90),
            error: Rgb::new(235, 100, 100),
        }
    }
}
