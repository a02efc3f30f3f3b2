//! Input events, translated from crossterm into the small set the
//! widgets care about.

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// High-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key {
        key: Key,
        modifiers: Modifiers,
    },
    Click {
        x: u16,
        y: u16,
        button: MouseButton,
    },
    /// Mouse moved while a button is held.
    Drag {
        x: u16,
        y: u16,
        button: MouseButton,
    },
    Release {
        x: u16,
        y: u16,
        button: MouseButton,
    },
    Scroll {
        x: u16,
        y: u16,
        delta: i16,
    },
    Resize {
        width: u16,
        height: u16,
    },
}

impl Event {
    /// Translate a crossterm event; returns `None` for events the UI
    /// does not consume (key releases, focus changes, ...).
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, MouseEventKind};

        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key {
                key: translate_key(key.code)?,
                modifiers: translate_modifiers(key.modifiers),
            }),
            CtEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(btn) => Some(Event::Click {
                    x: mouse.column,
                    y: mouse.row,
                    button: translate_button(btn),
                }),
                MouseEventKind::Drag(btn) => Some(Event::Drag {
                    x: mouse.column,
                    y: mouse.row,
                    button: translate_button(btn),
                }),
                MouseEventKind::Up(btn) => Some(Event::Release {
                    x: mouse.column,
                    y: mouse.row,
                    button: translate_button(btn),
                }),
                MouseEventKind::ScrollUp => Some(Event::Scroll {
                    x: mouse.column,
                    y: mouse.row,
                    delta: -1,
                }),
                MouseEventKind::ScrollDown => Some(Event::Scroll {
                    x: mouse.column,
                    y: mouse.row,
                    delta: 1,
                }),
                _ => None,
            },
            CtEvent::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }
}

fn translate_key(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::F(n) => Some(Key::F(n)),
        _ => None,
    }
}

fn translate_modifiers(mods: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers;
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

fn translate_button(btn: crossterm::event::MouseButton) -> MouseButton {
    use crossterm::event::MouseButton as CtBtn;
    match btn {
        CtBtn::Left => MouseButton::Left,
        CtBtn::Right => MouseButton::Right,
        CtBtn::Middle => MouseButton::Middle,
    }
}
