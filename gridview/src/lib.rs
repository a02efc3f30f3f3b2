pub mod event;
pub mod input;
pub mod notify;
pub mod rect;
pub mod spinner;
pub mod style;
pub mod surface;
pub mod table;
pub mod terminal;
pub mod text;
pub mod validate;

pub use event::{Event, Key, Modifiers, MouseButton};
pub use input::{InputEvent, InputMask, TextInput};
pub use notify::{Notice, NoticeKind, NoticeQueue};
pub use rect::Rect;
pub use spinner::Spinner;
pub use style::{Rgb, Style, TextStyle, Theme};
pub use surface::{Cell, Surface};
pub use table::{CellValue, Column, Mode, PageRequest, SortState, TableHit, TableState};
pub use terminal::Terminal;
pub use validate::{FieldError, ValidationResult, Validator};
