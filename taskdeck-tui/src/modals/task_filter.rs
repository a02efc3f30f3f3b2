//! Task filter modal: narrows the paged listing by category, name,
//! status and priority. All fields optional; clearing them all drops
//! the filter.

use gridview::{Event, InputEvent, Key, Rect, Surface, TextInput, Theme};
use taskdeck_api::model::{Category, TaskFilter, TaskPriority, TaskStatus};

use crate::widgets::form::{self, FIELD_HEIGHT};
use crate::widgets::Select;

pub enum FilterOutcome {
    Cancelled,
    Apply(Option<TaskFilter>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Category,
    Name,
    Status,
    Priority,
    Apply,
    Clear,
}

const FOCUS_ORDER: [Focus; 6] = [
    Focus::Category,
    Focus::Name,
    Focus::Status,
    Focus::Priority,
    Focus::Apply,
    Focus::Clear,
];

pub struct TaskFilterModal {
    category: Select,
    category_ids: Vec<i64>,
    name: TextInput,
    status: Select,
    priority: Select,
    focus: usize,
}

impl TaskFilterModal {
    pub fn new(categories: &[Category], current: Option<&TaskFilter>) -> Self {
        let mut modal = Self {
            category: Select::new(categories.iter().map(|c| c.name.clone()).collect()),
            category_ids: categories.iter().map(|c| c.id).collect(),
            name: TextInput::new().with_placeholder("Name contains"),
            status: Select::new(TaskStatus::ALL.iter().map(|s| s.label().to_string()).collect()),
            priority: Select::new(
                TaskPriority::ALL.iter().map(|p| p.label().to_string()).collect(),
            ),
            focus: 0,
        };
        if let Some(filter) = current {
            if let Some(id) = filter.category_id {
                let pos = modal.category_ids.iter().position(|&c| c == id);
                modal.category.set_selected(pos);
            }
            if let Some(name) = &filter.name {
                modal.name.set_value(name.clone());
            }
            modal
                .status
                .set_selected(filter.status.map(|s| u8::from(s) as usize));
            modal
                .priority
                .set_selected(filter.priority.map(|p| u8::from(p) as usize));
        }
        modal
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<FilterOutcome> {
        if let Event::Key { key, .. } = event {
            match key {
                Key::Escape => return Some(FilterOutcome::Cancelled),
                Key::Tab => {
                    self.focus = (self.focus + 1) % FOCUS_ORDER.len();
                    return None;
                }
                Key::BackTab => {
                    self.focus = (self.focus + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
                    return None;
                }
                _ => {}
            }
        }

        match FOCUS_ORDER[self.focus] {
            Focus::Name => match self.name.handle_event(event) {
                InputEvent::Submitted => Some(self.apply()),
                InputEvent::Cancelled => Some(FilterOutcome::Cancelled),
                _ => None,
            },
            Focus::Category => {
                self.category.handle_event(event);
                self.apply_on_enter(event)
            }
            Focus::Status => {
                self.status.handle_event(event);
                self.apply_on_enter(event)
            }
            Focus::Priority => {
                self.priority.handle_event(event);
                self.apply_on_enter(event)
            }
            Focus::Apply => self.apply_on_enter(event),
            Focus::Clear => match event {
                Event::Key { key: Key::Enter, .. } => {
                    self.category.clear();
                    self.name.clear();
                    self.status.clear();
                    self.priority.clear();
                    Some(FilterOutcome::Apply(None))
                }
                _ => None,
            },
        }
    }

    fn apply_on_enter(&mut self, event: &Event) -> Option<FilterOutcome> {
        match event {
            Event::Key { key: Key::Enter, .. } => Some(self.apply()),
            _ => None,
        }
    }

    fn apply(&self) -> FilterOutcome {
        let filter = TaskFilter {
            category_id: self
                .category
                .selected()
                .and_then(|i| self.category_ids.get(i).copied()),
            name: Some(self.name.value().to_string()).filter(|n| !n.is_empty()),
            status: self.status.selected().and_then(|i| TaskStatus::ALL.get(i).copied()),
            priority: self
                .priority
                .selected()
                .and_then(|i| TaskPriority::ALL.get(i).copied()),
        };
        FilterOutcome::Apply(Some(filter).filter(|f| !f.is_empty()))
    }

    pub fn draw(&self, surface: &mut Surface, theme: &Theme) {
        let area = surface.area().centered(50, 20);
        let content = form::draw_panel(surface, area, "Filters", theme);
        let focus = FOCUS_ORDER[self.focus];

        let mut y = content.y;
        let field = |y: u16| Rect::new(content.x, y, content.width, FIELD_HEIGHT);

        form::draw_select(
            surface,
            field(y),
            "Category",
            &self.category,
            theme,
            focus == Focus::Category,
        );
        y += FIELD_HEIGHT;
        form::draw_input(surface, field(y), "Name", &self.name, theme, focus == Focus::Name);
        y += FIELD_HEIGHT;
        form::draw_select(
            surface,
            field(y),
            "Status",
            &self.status,
            theme,
            focus == Focus::Status,
        );
        y += FIELD_HEIGHT;
        form::draw_select(
            surface,
            field(y),
            "Priority",
            &self.priority,
            theme,
            focus == Focus::Priority,
        );

        let buttons_y = area.bottom() - 2;
        let clear_w = form::draw_button(
            surface,
            content.x,
            buttons_y,
            "Clear",
            theme,
            focus == Focus::Clear,
        );
        form::draw_button(
            surface,
            content.x + clear_w + 2,
            buttons_y,
            "Apply",
            theme,
            focus == Focus::Apply,
        );
    }
}
