//! Add/edit task modal.

use gridview::{Event, InputMask, Key, Rect, Surface, TextInput, Theme, Validator};
use taskdeck_api::model::{Category, Task, TaskPayload, TaskPriority, TaskStatus};

use crate::widgets::form::{self, FIELD_HEIGHT};
use crate::widgets::Select;

/// What a routed event did to the form.
pub enum FormOutcome {
    Cancelled,
    Submit(TaskPayload),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    Category,
    Description,
    DueDate,
    Status,
    Priority,
    Save,
    Cancel,
}

const FOCUS_ORDER: [Focus; 8] = [
    Focus::Name,
    Focus::Category,
    Focus::Description,
    Focus::DueDate,
    Focus::Status,
    Focus::Priority,
    Focus::Save,
    Focus::Cancel,
];

pub struct TaskForm {
    id: Option<i64>,
    name: TextInput,
    category: Select,
    category_ids: Vec<i64>,
    description: TextInput,
    due_date: TextInput,
    status: Select,
    priority: Select,
    focus: usize,
}

impl TaskForm {
    pub fn new(categories: &[Category]) -> Self {
        Self {
            id: None,
            name: TextInput::new().with_placeholder("Enter the name"),
            category: Select::new(categories.iter().map(|c| c.name.clone()).collect())
                .required()
                .with_placeholder("Select a category"),
            category_ids: categories.iter().map(|c| c.id).collect(),
            description: TextInput::new().with_placeholder("Enter the description"),
            due_date: TextInput::new().with_mask(InputMask::Date),
            status: Select::new(TaskStatus::ALL.iter().map(|s| s.label().to_string()).collect())
                .required(),
            priority: Select::new(
                TaskPriority::ALL.iter().map(|p| p.label().to_string()).collect(),
            )
            .required(),
            focus: 0,
        }
    }

    pub fn edit(task: &Task, categories: &[Category]) -> Self {
        let mut f = Self::new(categories);
        f.id = Some(task.id);
        f.name.set_value(task.name.clone());
        f.description
            .set_value(task.description.clone().unwrap_or_default());
        if let Some(due) = task.due_date {
            f.due_date.set_value(due.format("%d/%m/%Y").to_string());
        }
        f.status.set_selected(Some(u8::from(task.status) as usize));
        f.priority
            .set_selected(Some(u8::from(task.priority) as usize));
        if let Some(pos) = f.category_ids.iter().position(|&id| id == task.category_id) {
            f.category.set_selected(Some(pos));
        }
        f
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<FormOutcome> {
        if let Event::Key { key, .. } = event {
            match key {
                Key::Escape => return Some(FormOutcome::Cancelled),
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
            Focus::Name | Focus::Description | Focus::DueDate => {
                use gridview::InputEvent;
                let input = match FOCUS_ORDER[self.focus] {
                    Focus::Name => &mut self.name,
                    Focus::Description => &mut self.description,
                    _ => &mut self.due_date,
                };
                input.clear_error();
                match input.handle_event(event) {
                    InputEvent::Submitted => self.submit(),
                    InputEvent::Cancelled => Some(FormOutcome::Cancelled),
                    _ => None,
                }
            }
            Focus::Category => {
                self.category.handle_event(event);
                self.submit_on_enter(event)
            }
            Focus::Status => {
                self.status.handle_event(event);
                self.submit_on_enter(event)
            }
            Focus::Priority => {
                self.priority.handle_event(event);
                self.submit_on_enter(event)
            }
            Focus::Save => self.submit_on_enter(event),
            Focus::Cancel => match event {
                Event::Key { key: Key::Enter, .. } => Some(FormOutcome::Cancelled),
                _ => None,
            },
        }
    }

    fn submit_on_enter(&mut self, event: &Event) -> Option<FormOutcome> {
        match event {
            Event::Key { key: Key::Enter, .. } => self.submit(),
            _ => None,
        }
    }

    fn submit(&mut self) -> Option<FormOutcome> {
        let mut v = Validator::new();
        v.field("name", self.name.value())
            .required("Name is required")
            .max_length(128, "Name must be at most 128 characters");
        v.field("description", self.description.value())
            .max_length(100_000, "Description must be at most 100000 characters");
        let result = v.finish();

        if let Some(message) = result.error_for("name") {
            self.name.set_error(message);
        }
        if let Some(message) = result.error_for("description") {
            self.description.set_error(message);
        }
        if self.category.selected().is_none() {
            self.category.set_error("Category is required");
        }
        if !self.due_date.is_valid_date() {
            self.due_date.set_error("Invalid date");
        }

        let category_id = self
            .category
            .selected()
            .and_then(|i| self.category_ids.get(i).copied());
        let status = self.status.selected().and_then(|i| TaskStatus::ALL.get(i));
        let priority = self
            .priority
            .selected()
            .and_then(|i| TaskPriority::ALL.get(i));

        if !result.is_valid() || !self.due_date.is_valid_date() {
            return None;
        }
        let (Some(category_id), Some(&status), Some(&priority)) = (category_id, status, priority)
        else {
            return None;
        };

        Some(FormOutcome::Submit(TaskPayload {
            id: self.id,
            name: self.name.value().to_string(),
            description: Some(self.description.value().to_string())
                .filter(|d| !d.is_empty()),
            status,
            priority,
            due_date: self.due_date.date_value(),
            category_id,
        }))
    }

    pub fn draw(&self, surface: &mut Surface, theme: &Theme) {
        let area = surface.area().centered(54, 26);
        let title = if self.is_edit() { "Edit Task" } else { "Add Task" };
        let content = form::draw_panel(surface, area, title, theme);
        let focus = FOCUS_ORDER[self.focus];

        let mut y = content.y;
        let field = |y: u16| Rect::new(content.x, y, content.width, FIELD_HEIGHT);

        form::draw_input(surface, field(y), "Name", &self.name, theme, focus == Focus::Name);
        y += FIELD_HEIGHT;
        form::draw_select(
            surface,
            field(y),
            "Category",
            &self.category,
            theme,
            focus == Focus::Category,
        );
        y += FIELD_HEIGHT;
        form::draw_input(
            surface,
            field(y),
            "Description",
            &self.description,
            theme,
            focus == Focus::Description,
        );
        y += FIELD_HEIGHT;
        form::draw_input(
            surface,
            field(y),
            "Due Date",
            &self.due_date,
            theme,
            focus == Focus::DueDate,
        );
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
        let save_label = if self.is_edit() { "Update" } else { "Create" };
        let cancel_w = form::draw_button(
            surface,
            content.x,
            buttons_y,
            "Cancel",
            theme,
            focus == Focus::Cancel,
        );
        form::draw_button(
            surface,
            content.x + cancel_w + 2,
            buttons_y,
            save_label,
            theme,
            focus == Focus::Save,
        );
    }
}
