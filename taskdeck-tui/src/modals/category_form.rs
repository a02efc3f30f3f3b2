//! Add/edit category modal.

use gridview::{Event, InputEvent, Key, Rect, Surface, TextInput, Theme, Validator};
use taskdeck_api::model::{Category, CategoryPayload};

use crate::widgets::form::{self, FIELD_HEIGHT};

pub enum CategoryFormOutcome {
    Cancelled,
    Submit(CategoryPayload),
}

pub struct CategoryForm {
    id: Option<i64>,
    name: TextInput,
}

impl CategoryForm {
    pub fn new() -> Self {
        Self {
            id: None,
            name: TextInput::new().with_placeholder("Enter the name"),
        }
    }

    pub fn edit(category: &Category) -> Self {
        let mut f = Self::new();
        f.id = Some(category.id);
        f.name.set_value(category.name.clone());
        f
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<CategoryFormOutcome> {
        if let Event::Key { key: Key::Escape, .. } = event {
            return Some(CategoryFormOutcome::Cancelled);
        }
        self.name.clear_error();
        match self.name.handle_event(event) {
            InputEvent::Submitted => self.submit(),
            InputEvent::Cancelled => Some(CategoryFormOutcome::Cancelled),
            _ => None,
        }
    }

    fn submit(&mut self) -> Option<CategoryFormOutcome> {
        let mut v = Validator::new();
        v.field("name", self.name.value())
            .required("Name is required")
            .max_length(128, "Name must be at most 128 characters");
        let result = v.finish();

        if let Some(message) = result.error_for("name") {
            self.name.set_error(message);
            return None;
        }

        Some(CategoryFormOutcome::Submit(CategoryPayload {
            id: self.id,
            name: self.name.value().to_string(),
        }))
    }

    pub fn draw(&self, surface: &mut Surface, theme: &Theme) {
        let area = surface.area().centered(44, 10);
        let title = if self.is_edit() {
            "Edit Category"
        } else {
            "Add Category"
        };
        let content = form::draw_panel(surface, area, title, theme);

        form::draw_input(
            surface,
            Rect::new(content.x, content.y, content.width, FIELD_HEIGHT),
            "Name",
            &self.name,
            theme,
            true,
        );

        let y = area.bottom() - 2;
        let save = if self.is_edit() { "Update" } else { "Create" };
        let cancel_w = form::draw_button(surface, content.x, y, "Cancel (esc)", theme, false);
        form::draw_button(surface, content.x + cancel_w + 2, y, save, theme, true);
    }
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self::new()
    }
}
