//! Categories page: the full list is fetched once and the table
//! sorts and pages it locally.

use gridview::table::{self, Column, Mode, TableHit, TableState};
use gridview::{Event, Key, Rect, Style, Surface, Theme};
use taskdeck_api::model::Category;
use taskdeck_api::Error;

use crate::app::{Ctx, Route};
use crate::modals::category_form::{CategoryForm, CategoryFormOutcome};
use crate::modals::confirm::ConfirmModal;
use crate::pages::report;

const PAGE_SIZE: usize = 9;

enum Modal {
    None,
    Form(CategoryForm),
    Delete(ConfirmModal, i64),
}

pub struct CategoriesPage {
    table: TableState<Category>,
    area: Rect,
    selected: Option<usize>,
    modal: Modal,
}

impl CategoriesPage {
    pub fn new() -> Self {
        let table = TableState::new(Mode::Client, columns()).with_pagination(PAGE_SIZE);
        Self {
            table,
            area: Rect::new(0, 0, 0, 0),
            selected: None,
            modal: Modal::None,
        }
    }

    pub fn enter(&mut self, ctx: &mut Ctx<'_>) {
        self.fetch(ctx);
    }

    fn fetch(&mut self, ctx: &mut Ctx<'_>) {
        self.table.set_loading(true);
        self.selected = None;
        let client = ctx.client.clone();
        let tx = ctx.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(crate::msg::AppMsg::CategoriesLoaded(
                client.categories().await,
            ));
        });
    }

    pub fn on_categories_loaded(
        &mut self,
        ctx: &mut Ctx<'_>,
        result: Result<Vec<Category>, Error>,
    ) -> Option<Route> {
        self.table.set_loading(false);
        match result {
            Ok(categories) => {
                self.table.set_rows(categories);
                None
            }
            Err(e) => report(ctx, &e),
        }
    }

    pub fn on_category_saved(
        &mut self,
        ctx: &mut Ctx<'_>,
        result: Result<(), Error>,
    ) -> Option<Route> {
        match result {
            Ok(()) => {
                ctx.notices.success("Category saved");
                self.modal = Modal::None;
                self.fetch(ctx);
                None
            }
            Err(e) => report(ctx, &e),
        }
    }

    pub fn on_category_deleted(
        &mut self,
        ctx: &mut Ctx<'_>,
        result: Result<(), Error>,
    ) -> Option<Route> {
        self.modal = Modal::None;
        match result {
            Ok(()) => {
                ctx.notices.success("Category deleted");
                self.fetch(ctx);
                None
            }
            Err(e) => report(ctx, &e),
        }
    }

    pub fn handle_event(&mut self, ctx: &mut Ctx<'_>, event: &Event) -> Option<Route> {
        match &mut self.modal {
            Modal::Form(form) => {
                match form.handle_event(event) {
                    Some(CategoryFormOutcome::Cancelled) => self.modal = Modal::None,
                    Some(CategoryFormOutcome::Submit(payload)) => {
                        let client = ctx.client.clone();
                        let tx = ctx.tx.clone();
                        let editing = payload.id.is_some();
                        tokio::spawn(async move {
                            let result = if editing {
                                client.update_category(&payload).await
                            } else {
                                client.create_category(&payload).await
                            };
                            let _ = tx.send(crate::msg::AppMsg::CategorySaved(result));
                        });
                    }
                    None => {}
                }
                return None;
            }
            Modal::Delete(confirm, id) => {
                match confirm.handle_event(event) {
                    Some(true) => {
                        let id = *id;
                        let client = ctx.client.clone();
                        let tx = ctx.tx.clone();
                        tokio::spawn(async move {
                            let _ = tx.send(crate::msg::AppMsg::CategoryDeleted(
                                client.delete_category(id).await,
                            ));
                        });
                    }
                    Some(false) => self.modal = Modal::None,
                    None => {}
                }
                return None;
            }
            Modal::None => {}
        }

        if let Event::Key { key, .. } = event {
            match key {
                Key::Char('a') => {
                    self.modal = Modal::Form(CategoryForm::new());
                    return None;
                }
                Key::Char('e') | Key::Enter => {
                    if let Some(category) = self.selected_category() {
                        self.modal = Modal::Form(CategoryForm::edit(&category));
                    }
                    return None;
                }
                Key::Char('d') => {
                    if let Some(category) = self.selected_category() {
                        let confirm =
                            ConfirmModal::new(format!("Delete category '{}'?", category.name))
                                .title("Delete Category");
                        self.modal = Modal::Delete(confirm, category.id);
                    }
                    return None;
                }
                Key::Char('r') => {
                    self.fetch(ctx);
                    return None;
                }
                Key::Up => {
                    self.move_selection(-1);
                    return None;
                }
                Key::Down => {
                    self.move_selection(1);
                    return None;
                }
                _ => {}
            }
        }

        if let TableHit::Row(i) = table::handle_event(&mut self.table, self.area, event) {
            self.selected = Some(i);
        }
        None
    }

    fn selected_category(&self) -> Option<Category> {
        let rows = self.table.visible_rows();
        self.selected
            .and_then(|i| rows.get(i))
            .map(|category| (*category).clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.table.visible_rows().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.map(|i| i as isize).unwrap_or(-1);
        let next = (current + delta).clamp(0, len as isize - 1);
        self.selected = Some(next as usize);
    }

    pub fn draw(
        &mut self,
        surface: &mut Surface,
        area: Rect,
        theme: &Theme,
        spinner_frame: Option<&str>,
    ) {
        surface.put_str(
            area.x,
            area.y,
            "Categories",
            Style::new().fg(theme.primary).bg(theme.background).bold(),
        );
        surface.put_str(
            area.x + 13,
            area.y,
            "a add  e edit  d delete  r refresh",
            Style::new().fg(theme.muted).bg(theme.background),
        );

        self.area = Rect::new(
            area.x + 2,
            area.y + 2,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );
        table::draw(surface, self.area, &self.table, theme, spinner_frame);

        if let Some(i) = self.selected {
            let y = self.area.y + 1 + i as u16;
            if y < self.area.bottom() {
                surface.put_str(
                    area.x,
                    y,
                    "▸",
                    Style::new().fg(theme.accent).bg(theme.background),
                );
            }
        }

        match &self.modal {
            Modal::Form(form) => form.draw(surface, theme),
            Modal::Delete(confirm, _) => confirm.draw(surface, theme),
            Modal::None => {}
        }
    }

    pub fn modal_open(&self) -> bool {
        !matches!(self.modal, Modal::None)
    }
}

fn columns() -> Vec<Column<Category>> {
    vec![
        Column::new("id", |c: &Category| c.id.into()).header("Id").width(6),
        Column::new("name", |c: &Category| c.name.as_str().into())
            .header("Name")
            .width(36),
        Column::synthetic("actions")
            .header("")
            .width(14)
            .render(|_, _| "e edit  d del".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_column_shows_key_hints_and_never_sorts() {
        let columns = columns();
        let actions = columns.iter().find(|c| c.key() == "actions").unwrap();
        assert!(!actions.is_sortable());
        let row = Category {
            id: 1,
            name: "Work".to_string(),
        };
        assert_eq!(actions.display(&row), "e edit  d del");
    }
}
