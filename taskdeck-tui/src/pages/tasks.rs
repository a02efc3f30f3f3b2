//! Tasks page: a server-mode paged table over `Task/getPaged`, with
//! add/edit, delete and filter modals.

use gridview::table::{self, CellValue, Column, Mode, PageRequest, TableHit, TableState};
use gridview::{Event, Key, Rect, Style, Surface, Theme};
use log::info;
use taskdeck_api::envelope::Paged;
use taskdeck_api::model::{Category, Task, TaskFilter, TaskOrderBy};
use taskdeck_api::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::{Ctx, Route};
use crate::modals::confirm::ConfirmModal;
use crate::modals::task_filter::{FilterOutcome, TaskFilterModal};
use crate::modals::task_form::{FormOutcome, TaskForm};
use crate::msg::AppMsg;
use crate::pages::report;

const PAGE_SIZE: usize = 9;

enum Modal {
    None,
    Form(TaskForm),
    Delete(ConfirmModal, i64),
    Filter(TaskFilterModal),
}

pub struct TasksPage {
    table: TableState<Task>,
    /// Table area from the last draw, for hit testing.
    area: Rect,
    selected: Option<usize>,
    filter: Option<TaskFilter>,
    categories: Vec<Category>,
    modal: Modal,
}

impl TasksPage {
    pub fn new(tx: UnboundedSender<AppMsg>) -> Self {
        let table = TableState::new(Mode::Server, columns())
            .with_pagination(PAGE_SIZE)
            .on_page_change(move |request| {
                // Routed through the event loop so the fetch can pick
                // up the page's current filter.
                let _ = tx.send(AppMsg::TaskPageRequest(request));
            });
        Self {
            table,
            area: Rect::new(0, 0, 0, 0),
            selected: None,
            filter: None,
            categories: Vec::new(),
            modal: Modal::None,
        }
    }

    /// Entering the page refetches the category list (for the form
    /// selects) and the current task page.
    pub fn enter(&mut self, ctx: &mut Ctx<'_>) {
        let client = ctx.client.clone();
        let tx = ctx.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppMsg::CategoriesLoaded(client.categories().await));
        });
        self.table.refresh();
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    /// Fired by the table's pagination callback.
    pub fn start_fetch(&mut self, ctx: &mut Ctx<'_>, request: PageRequest) {
        info!(
            "fetching tasks page={} size={} sort={:?}/{:?}",
            request.page_index, request.page_size, request.sort_column, request.sort_ascending
        );
        self.table.set_loading(true);
        self.selected = None;

        let ordering = TaskOrderBy::from_sort(&request.sort_column, request.sort_ascending);
        let filter = self.filter.clone();
        let client = ctx.client.clone();
        let tx = ctx.tx.clone();
        tokio::spawn(async move {
            let result = client
                .tasks_paged(
                    request.page_index + 1,
                    request.page_size,
                    filter.as_ref(),
                    ordering,
                )
                .await;
            let _ = tx.send(AppMsg::TasksLoaded(result));
        });
    }

    pub fn on_tasks_loaded(
        &mut self,
        ctx: &mut Ctx<'_>,
        result: Result<Paged<Task>, Error>,
    ) -> Option<Route> {
        self.table.set_loading(false);
        match result {
            Ok(page) => {
                self.table.set_total_rows(page.count);
                self.table.set_rows(page.items);
                None
            }
            Err(e) => report(ctx, &e),
        }
    }

    pub fn on_task_saved(&mut self, ctx: &mut Ctx<'_>, result: Result<(), Error>) -> Option<Route> {
        match result {
            Ok(()) => {
                ctx.notices.success("Task saved");
                self.modal = Modal::None;
                self.table.refresh();
                None
            }
            Err(e) => report(ctx, &e),
        }
    }

    pub fn on_task_deleted(
        &mut self,
        ctx: &mut Ctx<'_>,
        result: Result<(), Error>,
    ) -> Option<Route> {
        match result {
            Ok(()) => {
                ctx.notices.success("Task deleted");
                self.modal = Modal::None;
                self.table.refresh();
                None
            }
            Err(e) => {
                self.modal = Modal::None;
                report(ctx, &e)
            }
        }
    }

    pub fn handle_event(&mut self, ctx: &mut Ctx<'_>, event: &Event) -> Option<Route> {
        match &mut self.modal {
            Modal::Form(form) => {
                match form.handle_event(event) {
                    Some(FormOutcome::Cancelled) => self.modal = Modal::None,
                    Some(FormOutcome::Submit(payload)) => {
                        let client = ctx.client.clone();
                        let tx = ctx.tx.clone();
                        let editing = payload.id.is_some();
                        tokio::spawn(async move {
                            let result = if editing {
                                client.update_task(&payload).await
                            } else {
                                client.create_task(&payload).await
                            };
                            let _ = tx.send(AppMsg::TaskSaved(result));
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
                            let _ = tx.send(AppMsg::TaskDeleted(client.delete_task(id).await));
                        });
                    }
                    Some(false) => self.modal = Modal::None,
                    None => {}
                }
                return None;
            }
            Modal::Filter(modal) => {
                match modal.handle_event(event) {
                    Some(FilterOutcome::Cancelled) => self.modal = Modal::None,
                    Some(FilterOutcome::Apply(filter)) => {
                        self.filter = filter;
                        self.modal = Modal::None;
                        self.table.refresh();
                    }
                    None => {}
                }
                return None;
            }
            Modal::None => {}
        }

        if let Event::Key { key, .. } = event {
            match key {
                Key::Char('a') => {
                    self.modal = Modal::Form(TaskForm::new(&self.categories));
                    return None;
                }
                Key::Char('e') | Key::Enter => {
                    if let Some(task) = self.selected_task() {
                        self.modal = Modal::Form(TaskForm::edit(&task, &self.categories));
                    }
                    return None;
                }
                Key::Char('d') => {
                    if let Some(task) = self.selected_task() {
                        let confirm =
                            ConfirmModal::new(format!("Delete task '{}'?", task.name))
                                .title("Delete Task");
                        self.modal = Modal::Delete(confirm, task.id);
                    }
                    return None;
                }
                Key::Char('f') => {
                    self.modal =
                        Modal::Filter(TaskFilterModal::new(&self.categories, self.filter.as_ref()));
                    return None;
                }
                Key::Char('r') => {
                    self.table.refresh();
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

    fn selected_task(&self) -> Option<Task> {
        let rows = self.table.visible_rows();
        self.selected
            .and_then(|i| rows.get(i))
            .map(|task| (*task).clone())
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
            "Tasks",
            Style::new().fg(theme.primary).bg(theme.background).bold(),
        );
        let hints = "a add  e edit  d delete  f filters  r refresh";
        surface.put_str(
            area.x + 8,
            area.y,
            hints,
            Style::new().fg(theme.muted).bg(theme.background),
        );
        if self.filter.is_some() {
            surface.put_str(
                area.right().saturating_sub(10),
                area.y,
                "[filtered]",
                Style::new().fg(theme.warning).bg(theme.background),
            );
        }

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
            Modal::Filter(modal) => modal.draw(surface, theme),
            Modal::None => {}
        }
    }

    pub fn modal_open(&self) -> bool {
        !matches!(self.modal, Modal::None)
    }
}

fn columns() -> Vec<Column<Task>> {
    vec![
        Column::new("id", |t: &Task| t.id.into()).header("Id").width(6),
        Column::new("name", |t: &Task| t.name.as_str().into())
            .header("Name")
            .width(30),
        Column::new("status", |t: &Task| t.status.label().into())
            .header("Status")
            .sortable(false)
            .width(12),
        Column::new("priority", |t: &Task| i64::from(u8::from(t.priority)).into())
            .header("Priority")
            .width(10)
            .render(|_, t| t.priority.label().to_string()),
        Column::new("dueDate", |t: &Task| t.due_date.into())
            .header("Due Date")
            .width(12)
            .render(|value, _| match value {
                CellValue::Empty => "None".to_string(),
                other => other.display(),
            }),
        Column::synthetic("actions")
            .header("")
            .width(14)
            .render(|_, _| "e edit  d del".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_api::model::{TaskPriority, TaskStatus};

    fn task() -> Task {
        Task {
            id: 1,
            name: "Write report".to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            category_id: 1,
        }
    }

    #[test]
    fn test_actions_column_shows_key_hints_and_never_sorts() {
        let columns = columns();
        let actions = columns.iter().find(|c| c.key() == "actions").unwrap();
        assert!(!actions.is_sortable());
        assert_eq!(actions.display(&task()), "e edit  d del");
    }

    #[test]
    fn test_due_date_renders_none_when_absent() {
        let columns = columns();
        let due = columns.iter().find(|c| c.key() == "dueDate").unwrap();
        assert_eq!(due.display(&task()), "None");
    }

    #[test]
    fn test_status_column_is_not_sortable() {
        let columns = columns();
        let status = columns.iter().find(|c| c.key() == "status").unwrap();
        assert!(!status.is_sortable());
    }
}
