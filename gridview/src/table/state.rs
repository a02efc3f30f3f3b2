//! The table engine: composes columns, sort and pagination state
//! against the row data and notifies the caller of page changes.

use log::debug;

use super::column::{CellValue, Column};
use super::page::PageState;
use super::sort::SortState;

/// Fallback width for columns that specify none.
pub(super) const DEFAULT_COLUMN_WIDTH: u16 = 16;
/// Hard floor so a drag can never collapse a column entirely.
pub(super) const MIN_COLUMN_WIDTH: u16 = 4;

/// Who performs the sorting/paging arithmetic. Fixed for the lifetime
/// of a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Sort and slice the full in-memory data array locally.
    Client,
    /// Trust the caller to supply one pre-sorted page; only track
    /// state and fire the page-change callback.
    Server,
}

/// Payload of the pagination-change callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based.
    pub page_index: usize,
    pub page_size: usize,
    /// Active sort column key, empty string when unsorted.
    pub sort_column: String,
    /// `None` when unsorted, else `true` for ascending.
    pub sort_ascending: Option<bool>,
}

type PageCallback = Box<dyn FnMut(PageRequest)>;

struct ResizeDrag {
    column: usize,
    grab_x: u16,
    start_width: u16,
}

/// State and computation for one table instance.
///
/// Owned by a single page and mutated only through its own event
/// handlers; all transitions are synchronous.
pub struct TableState<R> {
    mode: Mode,
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    widths: Vec<u16>,
    sort: SortState,
    page: PageState,
    with_pagination: bool,
    total_rows: usize,
    loading: bool,
    drag: Option<ResizeDrag>,
    on_page_change: Option<PageCallback>,
}

impl<R> TableState<R> {
    pub fn new(mode: Mode, columns: Vec<Column<R>>) -> Self {
        let widths = columns
            .iter()
            .map(|c| clamp_width(c, c.width.unwrap_or(DEFAULT_COLUMN_WIDTH)))
            .collect();
        Self {
            mode,
            columns,
            rows: Vec::new(),
            widths,
            sort: SortState::new(),
            page: PageState::new(10),
            with_pagination: false,
            total_rows: 0,
            loading: false,
            drag: None,
            on_page_change: None,
        }
    }

    /// Enable pagination with the given page size.
    pub fn with_pagination(mut self, page_size: usize) -> Self {
        self.with_pagination = true;
        self.page = PageState::new(page_size);
        self
    }

    /// Register the callback fired on every sort/page change while
    /// pagination is enabled. Server-mode callers refetch from it.
    pub fn on_page_change(mut self, callback: impl FnMut(PageRequest) + 'static) -> Self {
        self.on_page_change = Some(Box::new(callback));
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Replace the data array. Never mutates or reorders the rows
    /// themselves.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    /// Total row count across all pages (server mode).
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn paginated(&self) -> bool {
        self.with_pagination
    }

    /// Enable or disable pagination; (re)enabling resets to page 0.
    pub fn set_paginated(&mut self, enabled: bool) {
        if enabled {
            self.page.set_page_index(0);
        }
        self.with_pagination = enabled;
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    /// Force the page-change callback to fire again with the current
    /// state. Callers use this to refetch after a mutation (e.g. a
    /// delete) without touching page or sort.
    pub fn refresh(&mut self) {
        debug!("table refresh requested");
        self.emit();
    }

    /// Total rows the pagination arithmetic runs over.
    fn total(&self) -> usize {
        match self.mode {
            Mode::Client => self.rows.len(),
            Mode::Server => self.total_rows,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page.page_count(self.total())
    }

    pub fn display_page_count(&self) -> usize {
        self.page.display_page_count(self.total())
    }

    pub fn can_prev_page(&self) -> bool {
        self.page.page_index() > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page.page_index() + 1 < self.page_count()
    }

    pub fn prev_page(&mut self) {
        if self.page.prev() {
            self.emit();
        }
    }

    pub fn next_page(&mut self) {
        let total = self.total();
        if self.page.next(total) {
            self.emit();
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page.set_page_size(page_size);
        self.emit();
    }

    /// Advance the sort cycle for a column key. No-op for unknown or
    /// unsortable columns. The page index is deliberately left alone.
    pub fn toggle_sort(&mut self, key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key() == key && c.is_sortable());
        if !sortable {
            return;
        }
        self.sort.toggle(key);
        debug!(
            "sort changed: column={:?} ascending={:?}",
            self.sort.column(),
            self.sort.ascending()
        );
        self.emit();
    }

    fn emit(&mut self) {
        if !self.with_pagination {
            return;
        }
        let request = PageRequest {
            page_index: self.page.page_index(),
            page_size: self.page.page_size(),
            sort_column: self.sort.column().to_string(),
            sort_ascending: self.sort.ascending(),
        };
        if let Some(callback) = self.on_page_change.as_mut() {
            callback(request);
        }
    }

    /// The render-ready row projection for the current page.
    ///
    /// Client mode sorts (stable) and slices; server mode returns the
    /// supplied rows untouched. Empty while loading.
    pub fn visible_rows(&self) -> Vec<&R> {
        if self.loading {
            return Vec::new();
        }
        match self.mode {
            Mode::Server => self.rows.iter().collect(),
            Mode::Client => {
                let mut order: Vec<usize> = (0..self.rows.len()).collect();
                if let Some(key) = self.sort.active() {
                    if let Some(col) = self
                        .columns
                        .iter()
                        .find(|c| c.key() == key.column && c.is_sortable())
                    {
                        let values: Vec<CellValue> =
                            self.rows.iter().map(|r| col.value(r)).collect();
                        // Vec::sort_by is stable; ties keep their
                        // original relative order in both directions.
                        order.sort_by(|&a, &b| {
                            let ord = values[a].compare(&values[b]);
                            if key.descending {
                                ord.reverse()
                            } else {
                                ord
                            }
                        });
                    }
                }
                let iter = order.into_iter().map(|i| &self.rows[i]);
                if self.with_pagination {
                    iter.skip(self.page.offset())
                        .take(self.page.page_size())
                        .collect()
                } else {
                    iter.collect()
                }
            }
        }
    }

    // -------------------------------------------------------------
    // Column sizing
    // -------------------------------------------------------------

    /// Current stored column widths (before last-column stretching).
    pub fn column_widths(&self) -> &[u16] {
        &self.widths
    }

    /// Effective widths for an `available`-cell-wide viewport: every
    /// column keeps its stored width except the last, which stretches
    /// to fill whatever remains past the resize handles.
    pub fn layout_widths(&self, available: u16) -> Vec<u16> {
        let count = self.columns.len();
        if count == 0 {
            return Vec::new();
        }
        let handles = (count - 1) as u16;
        let fixed: u16 = self.widths[..count - 1].iter().sum();
        let mut widths = self.widths[..count - 1].to_vec();
        let last = available
            .saturating_sub(fixed)
            .saturating_sub(handles)
            .max(MIN_COLUMN_WIDTH);
        widths.push(last);
        widths
    }

    /// Start dragging the resize handle after column `index`. The last
    /// column has no handle and ignores the request.
    pub fn begin_resize(&mut self, index: usize, grab_x: u16) {
        if index + 1 >= self.columns.len() {
            return;
        }
        self.drag = Some(ResizeDrag {
            column: index,
            grab_x,
            start_width: self.widths[index],
        });
    }

    /// Update the dragged column's width from the pointer position,
    /// clamped to the column's min/max bounds.
    pub fn drag_resize(&mut self, x: u16) {
        let Some(drag) = &self.drag else {
            return;
        };
        let delta = x as i32 - drag.grab_x as i32;
        let raw = (drag.start_width as i32 + delta).max(0) as u16;
        let width = clamp_width(&self.columns[drag.column], raw);
        self.widths[drag.column] = width;
    }

    pub fn end_resize(&mut self) {
        self.drag = None;
    }

    pub fn resizing(&self) -> bool {
        self.drag.is_some()
    }
}

fn clamp_width<R>(column: &Column<R>, width: u16) -> u16 {
    let min = column.min_width.unwrap_or(MIN_COLUMN_WIDTH).max(1);
    let mut width = width.max(min);
    if let Some(max) = column.max_width {
        width = width.min(max.max(min));
    }
    width
}
