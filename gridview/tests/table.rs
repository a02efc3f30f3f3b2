use std::cell::RefCell;
use std::rc::Rc;

use gridview::table::{CellValue, Column, Mode, PageRequest, TableState};

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: i64,
    name: &'static str,
}

fn items(pairs: &[(i64, &'static str)]) -> Vec<Item> {
    pairs.iter().map(|&(id, name)| Item { id, name }).collect()
}

fn id_column() -> Column<Item> {
    Column::new("id", |r: &Item| r.id.into()).width(8)
}

fn name_column() -> Column<Item> {
    Column::new("name", |r: &Item| r.name.into()).width(20)
}

fn visible_ids(state: &TableState<Item>) -> Vec<i64> {
    state.visible_rows().iter().map(|r| r.id).collect()
}

#[test]
fn test_sort_cycle_returns_to_unsorted_after_three_clicks() {
    let mut state = TableState::new(Mode::Client, vec![id_column(), name_column()]);
    state.toggle_sort("id");
    assert_eq!(state.sort().ascending(), Some(false));
    state.toggle_sort("id");
    assert_eq!(state.sort().ascending(), Some(true));
    state.toggle_sort("id");
    assert!(state.sort().is_unsorted());
}

#[test]
fn test_descending_first_worked_example() {
    let mut state = TableState::new(Mode::Client, vec![id_column(), name_column()]);
    state.set_rows(items(&[(2, "b"), (1, "a")]));

    state.toggle_sort("id");
    assert_eq!(visible_ids(&state), vec![2, 1]);

    state.toggle_sort("id");
    assert_eq!(visible_ids(&state), vec![1, 2]);

    state.toggle_sort("id");
    assert_eq!(visible_ids(&state), vec![2, 1]);
}

#[test]
fn test_client_sort_is_stable_among_equal_values() {
    let mut state = TableState::new(Mode::Client, vec![id_column(), name_column()]);
    state.set_rows(items(&[(1, "first"), (2, "dup"), (2, "dup2"), (0, "last")]));

    state.toggle_sort("id");
    state.toggle_sort("id"); // ascending
    let names: Vec<&str> = state.visible_rows().iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["last", "first", "dup", "dup2"]);

    state.toggle_sort("id");
    state.toggle_sort("id"); // descending again
    let names: Vec<&str> = state.visible_rows().iter().map(|r| r.name).collect();
    // Ties keep insertion order in both directions.
    assert_eq!(names, vec!["dup", "dup2", "first", "last"]);
}

#[test]
fn test_client_pagination_slices_and_covers_all_rows() {
    let mut state =
        TableState::new(Mode::Client, vec![id_column(), name_column()]).with_pagination(4);
    let data: Vec<Item> = (0..10).map(|i| Item { id: i, name: "row" }).collect();
    state.set_rows(data);

    assert_eq!(state.page_count(), 3);
    let mut seen = 0;
    loop {
        let page = state.visible_rows();
        assert!(page.len() <= 4);
        seen += page.len();
        if !state.can_next_page() {
            break;
        }
        state.next_page();
    }
    assert_eq!(seen, 10);
}

#[test]
fn test_sorting_does_not_reset_the_page() {
    let mut state =
        TableState::new(Mode::Client, vec![id_column(), name_column()]).with_pagination(3);
    state.set_rows((0..9).map(|i| Item { id: i, name: "r" }).collect());
    state.next_page();
    assert_eq!(state.page().page_index(), 1);
    state.toggle_sort("id");
    assert_eq!(state.page().page_index(), 1);
}

#[test]
fn test_server_mode_passes_rows_through_untouched() {
    let requests: Rc<RefCell<Vec<PageRequest>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    let mut state = TableState::new(Mode::Server, vec![id_column(), name_column()])
        .with_pagination(10)
        .on_page_change(move |req| sink.borrow_mut().push(req));

    // The caller supplies one pre-sorted page; the engine must not
    // reorder or slice it.
    state.set_rows(items(&[(5, "e"), (3, "c"), (9, "i")]));
    state.set_total_rows(30);

    state.toggle_sort("id");
    assert_eq!(visible_ids(&state), vec![5, 3, 9]);

    state.next_page();
    assert_eq!(visible_ids(&state), vec![5, 3, 9]);

    let requests = requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0],
        PageRequest {
            page_index: 0,
            page_size: 10,
            sort_column: "id".to_string(),
            sort_ascending: Some(false),
        }
    );
    assert_eq!(requests[1].page_index, 1);
    assert_eq!(requests[1].sort_column, "id");
}

#[test]
fn test_callback_reports_empty_column_when_unsorted() {
    let requests: Rc<RefCell<Vec<PageRequest>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    let mut state = TableState::new(Mode::Server, vec![id_column()])
        .with_pagination(10)
        .on_page_change(move |req| sink.borrow_mut().push(req));
    state.set_total_rows(5);

    state.toggle_sort("id");
    state.toggle_sort("id");
    state.toggle_sort("id"); // back to unsorted

    let last = requests.borrow().last().cloned().unwrap();
    assert_eq!(last.sort_column, "");
    assert_eq!(last.sort_ascending, None);
}

#[test]
fn test_refresh_refires_with_current_state() {
    let requests: Rc<RefCell<Vec<PageRequest>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    let mut state = TableState::new(Mode::Server, vec![id_column()])
        .with_pagination(10)
        .on_page_change(move |req| sink.borrow_mut().push(req));
    state.set_total_rows(25);
    state.next_page();

    state.refresh();

    let requests = requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[test]
fn test_page_count_and_button_enablement() {
    let mut state =
        TableState::new(Mode::Server, vec![id_column(), name_column()]).with_pagination(10);
    state.set_total_rows(0);
    assert_eq!(state.display_page_count(), 1);
    assert!(!state.can_prev_page());
    assert!(!state.can_next_page());

    state.set_total_rows(25);
    assert_eq!(state.page_count(), 3);
    assert!(!state.can_prev_page());
    assert!(state.can_next_page());

    state.next_page();
    assert!(state.can_prev_page());
    assert!(state.can_next_page());

    state.next_page();
    assert!(!state.can_next_page());
    state.next_page(); // clamped
    assert_eq!(state.page().page_index(), 2);
}

#[test]
fn test_loading_suppresses_rows() {
    let mut state = TableState::new(Mode::Client, vec![id_column()]);
    state.set_rows(items(&[(1, "a"), (2, "b")]));
    state.set_loading(true);
    assert!(state.visible_rows().is_empty());
    state.set_loading(false);
    assert_eq!(state.visible_rows().len(), 2);
}

#[test]
fn test_unsortable_and_synthetic_columns_ignore_sort() {
    let columns = vec![
        id_column().sortable(false),
        Column::synthetic("actions").header("Actions"),
    ];
    let mut state = TableState::new(Mode::Client, columns);
    state.set_rows(items(&[(2, "b"), (1, "a")]));

    state.toggle_sort("id");
    assert!(state.sort().is_unsorted());
    state.toggle_sort("actions");
    assert!(state.sort().is_unsorted());
    assert_eq!(visible_ids(&state), vec![2, 1]);
}

#[test]
fn test_empty_cells_sort_before_values() {
    let column = Column::new("due", |r: &Option<i64>| {
        r.map(CellValue::Int).unwrap_or(CellValue::Empty)
    });
    let mut state = TableState::new(Mode::Client, vec![column]);
    state.set_rows(vec![Some(3), None, Some(1)]);

    state.toggle_sort("due");
    state.toggle_sort("due"); // ascending
    let rows: Vec<Option<i64>> = state.visible_rows().iter().map(|r| **r).collect();
    assert_eq!(rows, vec![None, Some(1), Some(3)]);
}

#[test]
fn test_last_column_stretches_to_fill() {
    let state = TableState::new(Mode::Client, vec![id_column(), name_column()]);
    // 8 for "id", 1 handle cell, remainder to "name".
    let widths = state.layout_widths(40);
    assert_eq!(widths, vec![8, 31]);
}

#[test]
fn test_resize_is_clamped_and_last_column_fixed() {
    let columns = vec![
        id_column().min_width(5).max_width(12),
        name_column(),
    ];
    let mut state = TableState::new(Mode::Client, columns);

    state.begin_resize(0, 10);
    state.drag_resize(30); // way past max
    assert_eq!(state.column_widths()[0], 12);
    state.drag_resize(0); // way past min
    assert_eq!(state.column_widths()[0], 5);
    state.end_resize();
    assert!(!state.resizing());

    // The stretch column has no handle.
    state.begin_resize(1, 10);
    assert!(!state.resizing());
}

#[test]
fn test_zero_page_size_degrades_without_panic() {
    let mut state =
        TableState::new(Mode::Client, vec![id_column()]).with_pagination(0);
    state.set_rows(items(&[(1, "a")]));
    assert_eq!(state.page_count(), 0);
    assert_eq!(state.display_page_count(), 1);
    assert!(state.visible_rows().is_empty());
    state.next_page();
    assert_eq!(state.page().page_index(), 0);
}
