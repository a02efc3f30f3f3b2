use gridview::table::{self, Column, Mode, TableHit, TableState};
use gridview::{Event, MouseButton, Rect, Surface, Theme};

#[derive(Debug)]
struct Row {
    id: i64,
    name: &'static str,
}

fn state() -> TableState<Row> {
    let columns = vec![
        Column::new("id", |r: &Row| r.id.into()).header("ID").width(6),
        Column::new("name", |r: &Row| r.name.into()).header("Name"),
    ];
    let mut state = TableState::new(Mode::Client, columns).with_pagination(10);
    state.set_rows(vec![
        Row { id: 1, name: "alpha" },
        Row { id: 2, name: "beta" },
    ]);
    state
}

fn row_text(surface: &Surface, y: u16) -> String {
    (0..surface.width())
        .filter_map(|x| surface.get(x, y))
        .filter(|c| !c.wide_tail)
        .map(|c| c.ch)
        .collect()
}

fn click(x: u16, y: u16) -> Event {
    Event::Click {
        x,
        y,
        button: MouseButton::Left,
    }
}

#[test]
fn test_header_shows_sort_glyph_on_active_column() {
    let mut state = state();
    let area = Rect::new(0, 0, 30, 10);
    let mut surface = Surface::new(30, 10);

    table::draw(&mut surface, area, &state, &Theme::default(), None);
    let header = row_text(&surface, 0);
    assert!(header.contains("ID"));
    assert!(!header.contains('▼'));

    state.toggle_sort("id");
    table::draw(&mut surface, area, &state, &Theme::default(), None);
    assert!(row_text(&surface, 0).contains("▼ ID"));

    state.toggle_sort("id");
    table::draw(&mut surface, area, &state, &Theme::default(), None);
    assert!(row_text(&surface, 0).contains("▲ ID"));
}

#[test]
fn test_body_renders_cell_values() {
    let state = state();
    let mut surface = Surface::new(30, 10);
    table::draw(
        &mut surface,
        Rect::new(0, 0, 30, 10),
        &state,
        &Theme::default(),
        None,
    );
    assert!(row_text(&surface, 1).contains('1'));
    assert!(row_text(&surface, 1).contains("alpha"));
    assert!(row_text(&surface, 2).contains("beta"));
}

#[test]
fn test_loading_replaces_rows_with_placeholder() {
    let mut state = state();
    state.set_loading(true);
    let mut surface = Surface::new(30, 10);
    table::draw(
        &mut surface,
        Rect::new(0, 0, 30, 10),
        &state,
        &Theme::default(),
        Some("■■■⬝⬝"),
    );
    assert!(!row_text(&surface, 1).contains("alpha"));
    assert!(row_text(&surface, 1).contains("■■■⬝⬝"));
}

#[test]
fn test_pagination_bar_shows_page_of_total() {
    let mut state = state();
    state.set_rows((0..25).map(|i| Row { id: i, name: "r" }).collect());
    let mut surface = Surface::new(30, 10);
    table::draw(
        &mut surface,
        Rect::new(0, 0, 30, 10),
        &state,
        &Theme::default(),
        None,
    );
    let bar = row_text(&surface, 9);
    assert!(bar.contains("[<]"));
    assert!(bar.contains("Page 1 of 3"));
    assert!(bar.contains("[>]"));
}

#[test]
fn test_hit_test_addresses_headers_handles_and_rows() {
    let state = state();
    let area = Rect::new(0, 0, 30, 10);

    assert_eq!(table::hit_test(&state, area, 2, 0), TableHit::Header(0));
    // The handle cell sits right after the first column's 6 cells.
    assert_eq!(table::hit_test(&state, area, 6, 0), TableHit::ResizeHandle(0));
    assert_eq!(table::hit_test(&state, area, 10, 0), TableHit::Header(1));
    assert_eq!(table::hit_test(&state, area, 5, 1), TableHit::Row(0));
    assert_eq!(table::hit_test(&state, area, 5, 2), TableHit::Row(1));
    assert_eq!(table::hit_test(&state, area, 5, 5), TableHit::Outside);
    assert_eq!(table::hit_test(&state, area, 50, 0), TableHit::Outside);
}

#[test]
fn test_click_on_header_sorts_and_click_on_buttons_pages() {
    let mut state = state();
    state.set_rows((0..25).map(|i| Row { id: i, name: "r" }).collect());
    let area = Rect::new(0, 0, 30, 10);

    assert_eq!(
        table::handle_event(&mut state, area, &click(2, 0)),
        TableHit::Header(0)
    );
    assert_eq!(state.sort().column(), "id");

    assert_eq!(
        table::hit_test(&state, area, 0, 9),
        TableHit::PrevPage
    );
    table::handle_event(&mut state, area, &click(0, 9));
    assert_eq!(state.page().page_index(), 0); // disabled at first page

    let next_x = 3 + 1 + "Page 1 of 3".len() as u16 + 1;
    assert_eq!(
        table::handle_event(&mut state, area, &click(next_x, 9)),
        TableHit::NextPage
    );
    assert_eq!(state.page().page_index(), 1);
}

#[test]
fn test_pagination_buttons_are_inert_while_loading() {
    let mut state = state();
    state.set_rows((0..25).map(|i| Row { id: i, name: "r" }).collect());
    let area = Rect::new(0, 0, 30, 10);
    state.set_loading(true);

    let next_x = 3 + 1 + "Page 1 of 3".len() as u16 + 1;
    assert_eq!(table::hit_test(&state, area, 0, 9), TableHit::Outside);
    assert_eq!(table::hit_test(&state, area, next_x, 9), TableHit::Outside);

    table::handle_event(&mut state, area, &click(next_x, 9));
    assert_eq!(state.page().page_index(), 0);

    state.set_loading(false);
    assert_eq!(
        table::hit_test(&state, area, next_x, 9),
        TableHit::NextPage
    );
}

#[test]
fn test_drag_resizes_the_grabbed_column() {
    let mut state = state();
    let area = Rect::new(0, 0, 30, 10);

    table::handle_event(&mut state, area, &click(6, 0));
    assert!(state.resizing());
    table::handle_event(
        &mut state,
        area,
        &Event::Drag {
            x: 9,
            y: 0,
            button: MouseButton::Left,
        },
    );
    assert_eq!(state.column_widths()[0], 9);
    table::handle_event(
        &mut state,
        area,
        &Event::Release {
            x: 9,
            y: 0,
            button: MouseButton::Left,
        },
    );
    assert!(!state.resizing());
}
