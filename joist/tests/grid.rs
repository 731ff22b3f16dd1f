//! Tests for the DataGrid controller.

use std::sync::{Arc, Mutex};

use joist::prelude::*;
use serde_json::{Value, json};

fn columns() -> Vec<Column<Value>> {
    vec![
        Column::field("ID", "id").sortable(),
        Column::field("Name", "name"),
        Column::computed("Email", |row: &Value| {
            format!("mailto:{}", row["email"].as_str().unwrap_or_default())
        }),
        Column::field("Age", "age").sortable(),
    ]
}

fn records() -> Vec<Value> {
    vec![
        json!({"id": 1, "name": "Alice", "email": "alice@example.com", "age": 24}),
        json!({"id": 2, "name": "Bob", "email": "bob@example.com", "age": 29}),
        json!({"id": 3, "name": "Charlie", "email": "charlie@example.com", "age": 22}),
    ]
}

fn multi_grid() -> DataGrid<Value> {
    DataGrid::with_rows(columns(), records()).with_config(
        GridConfig::new()
            .selectable(true)
            .selection_mode(SelectionMode::Multiple),
    )
}

fn ids(rows: &[Value]) -> Vec<i64> {
    rows.iter().filter_map(|r| r["id"].as_i64()).collect()
}

#[test]
fn test_header_activation_sorts_and_flips() {
    let grid = DataGrid::with_rows(columns(), records());

    assert_eq!(grid.activate(GridTarget::Header(3)), EventResult::Consumed);
    assert_eq!(ids(&grid.sorted_records()), vec![3, 1, 2]);
    assert_eq!(grid.sort_indicator(3), SortIndicator::Ascending);
    assert_eq!(grid.header_label(3).as_deref(), Some("Age ▲"));

    grid.activate(GridTarget::Header(3));
    assert_eq!(ids(&grid.sorted_records()), vec![2, 1, 3]);
    assert_eq!(grid.header_label(3).as_deref(), Some("Age ▼"));
    assert_eq!(grid.header_label(0).as_deref(), Some("ID"));
}

#[test]
fn test_unsortable_headers_are_ignored() {
    let grid = DataGrid::with_rows(columns(), records());
    assert_eq!(grid.activate(GridTarget::Header(1)), EventResult::Ignored);
    assert_eq!(grid.activate(GridTarget::Header(2)), EventResult::Ignored);
    assert_eq!(grid.activate(GridTarget::Header(9)), EventResult::Ignored);
    assert_eq!(grid.sort_directive(), None);
}

#[test]
fn test_row_activation_uses_sorted_position() {
    let grid = multi_grid();
    grid.request_sort(3);

    grid.activate(GridTarget::Row(0));
    assert_eq!(ids(&grid.selected()), vec![3]);
    assert!(grid.is_selected_at(0));
    assert!(!grid.is_selected_at(1));
}

#[test]
fn test_selection_survives_resort() {
    let grid = multi_grid();
    grid.activate(GridTarget::Row(0));
    grid.request_sort(3);
    grid.request_sort(3);

    assert!(grid.is_selected(&records()[0]));
    assert!(grid.is_selected_at(1));
}

#[test]
fn test_select_all_scenario() {
    let grid = multi_grid();
    grid.activate(GridTarget::Row(0));
    grid.activate(GridTarget::Row(1));
    assert!(!grid.all_selected());

    assert_eq!(grid.activate(GridTarget::SelectAll), EventResult::Consumed);
    assert_eq!(ids(&grid.selected()), vec![1, 2, 3]);
    assert!(grid.all_selected());

    grid.activate(GridTarget::SelectAll);
    assert!(grid.selected().is_empty());
}

#[test]
fn test_select_all_ignored_in_single_mode() {
    let grid = DataGrid::with_rows(columns(), records())
        .with_config(GridConfig::new().selectable(true));
    assert_eq!(grid.activate(GridTarget::SelectAll), EventResult::Ignored);
    assert!(grid.selected().is_empty());
}

#[test]
fn test_single_mode_select_twice_clears() {
    let grid = DataGrid::with_rows(columns(), records())
        .with_config(GridConfig::new().selectable(true));
    grid.activate(GridTarget::Row(0));
    grid.activate(GridTarget::Row(1));
    assert_eq!(ids(&grid.selected()), vec![2]);
    grid.activate(GridTarget::Row(1));
    assert!(grid.selected().is_empty());
}

#[test]
fn test_keyboard_matches_pointer() {
    let pointer = multi_grid();
    let keyboard = multi_grid();

    pointer.activate(GridTarget::Header(3));
    pointer.activate(GridTarget::Row(1));
    pointer.activate(GridTarget::Row(2));

    keyboard.on_key(GridTarget::Header(3), &KeyCombo::key(Key::Enter));
    keyboard.on_key(GridTarget::Row(1), &KeyCombo::key(Key::Space));
    keyboard.on_key(GridTarget::Row(2), &KeyCombo::key(Key::Enter));

    assert_eq!(pointer.sort_directive(), keyboard.sort_directive());
    assert_eq!(pointer.selected(), keyboard.selected());
}

#[test]
fn test_other_keys_ignored() {
    let grid = multi_grid();
    assert_eq!(
        grid.on_key(GridTarget::Row(0), &KeyCombo::key(Key::Char('x'))),
        EventResult::Ignored
    );
    assert_eq!(
        grid.on_key(GridTarget::Row(0), &KeyCombo::key(Key::Enter).ctrl()),
        EventResult::Ignored
    );
    assert!(grid.selected().is_empty());
}

#[test]
fn test_loading_ignores_everything() {
    let grid = multi_grid();
    grid.set_loading(true);

    assert_eq!(grid.status(), GridStatus::Loading);
    assert_eq!(grid.status().placeholder(), Some("Loading..."));
    assert!(!grid.is_interactive());
    assert_eq!(grid.activate(GridTarget::Header(0)), EventResult::Ignored);
    assert_eq!(grid.activate(GridTarget::Row(0)), EventResult::Ignored);
    assert_eq!(grid.activate(GridTarget::SelectAll), EventResult::Ignored);
    assert_eq!(grid.sort_directive(), None);
    assert!(grid.selected().is_empty());
}

#[test]
fn test_empty_grid_ignores_everything() {
    let grid = DataGrid::new(columns())
        .with_config(GridConfig::new().selectable(true).selection_mode(SelectionMode::Multiple));

    assert_eq!(grid.status(), GridStatus::Empty);
    assert_eq!(grid.status().placeholder(), Some("No data available"));
    assert_eq!(grid.activate(GridTarget::Header(0)), EventResult::Ignored);
    assert_eq!(grid.activate(GridTarget::SelectAll), EventResult::Ignored);
    assert!(!grid.all_selected());
}

#[test]
fn test_not_selectable_still_sorts() {
    let grid = DataGrid::with_rows(columns(), records());
    assert_eq!(grid.activate(GridTarget::Row(0)), EventResult::Ignored);
    assert_eq!(grid.activate(GridTarget::Header(0)), EventResult::Consumed);
}

#[test]
fn test_out_of_range_row_ignored() {
    let grid = multi_grid();
    assert_eq!(grid.activate(GridTarget::Row(3)), EventResult::Ignored);
    assert!(grid.selected().is_empty());
}

#[test]
fn test_observer_receives_full_selection() {
    let seen: Arc<Mutex<Vec<Vec<i64>>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let grid = multi_grid().on_selection_change(move |rows| {
        sink.lock().unwrap().push(ids(rows));
    });

    grid.activate(GridTarget::Row(0));
    grid.activate(GridTarget::Row(2));
    grid.activate(GridTarget::Row(0));
    grid.activate(GridTarget::Header(0));

    assert_eq!(*seen.lock().unwrap(), vec![vec![1], vec![1, 3], vec![3]]);
}

#[test]
fn test_observer_sees_committed_state() {
    let grid = multi_grid();
    let seen: Arc<Mutex<Vec<(usize, bool)>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let handle = grid.clone();
    grid.set_on_selection_change(move |rows| {
        sink.lock()
            .unwrap()
            .push((handle.selected().len(), rows.len() == handle.selected().len()));
    });

    grid.activate(GridTarget::SelectAll);
    assert_eq!(*seen.lock().unwrap(), vec![(3, true)]);
    assert!(grid.is_dirty());
}

#[test]
fn test_observer_can_reenter() {
    let grid = multi_grid();
    let handle = grid.clone();
    grid.set_on_selection_change(move |rows| {
        // Keep at most one row selected
        if rows.len() > 1 {
            handle.toggle(&rows[0]);
        }
    });

    grid.activate(GridTarget::Row(0));
    grid.activate(GridTarget::Row(1));
    assert_eq!(ids(&grid.selected()), vec![2]);
}

#[test]
fn test_set_records_drops_vanished_selection() {
    let seen: Arc<Mutex<Vec<usize>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let grid = multi_grid().on_selection_change(move |rows| {
        sink.lock().unwrap().push(rows.len());
    });
    grid.activate(GridTarget::SelectAll);

    grid.set_records(records().into_iter().skip(1).collect());
    assert_eq!(ids(&grid.selected()), vec![2, 3]);
    assert_eq!(*seen.lock().unwrap(), vec![3, 2]);
    assert!(grid.all_selected());
}

#[test]
fn test_set_columns_clears_stale_sort() {
    let grid = DataGrid::with_rows(columns(), records());
    grid.request_sort(3);
    grid.set_columns(columns().into_iter().take(2).collect());
    assert_eq!(grid.sort_directive(), None);
    assert_eq!(ids(&grid.sorted_records()), vec![1, 2, 3]);
}

#[test]
fn test_cell_text_in_sorted_order() {
    let grid = DataGrid::with_rows(columns(), records());
    grid.request_sort(3);
    assert_eq!(grid.cell_text(0, 1).as_deref(), Some("Charlie"));
    assert_eq!(grid.cell_text(0, 2).as_deref(), Some("mailto:charlie@example.com"));
    assert_eq!(grid.cell_text(0, 3).as_deref(), Some("22"));
    assert_eq!(grid.cell_text(5, 0), None);
}

#[test]
fn test_with_view_composes_rows() {
    let grid = multi_grid();
    grid.activate(GridTarget::Row(1));
    let flags = grid.with_view(|rows| rows.iter().map(|r| r.is_selected).collect::<Vec<_>>());
    assert_eq!(flags, vec![false, true, false]);
}

#[test]
fn test_mode_change_resets_selection() {
    let grid = multi_grid();
    grid.activate(GridTarget::SelectAll);
    grid.set_config(grid.config().selection_mode(SelectionMode::Single));
    assert!(grid.selected().is_empty());
    assert_eq!(grid.selection_mode(), SelectionMode::Single);
}

#[test]
fn test_try_new_rejects_blank_row_key() {
    let result = DataGrid::try_new(columns(), records(), GridConfig::new().row_key_field(" "));
    assert!(matches!(result, Err(JoistError::InvalidConfig(_))));
}

#[test]
fn test_dirty_tracking() {
    let grid = multi_grid();
    grid.clear_dirty();
    grid.activate(GridTarget::Row(0));
    assert!(grid.is_dirty());
    grid.clear_dirty();
    assert!(!grid.is_dirty());
    grid.activate(GridTarget::Header(1));
    assert!(!grid.is_dirty());
}

#[test]
fn test_ids_are_unique() {
    let a = DataGrid::<Value>::new(columns());
    let b = DataGrid::<Value>::new(columns());
    assert_ne!(a.id(), b.id());
    assert!(a.id_string().starts_with("__grid_"));
    assert_eq!(a.clone().id(), a.id());
}
