//! Tests for the selection engine.

use joist::selection::{Selection, SelectionMode};
use joist::value::RowKey;
use serde_json::{Value, json};

fn rows(ids: &[i64]) -> Vec<Value> {
    ids.iter().map(|id| json!({"id": id})).collect()
}

fn keys(selection: &Selection<Value>) -> Vec<RowKey> {
    selection.selected_keys().cloned().collect()
}

fn key(id: i64) -> RowKey {
    RowKey::new(id).unwrap()
}

#[test]
fn test_single_select_twice_clears() {
    let records = rows(&[1, 2, 3]);
    let mut selection = Selection::single();

    let change = selection.toggle(&records[0]);
    assert_eq!(change.added, vec![key(1)]);
    let change = selection.toggle(&records[0]);
    assert_eq!(change.removed, vec![key(1)]);
    assert!(selection.is_empty());
}

#[test]
fn test_single_mode_replaces_selection() {
    let records = rows(&[1, 2, 3]);
    let mut selection = Selection::single();
    selection.toggle(&records[0]);
    let change = selection.toggle(&records[1]);

    assert_eq!(change.added, vec![key(2)]);
    assert_eq!(change.removed, vec![key(1)]);
    assert_eq!(keys(&selection), vec![key(2)]);
}

#[test]
fn test_single_mode_never_exceeds_one() {
    let records = rows(&[1, 2, 3, 4]);
    let mut selection = Selection::single();
    for record in records.iter().chain(records.iter().rev()) {
        selection.toggle(record);
        assert!(selection.len() <= 1);
    }
}

#[test]
fn test_multiple_toggle_preserves_order() {
    let records = rows(&[1, 2, 3]);
    let mut selection = Selection::multiple();
    selection.toggle(&records[2]);
    selection.toggle(&records[0]);
    selection.toggle(&records[1]);
    selection.toggle(&records[0]);

    assert_eq!(keys(&selection), vec![key(3), key(2)]);
}

#[test]
fn test_toggle_round_trip() {
    let records = rows(&[1, 2]);
    let mut selection = Selection::multiple();
    selection.toggle(&records[0]);
    let before = keys(&selection);

    selection.toggle(&records[1]);
    selection.toggle(&records[1]);
    assert_eq!(keys(&selection), before);
}

#[test]
fn test_select_all_adds_missing() {
    let records = rows(&[1, 2, 3]);
    let mut selection = Selection::multiple();
    selection.toggle(&records[0]);
    selection.toggle(&records[1]);

    let change = selection.select_all(&records);
    assert_eq!(change.added, vec![key(3)]);
    assert!(change.removed.is_empty());
    assert_eq!(keys(&selection), vec![key(1), key(2), key(3)]);
    assert!(selection.all_selected(&records));
}

#[test]
fn test_select_all_ignored_in_single_mode() {
    let records = rows(&[1, 2]);
    let mut selection = Selection::single();
    assert!(selection.select_all(&records).is_empty());
    assert!(selection.is_empty());
}

#[test]
fn test_select_all_skips_records_without_identity() {
    let records = vec![json!({"id": 1}), json!({"name": "anon"}), json!({"id": null})];
    let mut selection = Selection::multiple();
    selection.select_all(&records);

    assert_eq!(keys(&selection), vec![key(1)]);
    assert!(!selection.all_selected(&records));
}

#[test]
fn test_deselect_all_both_modes() {
    let records = rows(&[1, 2]);
    let mut multiple = Selection::multiple();
    multiple.select_all(&records);
    assert_eq!(multiple.deselect_all().removed, vec![key(1), key(2)]);
    assert!(multiple.is_empty());

    let mut single = Selection::single();
    single.toggle(&records[1]);
    assert_eq!(single.deselect_all().removed, vec![key(2)]);
}

#[test]
fn test_toggle_without_identity_is_noop() {
    let anon = json!({"name": "anon"});
    let mut selection = Selection::multiple();
    assert!(selection.toggle(&anon).is_empty());
    assert!(!selection.is_selected(&anon));
}

#[test]
fn test_all_selected_false_for_empty_view() {
    let selection: Selection<Value> = Selection::multiple();
    assert!(!selection.all_selected(&Vec::new()));
}

#[test]
fn test_membership_is_by_identity() {
    let mut selection = Selection::multiple();
    selection.toggle(&json!({"id": 7, "name": "old"}));
    assert!(selection.is_selected(&json!({"id": 7, "name": "new"})));
    assert!(!selection.is_selected(&json!({"id": "7"})));
}

#[test]
fn test_custom_row_key_field() {
    let mut selection = Selection::new(SelectionMode::Multiple, "email");
    let record = json!({"id": 1, "email": "a@example.com"});
    selection.toggle(&record);
    assert_eq!(
        selection.selected_keys().next(),
        RowKey::new("a@example.com").as_ref()
    );
}

#[test]
fn test_retain_present_drops_missing_and_refreshes() {
    let mut selection = Selection::multiple();
    selection.toggle(&json!({"id": 1, "name": "Alice"}));
    selection.toggle(&json!({"id": 2, "name": "Bob"}));

    let replaced = vec![json!({"id": 2, "name": "Robert"}), json!({"id": 3})];
    let change = selection.retain_present(&replaced);

    assert_eq!(change.removed, vec![key(1)]);
    assert_eq!(selection.selected(), vec![json!({"id": 2, "name": "Robert"})]);
}
