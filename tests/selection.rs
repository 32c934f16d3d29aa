//! Tests for selection tracking and observer notification.

use std::sync::{Arc, Mutex};

use tablekit::components::DataTable;
use tablekit::model::{Column, Row};

fn person(id: &str, name: &str) -> Row {
    Row::new(id).set("name", name)
}

fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| person(&format!("r-{i}"), &format!("person {i}")))
        .collect()
}

fn columns() -> Vec<Column> {
    vec![Column::new("name", "Name").sortable()]
}

#[test]
fn test_toggle_adds_then_removes() {
    let table = DataTable::new();
    table.configure(rows(3), columns(), 10);

    table.toggle_row(1);
    assert_eq!(table.selected_ids(), vec!["r-1"]);

    table.toggle_row(1);
    assert!(table.selected_ids().is_empty());
}

#[test]
fn test_toggle_out_of_range_is_ignored() {
    let table = DataTable::new();
    table.configure(rows(3), columns(), 10);

    table.toggle_row(7);
    assert!(table.selected_ids().is_empty());
}

#[test]
fn test_select_all_replaces_partial_selection() {
    let table = DataTable::new();
    table.configure(rows(3), columns(), 10);

    table.toggle_row(0);
    table.toggle_row(2);
    assert_eq!(table.selected_rows().len(), 2);
    assert!(!table.is_all_selected());

    // Partial selection: select-all is a full replace, not a union
    table.select_all();
    assert_eq!(table.selected_ids(), vec!["r-0", "r-1", "r-2"]);
    assert!(table.is_all_selected());
}

#[test]
fn test_select_all_on_full_page_clears() {
    let table = DataTable::new();
    table.configure(rows(3), columns(), 10);

    table.select_all();
    assert!(table.is_all_selected());

    table.select_all();
    assert!(table.selected_ids().is_empty());
    assert!(!table.is_all_selected());
}

#[test]
fn test_select_all_is_involutive_on_stable_page() {
    let table = DataTable::new();
    table.configure(rows(5), columns(), 10);

    table.toggle_row(1);
    let before = table.selected_ids();

    table.select_all();
    table.select_all();
    assert_eq!(table.selected_ids(), before);
}

#[test]
fn test_is_all_selected_false_on_empty_page() {
    let table = DataTable::new();
    table.configure(Vec::new(), columns(), 10);
    assert!(!table.is_all_selected());
}

#[test]
fn test_selection_survives_page_navigation() {
    let table = DataTable::new();
    table.configure(rows(25), columns(), 10);

    table.toggle_row(0);
    assert_eq!(table.selected_rows().len(), 1);

    // Stored IDs persist, but they resolve to nothing on another page
    table.request_page(2);
    assert!(table.selected_rows().is_empty());
    assert_eq!(table.selected_ids(), vec!["r-0"]);

    table.request_page(1);
    assert_eq!(table.selected_rows().len(), 1);
    assert_eq!(table.selected_rows()[0].id(), "r-0");
}

#[test]
fn test_selection_survives_sorting() {
    let table = DataTable::new();
    table.configure(
        vec![person("1", "b"), person("2", "a"), person("3", "c")],
        columns(),
        10,
    );

    table.toggle_row(0); // row id "1"
    table.request_sort("name");

    // The same row is still selected even though its position changed
    let selected = table.selected_rows();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id(), "1");
}

#[test]
fn test_selection_changes_notify_observer() {
    let table = DataTable::new();
    table.configure(rows(3), columns(), 10);

    let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    table.on_selection_change(move |selected| {
        let ids = selected.iter().map(|r| r.id().to_string()).collect();
        sink.lock().unwrap().push(ids);
    });

    table.toggle_row(0);
    table.toggle_row(1);
    table.toggle_row(0);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], vec!["r-0"]);
    assert_eq!(seen[1], vec!["r-0", "r-1"]);
    assert_eq!(seen[2], vec!["r-1"]);
}

#[test]
fn test_page_view_changes_notify_observer() {
    let table = DataTable::new();
    table.configure(rows(25), columns(), 10);
    table.toggle_row(0);

    let notifications = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&notifications);
    table.on_selection_change(move |_| {
        *sink.lock().unwrap() += 1;
    });

    table.request_page(2); // page view changed
    table.request_page(2); // clamped to the same page, no change
    table.request_sort("name"); // page view changed

    assert_eq!(*notifications.lock().unwrap(), 2);
}

#[test]
fn test_dataset_replacement_notifies_with_empty_selection() {
    let table = DataTable::new();
    table.configure(rows(3), columns(), 10);
    table.toggle_row(0);

    let last: Arc<Mutex<Option<usize>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&last);
    table.on_selection_change(move |selected| {
        *sink.lock().unwrap() = Some(selected.len());
    });

    table.configure(rows(3), columns(), 10);
    assert_eq!(*last.lock().unwrap(), Some(0));
}

#[test]
fn test_row_activation_delivers_full_row() {
    let table = DataTable::new();
    table.configure(rows(3), columns(), 10);

    let activated: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&activated);
    table.on_row_activate(move |row| {
        sink.lock().unwrap().push(row.id().to_string());
    });

    table.toggle_row(1); // selection does not affect activation
    table.activate_row(2);
    table.activate_row(9); // out of range, ignored

    assert_eq!(*activated.lock().unwrap(), vec!["r-2"]);
}
