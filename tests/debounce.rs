//! Tests for the debounced search commit, under a paused Tokio clock.

use std::time::Duration;

use tablekit::components::DataTable;
use tablekit::model::{Column, Row};

fn person(id: &str, name: &str) -> Row {
    Row::new(id).set("name", name)
}

fn sample_table() -> DataTable {
    let table = DataTable::new();
    table.configure(
        vec![
            person("1", "alpha"),
            person("2", "beta"),
            person("3", "alphabet"),
        ],
        vec![Column::new("name", "Name").sortable()],
        10,
    );
    table
}

#[tokio::test(start_paused = true)]
async fn test_input_is_visible_immediately_but_commits_late() {
    let table = sample_table();

    table.set_search_input("alpha");
    assert_eq!(table.search_input(), "alpha");
    assert_eq!(table.committed_term(), "");
    assert_eq!(table.processed_len(), 3); // filter not applied yet

    tokio::time::sleep(Duration::from_millis(310)).await;
    assert_eq!(table.committed_term(), "alpha");
    assert_eq!(table.processed_len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_keystrokes_commits_once_with_last_value() {
    let table = sample_table();

    table.set_search_input("a");
    tokio::time::sleep(Duration::from_millis(100)).await;
    table.set_search_input("al");
    tokio::time::sleep(Duration::from_millis(100)).await;
    table.set_search_input("alp");

    // Still inside the quiet window of the last keystroke
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(table.committed_term(), "");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(table.committed_term(), "alp");
}

#[tokio::test(start_paused = true)]
async fn test_commit_resets_to_first_page() {
    let table = DataTable::new();
    let rows: Vec<Row> = (0..25)
        .map(|i| person(&format!("r-{i}"), &format!("row {i}")))
        .collect();
    table.configure(rows, vec![Column::new("name", "Name")], 10);

    table.request_page(3);
    assert_eq!(table.current_page(), 3);

    table.set_search_input("row");
    assert_eq!(table.current_page(), 3); // keystroke alone does not move the page

    tokio::time::sleep(Duration::from_millis(310)).await;
    assert_eq!(table.current_page(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_commit_notifies_when_page_view_changes() {
    use std::sync::{Arc, Mutex};

    let table = sample_table();
    let notifications = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&notifications);
    table.on_selection_change(move |_| {
        *sink.lock().unwrap() += 1;
    });

    table.set_search_input("beta");
    tokio::time::sleep(Duration::from_millis(310)).await;
    assert_eq!(*notifications.lock().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_pending_commit() {
    let table = sample_table();

    table.set_search_input("alpha");
    table.dispose();

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(table.committed_term(), "");
}

#[tokio::test(start_paused = true)]
async fn test_custom_quiet_window() {
    let table = DataTable::new().with_quiet_window(Duration::from_millis(50));
    table.configure(
        vec![person("1", "alpha")],
        vec![Column::new("name", "Name")],
        10,
    );

    table.set_search_input("x");
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(table.committed_term(), "x");
}
