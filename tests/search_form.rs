//! Tests for the search form's controlled-input state.

use std::sync::{Arc, Mutex};

use tablekit::components::{SearchFilters, SearchForm, SortBy};

#[test]
fn test_defaults() {
    let form = SearchForm::new();
    assert_eq!(form.query(), "");
    assert_eq!(form.filters(), SearchFilters::default());
    assert_eq!(form.filters().category, "all");
    assert!(!form.is_expanded());
}

#[test]
fn test_initial_query() {
    let form = SearchForm::with_query("printers");
    assert_eq!(form.query(), "printers");
}

#[test]
fn test_filter_updates_are_independent() {
    let form = SearchForm::new();

    form.set_category("documents");
    form.set_sort_by(SortBy::Date);

    let filters = form.filters();
    assert_eq!(filters.category, "documents");
    assert_eq!(filters.sort_by, SortBy::Date);
    assert!(!filters.include_archived); // untouched field keeps its value

    form.set_include_archived(true);
    assert!(form.filters().include_archived);
    assert_eq!(form.filters().category, "documents");
}

#[test]
fn test_toggle_expanded() {
    let form = SearchForm::new();
    form.toggle_expanded();
    assert!(form.is_expanded());
    form.toggle_expanded();
    assert!(!form.is_expanded());
}

#[test]
fn test_reset_restores_defaults() {
    let form = SearchForm::with_query("printers");
    form.set_category("images");
    form.set_sort_by(SortBy::Name);
    form.set_include_archived(true);

    form.reset();
    assert_eq!(form.query(), "");
    assert_eq!(form.filters(), SearchFilters::default());
}

#[test]
fn test_submit_delivers_query_and_filters() {
    let form = SearchForm::new();
    let submissions: Arc<Mutex<Vec<(String, SearchFilters)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&submissions);
    form.on_submit(move |query, filters| {
        sink.lock().unwrap().push((query.to_string(), filters.clone()));
    });

    form.set_query("annual report");
    form.set_category("documents");
    form.submit();

    let submissions = submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0, "annual report");
    assert_eq!(submissions[0].1.category, "documents");
}

#[test]
fn test_submit_without_sink_is_a_noop() {
    let form = SearchForm::new();
    form.submit();
}
