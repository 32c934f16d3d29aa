//! Derived view computation: filter, sort, paginate.
//!
//! Everything here is a pure function of its inputs. The table never
//! stores processed rows, page windows, or page counts; it recomputes
//! them on demand, which keeps the derived values consistent with the
//! view state by construction.

use crate::model::{Row, Value};

use super::SortDirection;

/// Filter then sort the dataset into the processed row sequence.
pub(super) fn process(
    rows: &[Row],
    term: &str,
    sort_column: Option<&str>,
    direction: SortDirection,
) -> Vec<Row> {
    let mut processed = filter_rows(rows, term);
    if let Some(column) = sort_column {
        sort_rows(&mut processed, column, direction);
    }
    processed
}

/// Retain rows whose attributes match the search term.
///
/// A row matches when the case-insensitive string form of at least one
/// attribute value contains the case-insensitive term. An empty term is
/// the identity pass.
pub(super) fn filter_rows(rows: &[Row], term: &str) -> Vec<Row> {
    if term.is_empty() {
        return rows.to_vec();
    }
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.fields()
                .values()
                .any(|value| value.to_string().to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Sort rows in place by the named attribute.
///
/// Rows missing the attribute sort as null. `sort_by` is a stable sort,
/// so rows with equal keys keep their pre-sort relative order.
pub(super) fn sort_rows(rows: &mut [Row], column: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let left = a.get(column).unwrap_or(&Value::Null);
        let right = b.get(column).unwrap_or(&Value::Null);
        let ordering = left.cmp_natural(right);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// The page count for a processed sequence: `ceil(len / page_size)`.
/// Zero when the sequence is empty.
pub(super) fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// The half-open window of processed rows visible on `current_page`,
/// clipped to sequence bounds.
pub(super) fn page_window(processed: &[Row], current_page: usize, page_size: usize) -> Vec<Row> {
    let start = current_page.saturating_sub(1) * page_size;
    if start >= processed.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(processed.len());
    processed[start..end].to_vec()
}
