//! Data table state and transitions.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::components::selection::Selection;
use crate::model::{Column, Row};

use super::{DEFAULT_PAGE_SIZE, DEFAULT_QUIET_WINDOW, SortDirection, debounce, view};

/// Observer for selection changes; receives the resolved selected rows.
pub type SelectionObserver = Arc<dyn Fn(Vec<Row>) + Send + Sync>;

/// Observer for row activation; receives the activated row.
pub type ActivateObserver = Arc<dyn Fn(Row) + Send + Sync>;

/// Unique identifier for a DataTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Internal state for the DataTable component.
pub(super) struct TableInner {
    /// The dataset, owned by the caller, never mutated here.
    pub(super) rows: Vec<Row>,
    /// Column descriptors.
    pub(super) columns: Vec<Column>,
    /// Rows per page.
    pub(super) page_size: usize,
    /// Search text as typed, updated on every keystroke.
    pub(super) search_input: String,
    /// Search term that actually filters, updated by the debounce commit.
    pub(super) committed_term: String,
    /// Attribute the processed rows are sorted by.
    pub(super) sort_column: Option<String>,
    /// Sort direction.
    pub(super) sort_direction: SortDirection,
    /// Current page, 1-based.
    pub(super) current_page: usize,
    /// Selected row IDs.
    pub(super) selection: Selection,
    /// Pending debounce commit, at most one live at a time.
    pub(super) search_timer: Option<JoinHandle<()>>,
    /// Bumped on every schedule and on disposal; a commit whose epoch
    /// no longer matches is stale and must not apply.
    pub(super) search_epoch: u64,
    /// Set by `dispose`; all transitions are no-ops afterwards.
    pub(super) disposed: bool,
    /// Selection change sink, at most one.
    pub(super) on_selection_change: Option<SelectionObserver>,
    /// Row activation sink, at most one.
    pub(super) on_row_activate: Option<ActivateObserver>,
}

impl Default for TableInner {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            search_input: String::new(),
            committed_term: String::new(),
            sort_column: None,
            sort_direction: SortDirection::Ascending,
            current_page: 1,
            selection: Selection::new(),
            search_timer: None,
            search_epoch: 0,
            disposed: false,
            on_selection_change: None,
            on_row_activate: None,
        }
    }
}

impl TableInner {
    /// Dataset filtered by the committed term, then sorted.
    fn processed(&self) -> Vec<Row> {
        view::process(
            &self.rows,
            &self.committed_term,
            self.sort_column.as_deref(),
            self.sort_direction,
        )
    }

    /// The window of processed rows visible on the current page.
    fn page_rows(&self) -> Vec<Row> {
        view::page_window(&self.processed(), self.current_page, self.page_size)
    }

    fn total_pages(&self) -> usize {
        view::total_pages(self.processed().len(), self.page_size)
    }

    /// Selected rows resolved against the current page view, in page
    /// order. IDs with no row on this page are excluded but stay stored.
    fn resolved_selection(&self) -> Vec<Row> {
        self.page_rows()
            .into_iter()
            .filter(|row| self.selection.contains(row.id()))
            .collect()
    }
}

/// Deliver the resolved selection to the registered sink, if any.
///
/// Takes the observer out under a read guard and invokes it after the
/// guard is dropped, so a sink that calls back into the table does not
/// deadlock.
pub(super) fn notify_selection(inner: &Arc<RwLock<TableInner>>) {
    let payload = {
        let Ok(guard) = inner.read() else {
            return;
        };
        match &guard.on_selection_change {
            Some(observer) => Some((Arc::clone(observer), guard.resolved_selection())),
            None => None,
        }
    };
    if let Some((observer, rows)) = payload {
        observer(rows);
    }
}

/// Tabular data view engine.
///
/// `DataTable` keeps the view state for one table: the dataset and
/// column descriptors, the search input and its debounced committed
/// term, the sort state, the current page, and the selection. Filtered,
/// sorted, and paginated views are derived on demand, never stored.
///
/// Cloning shares the instance; all methods take `&self`.
///
/// # Example
///
/// ```no_run
/// use tablekit::components::DataTable;
/// use tablekit::model::{Column, Row};
///
/// let table = DataTable::new();
/// table.configure(
///     vec![
///         Row::new("u-1").set("name", "Ada"),
///         Row::new("u-2").set("name", "Grace"),
///     ],
///     vec![Column::new("name", "Name").sortable()],
///     10,
/// );
/// table.request_sort("name");
/// assert_eq!(table.page_rows()[0].id(), "u-1");
/// ```
pub struct DataTable {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    inner: Arc<RwLock<TableInner>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
    /// Quiet window for the debounced search commit.
    quiet_window: Duration,
}

impl DataTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
            quiet_window: DEFAULT_QUIET_WINDOW,
        }
    }

    /// Override the debounce quiet window.
    pub fn with_quiet_window(mut self, window: Duration) -> Self {
        self.quiet_window = window;
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// (Re)bind the dataset, columns, and page size.
    ///
    /// Every supplied row sequence counts as a new dataset identity:
    /// the page resets to 1 and the selection is cleared, while the
    /// committed search term and the sort order are kept.
    pub fn configure(&self, rows: Vec<Row>, columns: Vec<Column>, page_size: usize) {
        {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.disposed {
                return;
            }
            log::debug!(
                "table {} configure: {} rows, {} columns, page size {}",
                self.id,
                rows.len(),
                columns.len(),
                page_size
            );
            guard.rows = rows;
            guard.columns = columns;
            guard.page_size = page_size.max(1);
            guard.current_page = 1;
            guard.selection.clear();
            self.dirty.store(true, Ordering::SeqCst);
        }
        notify_selection(&self.inner);
    }

    /// Replace the column descriptors without touching the dataset.
    pub fn set_columns(&self, columns: Vec<Column>) {
        if let Ok(mut guard) = self.inner.write()
            && !guard.disposed
        {
            guard.columns = columns;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Change the page size, keeping the page clamped in range.
    pub fn set_page_size(&self, page_size: usize) {
        let changed = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.disposed {
                return;
            }
            let previous_window = guard.page_rows();
            guard.page_size = page_size.max(1);
            guard.current_page = guard.current_page.clamp(1, guard.total_pages().max(1));
            self.dirty.store(true, Ordering::SeqCst);
            guard.page_rows() != previous_window
        };
        if changed {
            notify_selection(&self.inner);
        }
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Record a search keystroke.
    ///
    /// The input is visible immediately through
    /// [`search_input`](Self::search_input); filtering only changes once
    /// the quiet window elapses with no further keystrokes and the term
    /// commits. Must be called from within a Tokio runtime.
    pub fn set_search_input(&self, text: impl Into<String>) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.disposed {
            return;
        }
        guard.search_input = text.into();
        self.dirty.store(true, Ordering::SeqCst);
        debounce::schedule_commit(&self.inner, &mut guard, &self.dirty, self.quiet_window);
    }

    // -------------------------------------------------------------------------
    // Sort and pagination
    // -------------------------------------------------------------------------

    /// Request a sort by the given column key.
    ///
    /// Ignored unless the column is marked sortable. A repeated request
    /// on the current sort column toggles the direction; any other
    /// column starts ascending. The page resets to 1. The selection is
    /// kept: it is keyed by row ID, so reordering does not invalidate it.
    pub fn request_sort(&self, column_key: &str) {
        let changed = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.disposed {
                return;
            }
            let sortable = guard
                .columns
                .iter()
                .any(|c| c.key() == column_key && c.is_sortable());
            if !sortable {
                return;
            }
            if guard.sort_column.as_deref() == Some(column_key) {
                guard.sort_direction = guard.sort_direction.toggle();
            } else {
                guard.sort_column = Some(column_key.to_string());
                guard.sort_direction = SortDirection::Ascending;
            }
            guard.current_page = 1;
            self.dirty.store(true, Ordering::SeqCst);
            true
        };
        if changed {
            notify_selection(&self.inner);
        }
    }

    /// Navigate to a page, clamped to `[1, total_pages]`.
    ///
    /// An out-of-range request is clipped, not rejected.
    pub fn request_page(&self, page: usize) {
        let changed = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.disposed {
                return;
            }
            let clamped = page.clamp(1, guard.total_pages().max(1));
            if clamped == guard.current_page {
                false
            } else {
                guard.current_page = clamped;
                self.dirty.store(true, Ordering::SeqCst);
                true
            }
        };
        if changed {
            notify_selection(&self.inner);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle selection of the row at a page-local index.
    ///
    /// The index is resolved against the current page view; out-of-range
    /// indices are ignored. The toggled entry is the row's ID.
    pub fn toggle_row(&self, index: usize) {
        let changed = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.disposed {
                return;
            }
            let Some(row) = guard.page_rows().into_iter().nth(index) else {
                return;
            };
            guard.selection.toggle(row.id());
            self.dirty.store(true, Ordering::SeqCst);
            true
        };
        if changed {
            notify_selection(&self.inner);
        }
    }

    /// Toggle selection of the whole current page.
    ///
    /// If every row on the page is already selected, the selection is
    /// cleared entirely; otherwise it is replaced with exactly the
    /// current page's IDs (a full replace, not a union).
    pub fn select_all(&self) {
        let changed = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if guard.disposed {
                return;
            }
            let page_ids: Vec<String> = guard
                .page_rows()
                .iter()
                .map(|row| row.id().to_string())
                .collect();
            let all_selected =
                !page_ids.is_empty() && page_ids.iter().all(|id| guard.selection.contains(id));
            let changed = if all_selected {
                guard.selection.clear()
            } else {
                guard.selection.replace(page_ids)
            };
            if changed {
                self.dirty.store(true, Ordering::SeqCst);
            }
            changed
        };
        if changed {
            notify_selection(&self.inner);
        }
    }

    /// Whether the current page is fully selected (and non-empty).
    pub fn is_all_selected(&self) -> bool {
        self.inner
            .read()
            .map(|guard| {
                let page = guard.page_rows();
                !page.is_empty() && page.iter().all(|row| guard.selection.contains(row.id()))
            })
            .unwrap_or(false)
    }

    /// The selected rows resolved against the current page view.
    pub fn selected_rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|guard| guard.resolved_selection())
            .unwrap_or_default()
    }

    /// All stored selected IDs, including ones not on the current page.
    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| guard.selection.ids())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Register the selection change sink. At most one is active; a new
    /// registration replaces the previous one.
    pub fn on_selection_change(&self, observer: impl Fn(Vec<Row>) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write()
            && !guard.disposed
        {
            guard.on_selection_change = Some(Arc::new(observer));
        }
    }

    /// Register the row activation sink. At most one is active; a new
    /// registration replaces the previous one.
    pub fn on_row_activate(&self, observer: impl Fn(Row) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write()
            && !guard.disposed
        {
            guard.on_row_activate = Some(Arc::new(observer));
        }
    }

    /// Activate the row at a page-local index, delivering the full row
    /// to the activation sink. Independent of selection state.
    pub fn activate_row(&self, index: usize) {
        let payload = {
            let Ok(guard) = self.inner.read() else {
                return;
            };
            if guard.disposed {
                return;
            }
            let Some(row) = guard.page_rows().into_iter().nth(index) else {
                return;
            };
            guard
                .on_row_activate
                .as_ref()
                .map(|observer| (Arc::clone(observer), row))
        };
        if let Some((observer, row)) = payload {
            observer(row);
        }
    }

    // -------------------------------------------------------------------------
    // Read-only outputs
    // -------------------------------------------------------------------------

    /// The window of processed rows visible on the current page.
    pub fn page_rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|guard| guard.page_rows())
            .unwrap_or_default()
    }

    /// The page count of the processed sequence; 0 when it is empty.
    pub fn total_pages(&self) -> usize {
        self.inner.read().map(|guard| guard.total_pages()).unwrap_or(0)
    }

    /// The current page, 1-based. Held at 1 when there are no pages.
    pub fn current_page(&self) -> usize {
        self.inner.read().map(|guard| guard.current_page).unwrap_or(1)
    }

    /// The number of rows after filtering, before pagination.
    pub fn processed_len(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.processed().len())
            .unwrap_or(0)
    }

    /// The search text as typed, updated on every keystroke.
    pub fn search_input(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.search_input.clone())
            .unwrap_or_default()
    }

    /// The search term currently applied to filtering.
    pub fn committed_term(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.committed_term.clone())
            .unwrap_or_default()
    }

    /// The attribute the processed rows are sorted by, if any.
    pub fn sort_column(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.sort_column.clone())
    }

    /// The sort direction.
    pub fn sort_direction(&self) -> SortDirection {
        self.inner
            .read()
            .map(|guard| guard.sort_direction)
            .unwrap_or_default()
    }

    /// The column descriptors.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|guard| guard.columns.clone())
            .unwrap_or_default()
    }

    /// The number of rows in the unfiltered dataset.
    pub fn len(&self) -> usize {
        self.inner.read().map(|guard| guard.rows.len()).unwrap_or(0)
    }

    /// Check if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured page size.
    pub fn page_size(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    // -------------------------------------------------------------------------
    // Lifecycle and dirty tracking
    // -------------------------------------------------------------------------

    /// Dispose of the table: cancel any pending search commit and drop
    /// the observer sinks. All subsequent transitions are no-ops.
    pub fn dispose(&self) {
        if let Ok(mut guard) = self.inner.write() {
            if let Some(timer) = guard.search_timer.take() {
                timer.abort();
            }
            guard.search_epoch = guard.search_epoch.wrapping_add(1);
            guard.disposed = true;
            guard.on_selection_change = None;
            guard.on_row_activate = None;
            log::debug!("table {} disposed", self.id);
        }
    }

    /// Check if the table has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for DataTable {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            quiet_window: self.quiet_window,
        }
    }
}

impl Default for DataTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DataTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (rows, page) = self
            .inner
            .read()
            .map(|guard| (guard.rows.len(), guard.current_page))
            .unwrap_or((0, 1));
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("rows", &rows)
            .field("current_page", &page)
            .finish()
    }
}
