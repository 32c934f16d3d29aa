//! Search form component - controlled inputs with no derived state.
//!
//! Each field lives in its own [`State`] cell; the form only bundles
//! them and delivers the query and filters to a submit sink.

use std::sync::{Arc, RwLock};

use crate::state::State;

/// Result ordering requested by the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Best match first
    #[default]
    Relevance,
    /// Newest first
    Date,
    /// Alphabetical
    Name,
}

/// Filter settings attached to a search submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    /// Category restriction; `"all"` means unrestricted.
    pub category: String,
    /// Requested result ordering.
    pub sort_by: SortBy,
    /// Whether archived entries are included.
    pub include_archived: bool,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            category: "all".to_string(),
            sort_by: SortBy::Relevance,
            include_archived: false,
        }
    }
}

/// Observer for form submission; receives the query and filters.
pub type SubmitObserver = Arc<dyn Fn(&str, &SearchFilters) + Send + Sync>;

/// Controlled search form state.
///
/// # Example
///
/// ```
/// use tablekit::components::SearchForm;
///
/// let form = SearchForm::new();
/// form.set_query("annual report");
/// form.set_category("documents");
/// form.on_submit(|query, filters| {
///     println!("searching {query:?} in {}", filters.category);
/// });
/// form.submit();
/// ```
pub struct SearchForm {
    /// Query text, updated on every keystroke.
    query: State<String>,
    /// Filter settings.
    filters: State<SearchFilters>,
    /// Whether the filter panel is shown.
    expanded: State<bool>,
    /// Submission sink, at most one.
    on_submit: Arc<RwLock<Option<SubmitObserver>>>,
}

impl SearchForm {
    /// Create a new form with an empty query and default filters.
    pub fn new() -> Self {
        Self {
            query: State::default(),
            filters: State::default(),
            expanded: State::default(),
            on_submit: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a form with an initial query.
    pub fn with_query(query: impl Into<String>) -> Self {
        let form = Self::new();
        form.query.set(query.into());
        form
    }

    // -------------------------------------------------------------------------
    // Query
    // -------------------------------------------------------------------------

    /// Set the query text.
    pub fn set_query(&self, query: impl Into<String>) {
        self.query.set(query.into());
    }

    /// The current query text.
    pub fn query(&self) -> String {
        self.query.get()
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    /// Set the category restriction.
    pub fn set_category(&self, category: impl Into<String>) {
        let category = category.into();
        self.filters.update(|filters| filters.category = category);
    }

    /// Set the requested result ordering.
    pub fn set_sort_by(&self, sort_by: SortBy) {
        self.filters.update(|filters| filters.sort_by = sort_by);
    }

    /// Set whether archived entries are included.
    pub fn set_include_archived(&self, include: bool) {
        self.filters
            .update(|filters| filters.include_archived = include);
    }

    /// The current filter settings.
    pub fn filters(&self) -> SearchFilters {
        self.filters.get()
    }

    // -------------------------------------------------------------------------
    // Panel and reset
    // -------------------------------------------------------------------------

    /// Toggle the filter panel.
    pub fn toggle_expanded(&self) {
        self.expanded.update(|expanded| *expanded = !*expanded);
    }

    /// Whether the filter panel is shown.
    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    /// Clear the query and restore default filters.
    pub fn reset(&self) {
        self.query.set(String::new());
        self.filters.set(SearchFilters::default());
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Register the submission sink. At most one is active; a new
    /// registration replaces the previous one.
    pub fn on_submit(&self, observer: impl Fn(&str, &SearchFilters) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.on_submit.write() {
            *guard = Some(Arc::new(observer));
        }
    }

    /// Deliver the current query and filters to the submission sink.
    pub fn submit(&self) {
        let observer = self
            .on_submit
            .read()
            .ok()
            .and_then(|guard| guard.clone());
        if let Some(observer) = observer {
            let query = self.query.get();
            let filters = self.filters.get();
            observer(&query, &filters);
        }
    }
}

impl Clone for SearchForm {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            filters: self.filters.clone(),
            expanded: self.expanded.clone(),
            on_submit: Arc::clone(&self.on_submit),
        }
    }
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new()
    }
}
