//! Column descriptors for table display.

use std::fmt;
use std::sync::Arc;

use super::Row;
use super::Value;

/// Opaque per-column formatting capability.
///
/// Supplied by the caller for a rendering layer to use; the view engine
/// stores it but never invokes it.
pub type CellRenderer = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define the structure of the table: which attribute the column
/// reads, its header label, and whether the column is sortable.
///
/// # Examples
///
/// ```
/// use tablekit::model::Column;
///
/// let columns = vec![
///     Column::new("id", "ID"),
///     Column::new("name", "Name").sortable(),
///     Column::new("email", "Email"),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Attribute name this column reads from each row
    key: String,
    /// Column header text
    label: String,
    /// Whether this column is sortable
    sortable: bool,
    /// Optional formatting capability for a rendering layer
    render: Option<CellRenderer>,
}

impl Column {
    /// Create a new non-sortable column.
    ///
    /// # Arguments
    /// * `key` - The attribute name the column reads
    /// * `label` - The column header text
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            render: None,
        }
    }

    /// Make the column sortable.
    ///
    /// Sortable columns respond to sort requests; requests against any
    /// other column are ignored.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Attach a formatting capability.
    pub fn render(mut self, f: impl Fn(&Value, &Row) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// The attribute name this column reads.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The column header text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this column is sortable.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The formatting capability, if one was attached.
    pub fn renderer(&self) -> Option<&CellRenderer> {
        self.render.as_ref()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}
