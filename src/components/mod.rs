//! UI components with self-managed state.
//!
//! Each component owns its state and exposes transitions and observer
//! callbacks; rendering belongs to the caller.

pub mod search_form;
pub mod selection;
pub mod table;
pub mod user_profile;

pub use search_form::{SearchFilters, SearchForm, SortBy};
pub use selection::Selection;
pub use table::{DataTable, SortDirection, TableId};
pub use user_profile::{User, UserApi, UserProfile};
