pub mod components;
pub mod error;
pub mod model;
pub mod resource;
pub mod state;

pub mod prelude {
    pub use crate::components::{DataTable, SortDirection, TableId};
    pub use crate::components::{SearchFilters, SearchForm, SortBy};
    pub use crate::components::{Selection, User, UserApi, UserProfile};
    pub use crate::error::{FieldError, LoadError};
    pub use crate::model::{CellRenderer, Column, Row, Value};
    pub use crate::resource::{Resource, ResourceState};
    pub use crate::state::State;
}
