//! Dataset rows

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// One record of a dataset.
///
/// A row is a stable string identifier plus named attribute values held in
/// a `HashMap<String, Value>`. Rows are owned by the caller and never
/// mutated by the view engine. Typed getter methods provide safe access
/// with proper error handling.
///
/// # Example
///
/// ```
/// use tablekit::model::Row;
///
/// let row = Row::new("u-1")
///     .set("name", "Ada Lovelace")
///     .set("age", 36);
///
/// assert_eq!(row.get_string("name").unwrap(), Some("Ada Lovelace"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// The stable identifier of the row.
    id: String,

    /// The attribute values.
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new row with the given identifier and no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Returns the stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    // =========================================================================
    // Raw attribute access
    // =========================================================================

    /// Returns a reference to the attribute value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the row contains the given attribute.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all attributes.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets an attribute value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts an attribute value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if the attribute is missing or has the wrong type.
    // Return Ok(None) only if the attribute exists and is Value::Null.
    // =========================================================================

    /// Gets a string attribute value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean attribute value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an i32 attribute value.
    pub fn get_int(&self, field: &str) -> Result<Option<i32>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets an i64 attribute value.
    pub fn get_long(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Long(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as i64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "long", other.type_name())),
        }
    }

    /// Gets an f64 attribute value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a DateTime attribute value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_is_an_error() {
        let row = Row::new("r-1");
        assert!(matches!(
            row.get_string("name"),
            Err(FieldError::Missing { .. })
        ));
    }

    #[test]
    fn test_null_attribute_reads_as_none() {
        let row = Row::new("r-1").set("name", Value::Null);
        assert_eq!(row.get_string("name").unwrap(), None);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let row = Row::new("r-1").set("age", 36);
        assert!(matches!(
            row.get_string("age"),
            Err(FieldError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_int_widens_to_long() {
        let row = Row::new("r-1").set("count", 7);
        assert_eq!(row.get_long("count").unwrap(), Some(7));
    }
}
