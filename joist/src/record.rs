//! Records and row identity.

use std::collections::{BTreeMap, HashMap};

use crate::error::{JoistError, JoistResult};
use crate::value::{CellValue, RowKey};

/// Trait for records that can be displayed as rows in a data grid.
///
/// Records are owned by the caller; the grid only reads fields by name.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
///     age: Option<u32>,
/// }
///
/// impl GridRecord for User {
///     fn field(&self, name: &str) -> Option<CellValue> {
///         match name {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             "age" => Some(self.age.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait GridRecord: Clone + Send + Sync + 'static {
    /// Read a field by name. `None` means the field does not exist.
    fn field(&self, name: &str) -> Option<CellValue>;
}

impl GridRecord for serde_json::Value {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.as_object()?.get(name).map(CellValue::from)
    }
}

impl GridRecord for BTreeMap<String, CellValue> {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).cloned()
    }
}

impl GridRecord for HashMap<String, CellValue> {
    fn field(&self, name: &str) -> Option<CellValue> {
        self.get(name).cloned()
    }
}

/// Resolve a record's identity from its row-key field.
///
/// Missing and null fields both yield `None`; such records cannot be
/// toggled.
pub fn key_of<T: GridRecord>(record: &T, row_key_field: &str) -> Option<RowKey> {
    record.field(row_key_field).and_then(RowKey::new)
}

/// Parse a JSON array of objects into records.
pub fn records_from_json(text: &str) -> JoistResult<Vec<serde_json::Value>> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(text)?;
    if let Some(index) = rows.iter().position(|row| !row.is_object()) {
        return Err(JoistError::NotAnObject { index });
    }
    Ok(rows)
}
