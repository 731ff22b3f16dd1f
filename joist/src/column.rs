//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::record::GridRecord;

/// Projection used by computed columns.
pub type ComputedFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How a column derives its value from a record.
pub enum Accessor<T> {
    /// Read a named field. Used for display and for sorting.
    Field(String),
    /// Compute display text from the whole record. Never sortable.
    Computed(ComputedFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Computed(f) => Accessor::Computed(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Column configuration.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::field("ID", "id").sortable().width(6),
///     Column::field("Name", "name").sortable(),
///     Column::computed("Email", |u: &User| format!("mailto:{}", u.email)),
/// ];
/// ```
pub struct Column<T> {
    /// Column header text
    pub header: String,
    /// Value accessor
    pub accessor: Accessor<T>,
    /// Whether the header responds to sort requests
    pub sortable: bool,
    /// Optional width hint in terminal columns
    pub width: Option<u16>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .finish()
    }
}

impl<T> Column<T> {
    /// Create a column backed by a record field.
    pub fn field(header: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: Accessor::Field(name.into()),
            sortable: false,
            width: None,
        }
    }

    /// Create a column backed by a computed projection.
    pub fn computed(
        header: impl Into<String>,
        f: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: Accessor::Computed(Arc::new(f)),
            sortable: false,
            width: None,
        }
    }

    /// Make the column sortable.
    ///
    /// Has no effect on computed columns: sorting compares the underlying
    /// field, and a computed column has none.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Field name, for field-backed columns.
    pub fn field_name(&self) -> Option<&str> {
        match &self.accessor {
            Accessor::Field(name) => Some(name),
            Accessor::Computed(_) => None,
        }
    }

    /// The sort key this column contributes, if it can be sorted at all.
    pub fn sort_key(&self) -> Option<&str> {
        if self.sortable { self.field_name() } else { None }
    }
}

impl<T: GridRecord> Column<T> {
    /// Display text of this column's cell for a record.
    pub fn cell_text(&self, record: &T) -> String {
        match &self.accessor {
            Accessor::Field(name) => record
                .field(name)
                .map(|value| value.canonical().into_owned())
                .unwrap_or_default(),
            Accessor::Computed(f) => f(record),
        }
    }
}
