//! Column definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Width used when a column does not set one.
pub const DEFAULT_COLUMN_WIDTH: u16 = 150;

/// A table column definition.
///
/// Columns are supplied by the host once per render cycle and are identified
/// by `id`. Everything else is display metadata or a behavior flag.
///
/// # Examples
///
/// ```
/// use table_engine::Column;
///
/// let columns = vec![
///     Column::new("select", "").row_id().no_drag().unsortable().width(40),
///     Column::new("name", "Name").width(200),
///     Column::new("email", "Email"),
/// ];
/// assert!(columns[0].is_row_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text displayed at the top.
    #[serde(default)]
    pub header: String,
    /// Width in layout units.
    #[serde(default = "default_width")]
    pub width: u16,
    /// Excluded from drag-reorder.
    #[serde(default)]
    pub no_drag: bool,
    /// Hosts the per-row selection affordance.
    #[serde(default)]
    pub is_row_id: bool,
    /// Responds to header clicks by sorting.
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_width() -> u16 {
    DEFAULT_COLUMN_WIDTH
}

fn default_sortable() -> bool {
    true
}

impl Column {
    /// Create a new column with the given id and header.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width: DEFAULT_COLUMN_WIDTH,
            no_drag: false,
            is_row_id: false,
            sortable: true,
        }
    }

    /// Set the column width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Pin the column in place: it cannot be dragged.
    pub fn no_drag(mut self) -> Self {
        self.no_drag = true;
        self
    }

    /// Mark this column as the row selection affordance.
    pub fn row_id(mut self) -> Self {
        self.is_row_id = true;
        self
    }

    /// Ignore header clicks on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Reject column sets with repeated ids.
pub(crate) fn validate_columns(columns: &[Column]) -> Result<(), TableError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(TableError::DuplicateColumn(column.id.clone()));
        }
    }
    Ok(())
}
