//! Single-column sort state and row ordering.
//!
//! Header clicks walk a strict three-state cycle per column:
//! unsorted, ascending, descending, unsorted again. Clicking a different
//! column restarts at ascending and drops the previous column's sort.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::row::TableRow;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// Check if ascending.
    pub fn is_asc(self) -> bool {
        self == SortDirection::Asc
    }
}

/// The single active (column, direction) pair.
///
/// Serializes as `{"accessor": "<column id>", "direction": "ASC"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    /// Sorted column.
    #[serde(rename = "accessor")]
    pub column_id: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    /// Ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Asc)
    }

    /// Descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self::new(column_id, SortDirection::Desc)
    }
}

/// JSON form handed to hosts: the descriptor object, or `{}` when unsorted.
pub fn descriptor_json(descriptor: Option<&SortDescriptor>) -> Value {
    match descriptor {
        Some(d) => json!({ "accessor": d.column_id, "direction": d.direction }),
        None => json!({}),
    }
}

/// Next descriptor after a header click on `target_column_id`.
pub fn toggle_sort(
    current: Option<&SortDescriptor>,
    target_column_id: &str,
) -> Option<SortDescriptor> {
    match current {
        Some(d) if d.column_id == target_column_id => match d.direction {
            SortDirection::Asc => Some(SortDescriptor::desc(target_column_id)),
            SortDirection::Desc => None,
        },
        _ => Some(SortDescriptor::asc(target_column_id)),
    }
}

/// Row indices in display order for the given sort.
///
/// The sort is stable: rows with equal values keep their data order in both
/// directions.
pub fn sorted_indices<T: TableRow>(rows: &[T], descriptor: Option<&SortDescriptor>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let Some(descriptor) = descriptor else {
        return indices;
    };

    let column = descriptor.column_id.as_str();
    indices.sort_by(|&a, &b| {
        let base = rows[a]
            .sort_value(column)
            .compare(&rows[b].sort_value(column));
        match descriptor.direction {
            SortDirection::Asc => base,
            SortDirection::Desc => base.reverse(),
        }
    });
    indices
}

/// Holds the active sort descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortController {
    descriptor: Option<SortDescriptor>,
}

impl SortController {
    /// Create a controller with an initial descriptor.
    pub fn new(descriptor: Option<SortDescriptor>) -> Self {
        Self { descriptor }
    }

    /// Current descriptor, `None` when unsorted.
    pub fn descriptor(&self) -> Option<&SortDescriptor> {
        self.descriptor.as_ref()
    }

    /// Advance the sort cycle for a column. Returns the new descriptor.
    pub fn toggle(&mut self, column_id: &str) -> Option<&SortDescriptor> {
        self.descriptor = toggle_sort(self.descriptor.as_ref(), column_id);
        self.descriptor.as_ref()
    }

    /// Drop the active sort. Returns `true` if there was one.
    pub fn clear(&mut self) -> bool {
        self.descriptor.take().is_some()
    }

    /// Check if the given column is the sorted one.
    pub fn is_sorted_by(&self, column_id: &str) -> bool {
        self.descriptor
            .as_ref()
            .is_some_and(|d| d.column_id == column_id)
    }
}
