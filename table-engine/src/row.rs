//! Row types: the `TableRow` trait and the dynamic `Record` row.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TableError;

/// Trait for rows that can be managed by a table engine.
///
/// # Example
///
/// ```
/// use table_engine::{SortValue, TableRow};
///
/// #[derive(Clone)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn sort_value(&self, column_id: &str) -> SortValue<'_> {
///         match column_id {
///             "id" => SortValue::Number(self.id as f64),
///             "name" => SortValue::text(&self.name),
///             _ => SortValue::Missing,
///         }
///     }
/// }
/// ```
pub trait TableRow: Clone + Send + Sync + 'static {
    /// The key type used to identify this row.
    ///
    /// Keys must be stable across data refreshes for selection and hover to
    /// keep pointing at the same row.
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Return a unique key for this row.
    fn key(&self) -> Self::Key;

    /// Value used when sorting by the given column.
    fn sort_value(&self, column_id: &str) -> SortValue<'_>;
}

/// A cell value reduced to what sorting needs.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    /// No value. Sorts after everything else in ascending order.
    Missing,
    Bool(bool),
    Number(f64),
    Text(Cow<'a, str>),
}

impl<'a> SortValue<'a> {
    /// Borrowed text value.
    pub fn text(s: &'a str) -> Self {
        SortValue::Text(Cow::Borrowed(s))
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Number(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Missing => 3,
        }
    }

    /// Total ascending order over sort values.
    ///
    /// Values of different kinds order bool < number < text < missing.
    /// NaN sorts after every other number.
    pub fn compare(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.total_cmp(b),
            },
            (SortValue::Text(a), SortValue::Text(b)) => a.as_ref().cmp(b.as_ref()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl<'a> From<&'a Value> for SortValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => SortValue::Missing,
            Value::Bool(b) => SortValue::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(SortValue::Number)
                .unwrap_or(SortValue::Missing),
            Value::String(s) => SortValue::text(s),
            Value::Array(_) | Value::Object(_) => SortValue::Text(Cow::Owned(value.to_string())),
        }
    }
}

/// Identifier of a `Record`, taken from its row id field.
///
/// Numeric and boolean ids are stored in their JSON text form, so `7` and
/// `"7"` are the same row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub String);

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for RowId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dynamic row: an opaque JSON object plus its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: RowId,
    data: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON object, reading its id from `row_id_field`.
    ///
    /// `index` is only used for error reporting.
    pub fn from_value(value: Value, row_id_field: &str, index: usize) -> Result<Self, TableError> {
        let Value::Object(data) = value else {
            return Err(TableError::NotAnObject { index });
        };
        let id = match data.get(row_id_field) {
            None | Some(Value::Null) => {
                return Err(TableError::MissingRowId {
                    index,
                    field: row_id_field.to_string(),
                });
            }
            Some(Value::String(s)) => RowId(s.clone()),
            Some(Value::Number(n)) => RowId(n.to_string()),
            Some(Value::Bool(b)) => RowId(b.to_string()),
            Some(_) => {
                return Err(TableError::InvalidRowId {
                    index,
                    field: row_id_field.to_string(),
                });
            }
        };
        Ok(Self { id, data })
    }

    /// Build records from a list of JSON objects.
    pub fn from_values(values: Vec<Value>, row_id_field: &str) -> Result<Vec<Self>, TableError> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Self::from_value(value, row_id_field, index))
            .collect()
    }

    /// The row's id.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Get a field of the record.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// The full record payload.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl TableRow for Record {
    type Key = RowId;

    fn key(&self) -> RowId {
        self.id.clone()
    }

    fn sort_value(&self, column_id: &str) -> SortValue<'_> {
        self.data
            .get(column_id)
            .map(SortValue::from)
            .unwrap_or(SortValue::Missing)
    }
}
