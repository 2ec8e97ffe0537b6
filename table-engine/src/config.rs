//! Table configuration.
//!
//! Mirrors the options a grid host passes when mounting a table: which row
//! field is the id, the initial sort and page, and the page size.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::sort::{SortDescriptor, SortDirection};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Initial sort as supplied by the host (`{ "id": "name", "desc": false }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort {
    /// Column to sort by.
    pub id: String,
    /// Sort descending instead of ascending.
    #[serde(default)]
    pub desc: bool,
}

impl DefaultSort {
    /// Ascending sort on a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Descending sort on a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }

    /// Convert into the engine's sort descriptor.
    pub fn to_descriptor(&self) -> SortDescriptor {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortDescriptor::new(self.id.clone(), direction)
    }
}

/// Per-table configuration.
///
/// # Examples
///
/// ```
/// use table_engine::TableConfig;
///
/// let config = TableConfig::new("id").page_size(10).default_page_index(2);
/// assert_eq!(config.page_size, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Field of each record used as its unique id.
    pub row_id_field: String,

    /// Sort applied when the engine is created.
    pub default_sort: Option<DefaultSort>,

    /// Page shown when the engine is created (clamped to the page count).
    pub default_page_index: usize,

    /// Rows per page.
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_id_field: "id".to_string(),
            default_sort: None,
            default_page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableConfig {
    /// Create a config with the given row id field.
    pub fn new(row_id_field: impl Into<String>) -> Self {
        Self {
            row_id_field: row_id_field.into(),
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the initial sort.
    pub fn default_sort(mut self, sort: DefaultSort) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Set the initial page.
    pub fn default_page_index(mut self, index: usize) -> Self {
        self.default_page_index = index;
        self
    }

    /// Set rows per page.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Check the values that cannot be clamped into range.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.page_size == 0 {
            return Err(TableError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}
