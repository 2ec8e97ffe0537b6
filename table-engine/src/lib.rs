//! Table state engine for grid widgets.
//!
//! The engine owns the parts of a data grid that have real state:
//! - Single-column sorting with an ascending, descending, unsorted cycle
//! - Pagination over the sorted rows
//! - Column order with drag-and-drop reordering
//! - The active row and the hovered row
//!
//! Painting rows and cells is left to the host. The host feeds gestures in
//! and redraws when observers fire or the dirty flag is set.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use table_engine::prelude::*;
//!
//! let columns = vec![
//!     Column::new("select", "").row_id().no_drag().unsortable(),
//!     Column::new("name", "Name"),
//!     Column::new("city", "City"),
//! ];
//! let rows = (0..57)
//!     .map(|i| json!({"id": i, "name": format!("User {i}"), "city": "Oslo"}))
//!     .collect();
//! let mut table = TableEngine::from_values(columns, rows, TableConfig::new("id")).unwrap();
//!
//! table.on_sort_or_columns_changed(|sort, order| {
//!     println!("sort {:?}, columns {:?}", sort, order);
//! });
//!
//! assert_eq!(table.page_count(), 3);
//! table.on_page_request(PageRequest::GoTo(10));
//! assert_eq!(table.page_index(), 2);
//! assert_eq!(table.page_rows().len(), 7);
//! ```

pub mod column;
pub mod column_order;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod pagination;
pub mod row;
pub mod selection;
pub mod shared;
pub mod sort;

pub use column::Column;
pub use column_order::ColumnOrderController;
pub use config::{DefaultSort, TableConfig};
pub use engine::{PageRequest, TableEngine};
pub use error::TableError;
pub use observer::TableSummary;
pub use pagination::{PaginationController, PaginationState};
pub use row::{Record, RowId, SortValue, TableRow};
pub use selection::SelectionController;
pub use shared::{SharedTableEngine, TableId};
pub use sort::{SortController, SortDescriptor, SortDirection};

pub mod prelude {
    pub use crate::column::Column;
    pub use crate::config::{DefaultSort, TableConfig};
    pub use crate::engine::{PageRequest, TableEngine};
    pub use crate::error::TableError;
    pub use crate::row::{Record, RowId, SortValue, TableRow};
    pub use crate::shared::SharedTableEngine;
    pub use crate::sort::{SortDescriptor, SortDirection};
}
