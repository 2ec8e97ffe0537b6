//! The table state engine.
//!
//! `TableEngine` composes the sort, pagination, column order and selection
//! controllers into one state object. Every user gesture maps to one method.
//! A method fully updates state and then calls the observers for whatever
//! structural part changed, before returning. Hover never notifies.

use std::collections::HashSet;

use serde_json::Value;

use crate::column::{Column, validate_columns};
use crate::column_order::ColumnOrderController;
use crate::config::TableConfig;
use crate::error::TableError;
use crate::observer::{Changes, TableObservers, TableSummary};
use crate::pagination::{PaginationController, PaginationState};
use crate::row::{Record, TableRow};
use crate::selection::SelectionController;
use crate::sort::{SortController, SortDescriptor, sorted_indices};

/// A pagination gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// Jump to the first page (`<<`).
    First,
    /// One page back (`<`).
    Previous,
    /// One page forward (`>`).
    Next,
    /// Jump to the last page (`>>`).
    Last,
    /// Jump to a zero-based page index.
    GoTo(usize),
    /// Typed one-based page number from a "go to page" field.
    GoToInput(String),
    /// Change rows per page.
    PageSize(usize),
}

/// Sort, pagination, column order and selection state for one grid.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use table_engine::{Column, PageRequest, SortDescriptor, TableConfig, TableEngine};
///
/// let columns = vec![Column::new("name", "Name"), Column::new("age", "Age")];
/// let rows = vec![
///     json!({"id": 1, "name": "Ada", "age": 36}),
///     json!({"id": 2, "name": "Alan", "age": 41}),
/// ];
/// let mut engine = TableEngine::from_values(columns, rows, TableConfig::new("id")).unwrap();
///
/// engine.on_header_click("age");
/// assert_eq!(engine.current_sort_descriptor(), Some(&SortDescriptor::asc("age")));
///
/// engine.on_page_request(PageRequest::Next);
/// assert_eq!(engine.page_index(), 0);
/// ```
#[derive(Debug)]
pub struct TableEngine<T: TableRow> {
    /// Column definitions, in the order the host supplied them.
    columns: Vec<Column>,
    /// Rows in data order.
    rows: Vec<T>,
    /// Row indices in display (sorted) order.
    sorted: Vec<usize>,
    sort: SortController,
    pagination: PaginationController,
    column_order: ColumnOrderController,
    selection: SelectionController<T::Key>,
    observers: TableObservers<T::Key>,
    /// Set on any visible change, cleared by the host after redraw.
    dirty: bool,
    /// Field JSON records are keyed by, fixed at construction.
    row_id_field: String,
}

impl TableEngine<Record> {
    /// Build an engine over JSON records, using the config's row id field.
    pub fn from_values(
        columns: Vec<Column>,
        rows: Vec<Value>,
        config: TableConfig,
    ) -> Result<Self, TableError> {
        let records = Record::from_values(rows, &config.row_id_field)?;
        Self::new(columns, records, config)
    }

    /// Replace the rows with JSON records keyed by the configured row id field.
    pub fn set_values(&mut self, rows: Vec<Value>) -> Result<(), TableError> {
        let records = Record::from_values(rows, &self.row_id_field)?;
        self.set_rows(records)
    }

    /// Field the records are keyed by.
    pub fn row_id_field(&self) -> &str {
        &self.row_id_field
    }
}

impl<T: TableRow> TableEngine<T> {
    /// Create an engine from columns, rows and configuration.
    pub fn new(columns: Vec<Column>, rows: Vec<T>, config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        validate_columns(&columns)?;
        validate_rows(&rows)?;

        let descriptor = config.default_sort.as_ref().map(|s| s.to_descriptor());
        if let Some(d) = &descriptor
            && !columns.iter().any(|c| c.id == d.column_id)
        {
            return Err(TableError::UnknownSortColumn(d.column_id.clone()));
        }

        let sorted = sorted_indices(&rows, descriptor.as_ref());
        let pagination =
            PaginationController::new(config.default_page_index, config.page_size, rows.len());
        let column_order = ColumnOrderController::new(&columns);

        log::debug!(
            "Table created: {} columns, {} rows, page {}/{}",
            columns.len(),
            rows.len(),
            pagination.page_index(),
            pagination.page_count()
        );

        Ok(Self {
            columns,
            rows,
            sorted,
            sort: SortController::new(descriptor),
            pagination,
            column_order,
            selection: SelectionController::new(),
            observers: TableObservers::default(),
            dirty: false,
            row_id_field: config.row_id_field,
        })
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Register an observer for sort or column order changes.
    pub fn on_sort_or_columns_changed(
        &mut self,
        observer: impl FnMut(Option<&SortDescriptor>, &[String]) + Send + 'static,
    ) {
        self.observers.add_sort_or_columns(Box::new(observer));
    }

    /// Register an observer for active row changes.
    pub fn on_selection_changed(&mut self, observer: impl FnMut(Option<&T::Key>) + Send + 'static) {
        self.observers.add_selection(Box::new(observer));
    }

    /// Register an observer for page index changes.
    pub fn on_page_changed(&mut self, observer: impl FnMut(usize) + Send + 'static) {
        self.observers.add_page(Box::new(observer));
    }

    /// Report the current sort, column order, page and active row to every
    /// observer once.
    ///
    /// Observers otherwise only hear about later changes, so hosts call this
    /// after registering to render the initial state.
    pub fn notify_initial(&mut self) {
        log::debug!("Reporting initial state to observers");
        self.observers.notify(
            Changes::all(),
            self.sort.descriptor(),
            self.column_order.order(),
            self.pagination.page_index(),
            self.selection.active(),
        );
    }

    /// Mark dirty and notify observers for the given changes.
    fn commit(&mut self, changes: Changes) {
        if changes.is_empty() {
            return;
        }
        self.dirty = true;
        self.observers.notify(
            changes,
            self.sort.descriptor(),
            self.column_order.order(),
            self.pagination.page_index(),
            self.selection.active(),
        );
    }

    fn resort(&mut self) {
        self.sorted = sorted_indices(&self.rows, self.sort.descriptor());
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Header click: advance the sort cycle for the column.
    ///
    /// Unknown and non-sortable columns are ignored. A sort change returns to
    /// the first page. Returns `true` if the sort changed.
    pub fn on_header_click(&mut self, column_id: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.id == column_id && c.sortable);
        if !sortable {
            log::debug!("Header click ignored for column '{}'", column_id);
            return false;
        }

        let descriptor = self.sort.toggle(column_id).cloned();
        log::debug!("Sort on '{}' is now {:?}", column_id, descriptor);
        self.resort();
        let page = self.pagination.go_to_page(0);
        self.commit(Changes {
            sort: true,
            page,
            ..Default::default()
        });
        true
    }

    /// Drag start on a column header. Returns `false` for pinned or unknown
    /// columns, which cannot be dragged.
    pub fn on_column_drag_start(&mut self, column_id: &str) -> bool {
        let started = self.column_order.begin_drag(column_id);
        log::debug!("Drag start on '{}': {}", column_id, started);
        started
    }

    /// Drop the dragged column at `target_position`. `None` means the drop
    /// landed outside any header. Returns `true` if the order changed.
    pub fn on_column_drop(&mut self, target_position: Option<usize>) -> bool {
        let source = self.column_order.pending_drag_source().map(str::to_string);
        let changed = self.column_order.drop_at(target_position);
        log::debug!(
            "Drop of {:?} at {:?}, order changed: {}",
            source,
            target_position,
            changed
        );
        self.commit(Changes {
            columns: changed,
            ..Default::default()
        });
        changed
    }

    /// Drag abandoned without a drop.
    pub fn on_column_drag_cancel(&mut self) {
        if self.column_order.cancel_drag() {
            log::debug!("Column drag cancelled");
        }
    }

    /// Move `source_id` to `target_position` in one call.
    ///
    /// Any in-flight drag is discarded. Returns `true` if the order changed.
    pub fn on_column_drop_from(&mut self, source_id: &str, target_position: Option<usize>) -> bool {
        self.column_order.cancel_drag();
        if !self.column_order.begin_drag(source_id) {
            log::debug!("Column '{}' cannot be moved", source_id);
            return false;
        }
        self.on_column_drop(target_position)
    }

    /// Pagination control. Returns `true` if the page index or size changed.
    pub fn on_page_request(&mut self, request: PageRequest) -> bool {
        let before = self.pagination.state();
        let applied = match &request {
            PageRequest::First => self.pagination.first_page(),
            PageRequest::Previous => self.pagination.previous_page(),
            PageRequest::Next => self.pagination.next_page(),
            PageRequest::Last => self.pagination.last_page(),
            PageRequest::GoTo(index) => self.pagination.go_to_page(*index),
            PageRequest::GoToInput(input) => self.pagination.go_to_page_input(input),
            PageRequest::PageSize(size) => self.pagination.set_page_size(*size),
        };
        let after = self.pagination.state();
        log::debug!("Page request {:?}: {:?} -> {:?}", request, before, after);

        if after.page_size != before.page_size {
            self.dirty = true;
        }
        self.commit(Changes {
            page: after.page_index != before.page_index,
            ..Default::default()
        });
        applied && after != before
    }

    /// Pointer entered a row (`Some`) or left the table body (`None`).
    ///
    /// Only marks the table dirty. Observers are not called.
    pub fn on_row_hover(&mut self, key: Option<T::Key>) -> bool {
        let changed = match key {
            Some(key) => self.selection.set_hovered(key),
            None => self.selection.clear_hovered(),
        };
        if changed {
            log::trace!("Hover: {:?}", self.selection.hovered());
            self.dirty = true;
        }
        changed
    }

    /// Row affordance click: toggle the active row.
    ///
    /// Returns the new active row.
    pub fn on_row_click(&mut self, key: T::Key) -> Option<&T::Key> {
        self.selection.toggle_active(key);
        log::debug!("Active row: {:?}", self.selection.active());
        self.commit(Changes {
            selection: true,
            ..Default::default()
        });
        self.selection.active()
    }

    // -------------------------------------------------------------------------
    // Host data refresh
    // -------------------------------------------------------------------------

    /// Replace the rows.
    ///
    /// Rows are re-sorted with the current descriptor and the page index is
    /// clamped. The active row is kept even if it no longer exists; call
    /// [`clear_selection`](Self::clear_selection) to drop it.
    pub fn set_rows(&mut self, rows: Vec<T>) -> Result<(), TableError> {
        validate_rows(&rows)?;
        self.rows = rows;
        self.resort();
        let page = self.pagination.set_row_count(self.rows.len());
        log::debug!(
            "Rows replaced: {} rows, page {}/{}",
            self.rows.len(),
            self.pagination.page_index(),
            self.pagination.page_count()
        );
        self.dirty = true;
        self.commit(Changes {
            page,
            ..Default::default()
        });
        Ok(())
    }

    /// Replace the column definitions.
    ///
    /// The column order keeps the user's arrangement for surviving columns
    /// and appends new ones. A sort on a removed column is cleared.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<(), TableError> {
        validate_columns(&columns)?;

        let sort_removed = match self.sort.descriptor() {
            Some(d) => !columns.iter().any(|c| c.id == d.column_id),
            None => false,
        };
        if sort_removed {
            self.sort.clear();
            self.resort();
        }
        let order_changed = self.column_order.sync_columns(&columns);
        self.columns = columns;
        log::debug!(
            "Columns replaced: order changed {}, sort cleared {}",
            order_changed,
            sort_removed
        );

        self.dirty = true;
        self.commit(Changes {
            sort: sort_removed,
            columns: order_changed,
            ..Default::default()
        });
        Ok(())
    }

    /// Deactivate the active row. Returns `true` if one was active.
    pub fn clear_selection(&mut self) -> bool {
        let cleared = self.selection.clear_active();
        self.commit(Changes {
            selection: cleared,
            ..Default::default()
        });
        cleared
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    /// Rows on the current page, in sorted order.
    pub fn page_rows(&self) -> Vec<&T> {
        self.sorted[self.pagination.page_range()]
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// All rows in sorted order.
    pub fn sorted_rows(&self) -> Vec<&T> {
        self.sorted.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Rows in data order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Find a row by key.
    pub fn find_row(&self, key: &T::Key) -> Option<&T> {
        self.rows.iter().find(|row| &row.key() == key)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn page_index(&self) -> usize {
        self.pagination.page_index()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination.state()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous_page()
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next_page()
    }

    /// Whether the pagination bar should be shown.
    pub fn shows_pagination(&self) -> bool {
        self.pagination.shows_controls()
    }

    pub fn current_column_order(&self) -> &[String] {
        self.column_order.order()
    }

    pub fn current_sort_descriptor(&self) -> Option<&SortDescriptor> {
        self.sort.descriptor()
    }

    pub fn active_row_id(&self) -> Option<&T::Key> {
        self.selection.active()
    }

    pub fn hovered_row_id(&self) -> Option<&T::Key> {
        self.selection.hovered()
    }

    /// Whether the row's selection affordance should be drawn.
    pub fn shows_affordance(&self, key: &T::Key) -> bool {
        self.selection.shows_affordance(key)
    }

    /// Column currently being dragged.
    pub fn dragging_column(&self) -> Option<&str> {
        self.column_order.pending_drag_source()
    }

    /// Column definitions in definition order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by id.
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Column definitions in display order.
    pub fn ordered_columns(&self) -> Vec<&Column> {
        self.column_order
            .order()
            .iter()
            .filter_map(|id| self.column(id))
            .collect()
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> u32 {
        self.columns.iter().map(|c| u32::from(c.width)).sum()
    }

    /// Snapshot of the structural state.
    pub fn summary(&self) -> TableSummary<T::Key> {
        TableSummary {
            sort: self.sort.descriptor().cloned(),
            column_order: self.column_order.order().to_vec(),
            page_index: self.pagination.page_index(),
            active_row_id: self.selection.active().cloned(),
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed since the last redraw.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

/// Reject row sets with repeated keys.
fn validate_rows<T: TableRow>(rows: &[T]) -> Result<(), TableError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        let key = row.key();
        if seen.contains(&key) {
            return Err(TableError::DuplicateRowId(key.to_string()));
        }
        seen.insert(key);
    }
    Ok(())
}
