//! Thread-shareable handle to a table engine.
//!
//! The engine's sub-states are not independently safe to update, so the
//! whole engine sits behind one mutex. A poisoned lock turns operations into
//! no-ops and reads into defaults.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::column::Column;
use crate::config::TableConfig;
use crate::engine::{PageRequest, TableEngine};
use crate::error::TableError;
use crate::observer::TableSummary;
use crate::row::TableRow;
use crate::sort::SortDescriptor;

/// Unique identifier for a shared table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// A cloneable handle to one engine, shared across threads.
///
/// Observers run while the lock is held. Calling back into the same handle
/// from an observer deadlocks; defer such calls instead.
#[derive(Debug)]
pub struct SharedTableEngine<T: TableRow> {
    id: TableId,
    inner: Arc<Mutex<TableEngine<T>>>,
}

impl<T: TableRow> Clone for SharedTableEngine<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: TableRow> From<TableEngine<T>> for SharedTableEngine<T> {
    fn from(engine: TableEngine<T>) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(Mutex::new(engine)),
        }
    }
}

impl<T: TableRow> SharedTableEngine<T> {
    /// Create a shared engine.
    pub fn new(columns: Vec<Column>, rows: Vec<T>, config: TableConfig) -> Result<Self, TableError> {
        TableEngine::new(columns, rows, config).map(Self::from)
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Run a closure with exclusive access to the engine.
    ///
    /// Returns `None` if the lock is poisoned.
    pub fn with<R>(&self, f: impl FnOnce(&mut TableEngine<T>) -> R) -> Option<R> {
        match self.inner.lock() {
            Ok(mut guard) => Some(f(&mut guard)),
            Err(_) => {
                log::error!("Table {} lock poisoned", self.id);
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    pub fn on_header_click(&self, column_id: &str) -> bool {
        self.with(|e| e.on_header_click(column_id))
            .unwrap_or(false)
    }

    pub fn on_column_drag_start(&self, column_id: &str) -> bool {
        self.with(|e| e.on_column_drag_start(column_id))
            .unwrap_or(false)
    }

    pub fn on_column_drop(&self, target_position: Option<usize>) -> bool {
        self.with(|e| e.on_column_drop(target_position))
            .unwrap_or(false)
    }

    pub fn on_column_drag_cancel(&self) {
        self.with(|e| e.on_column_drag_cancel());
    }

    pub fn on_column_drop_from(&self, source_id: &str, target_position: Option<usize>) -> bool {
        self.with(|e| e.on_column_drop_from(source_id, target_position))
            .unwrap_or(false)
    }

    pub fn on_page_request(&self, request: PageRequest) -> bool {
        self.with(|e| e.on_page_request(request)).unwrap_or(false)
    }

    pub fn on_row_hover(&self, key: Option<T::Key>) -> bool {
        self.with(|e| e.on_row_hover(key)).unwrap_or(false)
    }

    /// Toggle the active row. Returns the new active row.
    pub fn on_row_click(&self, key: T::Key) -> Option<T::Key> {
        self.with(|e| e.on_row_click(key).cloned()).flatten()
    }

    pub fn notify_initial(&self) {
        self.with(|e| e.notify_initial());
    }

    pub fn clear_selection(&self) -> bool {
        self.with(|e| e.clear_selection()).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Cloned rows of the current page.
    pub fn page_rows(&self) -> Vec<T> {
        self.with(|e| e.page_rows().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn page_count(&self) -> usize {
        self.with(|e| e.page_count()).unwrap_or(0)
    }

    pub fn page_index(&self) -> usize {
        self.with(|e| e.page_index()).unwrap_or(0)
    }

    pub fn current_column_order(&self) -> Vec<String> {
        self.with(|e| e.current_column_order().to_vec())
            .unwrap_or_default()
    }

    pub fn current_sort_descriptor(&self) -> Option<SortDescriptor> {
        self.with(|e| e.current_sort_descriptor().cloned())
            .flatten()
    }

    pub fn active_row_id(&self) -> Option<T::Key> {
        self.with(|e| e.active_row_id().cloned()).flatten()
    }

    pub fn summary(&self) -> Option<TableSummary<T::Key>> {
        self.with(|e| e.summary())
    }

    /// Check and clear the dirty flag in one step.
    pub fn take_dirty(&self) -> bool {
        self.with(|e| {
            let dirty = e.is_dirty();
            e.clear_dirty();
            dirty
        })
        .unwrap_or(false)
    }
}
