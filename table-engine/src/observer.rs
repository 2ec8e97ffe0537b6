//! Change notification.
//!
//! Observers are called synchronously by the engine operation that caused
//! the change, after every sub-state has been updated. Observers must not
//! call back into the same engine.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::sort::{SortDescriptor, descriptor_json};

/// Called with the current sort descriptor and column order.
pub type SortOrColumnsObserver = Box<dyn FnMut(Option<&SortDescriptor>, &[String]) + Send>;

/// Called with the current active row.
pub type SelectionObserver<K> = Box<dyn FnMut(Option<&K>) + Send>;

/// Called with the current page index.
pub type PageObserver = Box<dyn FnMut(usize) + Send>;

/// Which structural parts of the table an operation touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub sort: bool,
    pub columns: bool,
    pub page: bool,
    pub selection: bool,
}

impl Changes {
    /// Every part changed.
    pub fn all() -> Self {
        Self {
            sort: true,
            columns: true,
            page: true,
            selection: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.sort || self.columns || self.page || self.selection)
    }
}

/// Registered observers, grouped by what they listen to.
pub struct TableObservers<K> {
    sort_or_columns: Vec<SortOrColumnsObserver>,
    selection: Vec<SelectionObserver<K>>,
    page: Vec<PageObserver>,
}

impl<K> Default for TableObservers<K> {
    fn default() -> Self {
        Self {
            sort_or_columns: Vec::new(),
            selection: Vec::new(),
            page: Vec::new(),
        }
    }
}

impl<K> fmt::Debug for TableObservers<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableObservers")
            .field("sort_or_columns", &self.sort_or_columns.len())
            .field("selection", &self.selection.len())
            .field("page", &self.page.len())
            .finish()
    }
}

impl<K> TableObservers<K> {
    pub fn add_sort_or_columns(&mut self, observer: SortOrColumnsObserver) {
        self.sort_or_columns.push(observer);
    }

    pub fn add_selection(&mut self, observer: SelectionObserver<K>) {
        self.selection.push(observer);
    }

    pub fn add_page(&mut self, observer: PageObserver) {
        self.page.push(observer);
    }

    /// Dispatch the observers interested in `changes`.
    pub fn notify(
        &mut self,
        changes: Changes,
        sort: Option<&SortDescriptor>,
        order: &[String],
        page_index: usize,
        active: Option<&K>,
    ) {
        if changes.sort || changes.columns {
            for observer in &mut self.sort_or_columns {
                observer(sort, order);
            }
        }
        if changes.page {
            for observer in &mut self.page {
                observer(page_index);
            }
        }
        if changes.selection {
            for observer in &mut self.selection {
                observer(active);
            }
        }
    }
}

/// Snapshot of the structural table state, as reported to hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary<K> {
    /// `{}` when unsorted.
    #[serde(serialize_with = "serialize_sort")]
    pub sort: Option<SortDescriptor>,
    pub column_order: Vec<String>,
    pub page_index: usize,
    pub active_row_id: Option<K>,
}

fn serialize_sort<S: Serializer>(
    sort: &Option<SortDescriptor>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    descriptor_json(sort.as_ref()).serialize(serializer)
}
