//! Column ordering and drag-reorder.

use std::collections::HashSet;

use crate::column::Column;

/// Move `source_id` to `target_position`.
///
/// The source is removed first and then inserted at `target_position` in
/// the remaining sequence, so it lands right before the column that was at
/// that index after removal. Positions past the end append. An unknown
/// source or a missing target leaves the order unchanged.
pub fn reorder(order: &[String], source_id: &str, target_position: Option<usize>) -> Vec<String> {
    let mut next = order.to_vec();
    let Some(target) = target_position else {
        return next;
    };
    let Some(from) = next.iter().position(|id| id == source_id) else {
        return next;
    };
    let moved = next.remove(from);
    let target = target.min(next.len());
    next.insert(target, moved);
    next
}

/// Ordered visible column ids plus the in-flight drag, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOrderController {
    order: Vec<String>,
    /// Columns that cannot be dragged.
    pinned: HashSet<String>,
    /// Column picked up by the current drag gesture.
    pending_drag_source: Option<String>,
}

impl ColumnOrderController {
    /// Start with the columns in definition order.
    pub fn new(columns: &[Column]) -> Self {
        Self {
            order: columns.iter().map(|c| c.id.clone()).collect(),
            pinned: Self::pinned_ids(columns),
            pending_drag_source: None,
        }
    }

    fn pinned_ids(columns: &[Column]) -> HashSet<String> {
        columns
            .iter()
            .filter(|c| c.no_drag)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Current order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Position of a column in the current order.
    pub fn position_of(&self, column_id: &str) -> Option<usize> {
        self.order.iter().position(|id| id == column_id)
    }

    /// Check if a column exists and may be dragged.
    pub fn is_draggable(&self, column_id: &str) -> bool {
        !self.pinned.contains(column_id) && self.position_of(column_id).is_some()
    }

    /// Column held by the current drag gesture.
    pub fn pending_drag_source(&self) -> Option<&str> {
        self.pending_drag_source.as_deref()
    }

    /// Re-align the order with a new column set.
    ///
    /// Ids still present keep their relative order, new ids are appended in
    /// definition order. Returns `true` if the order changed.
    pub fn sync_columns(&mut self, columns: &[Column]) -> bool {
        let incoming: HashSet<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        let mut next: Vec<String> = self
            .order
            .iter()
            .filter(|id| incoming.contains(id.as_str()))
            .cloned()
            .collect();
        for column in columns {
            if !next.contains(&column.id) {
                next.push(column.id.clone());
            }
        }

        self.pinned = Self::pinned_ids(columns);
        if let Some(source) = &self.pending_drag_source
            && !incoming.contains(source.as_str())
        {
            self.pending_drag_source = None;
        }

        let changed = next != self.order;
        self.order = next;
        changed
    }

    /// Move a column. Pinned or unknown sources are ignored.
    ///
    /// Returns `true` if the order changed.
    pub fn reorder(&mut self, source_id: &str, target_position: Option<usize>) -> bool {
        if !self.is_draggable(source_id) {
            log::debug!("Column '{}' is not draggable", source_id);
            return false;
        }
        let next = reorder(&self.order, source_id, target_position);
        if next == self.order {
            return false;
        }
        self.order = next;
        true
    }

    /// Pick up a column. Returns `false` for pinned or unknown columns.
    pub fn begin_drag(&mut self, column_id: &str) -> bool {
        if !self.is_draggable(column_id) {
            return false;
        }
        self.pending_drag_source = Some(column_id.to_string());
        true
    }

    /// Finish the drag at `target_position`. The pending source is cleared
    /// whether or not the drop lands.
    ///
    /// Returns `true` if the order changed.
    pub fn drop_at(&mut self, target_position: Option<usize>) -> bool {
        let Some(source) = self.pending_drag_source.take() else {
            return false;
        };
        self.reorder(&source, target_position)
    }

    /// Abandon the drag. Returns `true` if one was in flight.
    pub fn cancel_drag(&mut self) -> bool {
        self.pending_drag_source.take().is_some()
    }
}
