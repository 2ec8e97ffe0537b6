//! Active and hovered row tracking.

use std::hash::Hash;

/// Tracks the single active row and the row under the pointer.
///
/// The two fields are independent. Hover changes are plain assignments so
/// they stay cheap at pointer-move frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController<K: Clone + Eq + Hash> {
    active: Option<K>,
    hovered: Option<K>,
}

impl<K: Clone + Eq + Hash> Default for SelectionController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> SelectionController<K> {
    pub fn new() -> Self {
        Self {
            active: None,
            hovered: None,
        }
    }

    /// The active row, if any.
    pub fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    /// The hovered row, if any.
    pub fn hovered(&self) -> Option<&K> {
        self.hovered.as_ref()
    }

    /// Set the hovered row. Returns `true` if it changed.
    pub fn set_hovered(&mut self, key: K) -> bool {
        if self.hovered.as_ref() == Some(&key) {
            return false;
        }
        self.hovered = Some(key);
        true
    }

    /// Clear the hovered row. Returns `true` if one was set.
    pub fn clear_hovered(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// Activate a row, or deactivate it if it is already active.
    ///
    /// Returns the new active row.
    pub fn toggle_active(&mut self, key: K) -> Option<&K> {
        if self.active.as_ref() == Some(&key) {
            self.active = None;
        } else {
            self.active = Some(key);
        }
        self.active.as_ref()
    }

    /// Clear the active row. Returns `true` if one was set.
    pub fn clear_active(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.active.as_ref() == Some(key)
    }

    pub fn is_hovered(&self, key: &K) -> bool {
        self.hovered.as_ref() == Some(key)
    }

    /// Whether the row's selection affordance should be visible: it is shown
    /// while the row is hovered or active.
    pub fn shows_affordance(&self, key: &K) -> bool {
        self.is_hovered(key) || self.is_active(key)
    }
}
