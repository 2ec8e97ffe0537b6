//! Tests for column reordering.

use table_engine::Column;
use table_engine::ColumnOrderController;
use table_engine::column_order::reorder;

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn columns(list: &[&str]) -> Vec<Column> {
    list.iter().map(|id| Column::new(*id, id.to_uppercase())).collect()
}

#[test]
fn test_drag_last_to_front() {
    let order = ids(&["A", "B", "C", "D"]);
    assert_eq!(reorder(&order, "D", Some(0)), ids(&["D", "A", "B", "C"]));
}

#[test]
fn test_drag_rightward_inserts_after_removal() {
    let order = ids(&["A", "B", "C", "D"]);
    assert_eq!(reorder(&order, "A", Some(2)), ids(&["B", "C", "A", "D"]));
}

#[test]
fn test_identity_move() {
    let order = ids(&["A", "B", "C", "D"]);
    for (position, id) in order.iter().enumerate() {
        assert_eq!(reorder(&order, id, Some(position)), order);
    }
}

#[test]
fn test_reorder_is_permutation() {
    let order = ids(&["A", "B", "C", "D", "E"]);
    let mut expected = order.clone();
    expected.sort();
    for source in &order {
        for target in 0..7 {
            let mut moved = reorder(&order, source, Some(target));
            moved.sort();
            assert_eq!(moved, expected);
        }
    }
}

#[test]
fn test_missing_target_or_source_is_noop() {
    let order = ids(&["A", "B", "C"]);
    assert_eq!(reorder(&order, "A", None), order);
    assert_eq!(reorder(&order, "Z", Some(0)), order);
}

#[test]
fn test_target_past_end_appends() {
    let order = ids(&["A", "B", "C"]);
    assert_eq!(reorder(&order, "A", Some(10)), ids(&["B", "C", "A"]));
}

#[test]
fn test_pinned_column_cannot_move() {
    let mut cols = columns(&["A", "B", "C"]);
    cols[0] = Column::new("A", "A").no_drag();
    let mut controller = ColumnOrderController::new(&cols);

    assert!(!controller.reorder("A", Some(2)));
    assert!(!controller.begin_drag("A"));
    assert_eq!(controller.pending_drag_source(), None);
    assert_eq!(controller.order(), ids(&["A", "B", "C"]).as_slice());

    // Other columns can still be dropped in front of it.
    assert!(controller.reorder("C", Some(0)));
    assert_eq!(controller.order(), ids(&["C", "A", "B"]).as_slice());
}

#[test]
fn test_drag_lifecycle() {
    let mut controller = ColumnOrderController::new(&columns(&["A", "B", "C", "D"]));

    assert!(controller.begin_drag("D"));
    assert_eq!(controller.pending_drag_source(), Some("D"));
    assert!(controller.drop_at(Some(0)));
    assert_eq!(controller.pending_drag_source(), None);
    assert_eq!(controller.order(), ids(&["D", "A", "B", "C"]).as_slice());

    assert!(controller.begin_drag("B"));
    assert!(!controller.drop_at(None));
    assert_eq!(controller.pending_drag_source(), None);

    assert!(controller.begin_drag("B"));
    assert!(controller.cancel_drag());
    assert!(!controller.drop_at(Some(0)));
    assert_eq!(controller.order(), ids(&["D", "A", "B", "C"]).as_slice());
}

#[test]
fn test_sync_preserves_order_and_appends() {
    let mut controller = ColumnOrderController::new(&columns(&["A", "B", "C"]));
    controller.reorder("C", Some(0));
    assert_eq!(controller.order(), ids(&["C", "A", "B"]).as_slice());

    assert!(controller.sync_columns(&columns(&["A", "B", "C", "E", "D"])));
    assert_eq!(controller.order(), ids(&["C", "A", "B", "E", "D"]).as_slice());

    assert!(controller.sync_columns(&columns(&["B", "C", "D"])));
    assert_eq!(controller.order(), ids(&["C", "B", "D"]).as_slice());

    assert!(!controller.sync_columns(&columns(&["D", "B", "C"])));
}

#[test]
fn test_sync_drops_vanished_drag_source() {
    let mut controller = ColumnOrderController::new(&columns(&["A", "B"]));
    controller.begin_drag("B");
    controller.sync_columns(&columns(&["A"]));
    assert_eq!(controller.pending_drag_source(), None);
}
