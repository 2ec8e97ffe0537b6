//! Tests for the composed table engine.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use table_engine::prelude::*;

fn columns() -> Vec<Column> {
    vec![
        Column::new("select", "").row_id().no_drag().unsortable().width(40),
        Column::new("A", "Alpha"),
        Column::new("B", "Beta"),
        Column::new("C", "Gamma"),
    ]
}

fn rows(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"id": i, "A": format!("row {i:03}"), "B": (count - i) as u64, "C": i % 3}))
        .collect()
}

fn engine(count: usize) -> TableEngine<Record> {
    TableEngine::from_values(columns(), rows(count), TableConfig::new("id")).unwrap()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Records every observer call as a string.
fn recorder(engine: &mut TableEngine<Record>) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&log);
    engine.on_sort_or_columns_changed(move |sort, order| {
        let sort = sort
            .map(|d| format!("{}:{:?}", d.column_id, d.direction))
            .unwrap_or_else(|| "none".to_string());
        sink.lock().unwrap().push(format!("sort={} order={}", sort, order.join(",")));
    });

    let sink = Arc::clone(&log);
    engine.on_selection_changed(move |active| {
        sink.lock().unwrap().push(format!("active={:?}", active.map(|k| k.to_string())));
    });

    let sink = Arc::clone(&log);
    engine.on_page_changed(move |page| {
        sink.lock().unwrap().push(format!("page={}", page));
    });

    log
}

fn take(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_header_click_scenario() {
    let mut table = engine(5);
    table.on_header_click("B");
    assert_eq!(table.current_sort_descriptor(), Some(&SortDescriptor::asc("B")));
    table.on_header_click("B");
    assert_eq!(table.current_sort_descriptor(), Some(&SortDescriptor::desc("B")));
    table.on_header_click("A");
    assert_eq!(table.current_sort_descriptor(), Some(&SortDescriptor::asc("A")));
    table.on_header_click("A");
    table.on_header_click("A");
    assert_eq!(table.current_sort_descriptor(), None);
}

#[test]
fn test_unsortable_and_unknown_headers_ignored() {
    let mut table = engine(5);
    let log = recorder(&mut table);
    assert!(!table.on_header_click("select"));
    assert!(!table.on_header_click("nope"));
    assert_eq!(table.current_sort_descriptor(), None);
    assert!(take(&log).is_empty());
}

#[test]
fn test_page_rows_follow_sort() {
    let mut table = engine(57);
    // B counts down from 57, so ascending B reverses the data.
    table.on_header_click("B");
    let first: Vec<String> = table.page_rows().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(first.len(), 25);
    assert_eq!(first[0], "56");
    assert_eq!(first[24], "32");

    table.on_page_request(PageRequest::Last);
    let last: Vec<String> = table.page_rows().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(last, vec!["6", "5", "4", "3", "2", "1", "0"]);
}

#[test]
fn test_sort_change_returns_to_first_page() {
    let mut table = engine(57);
    table.on_page_request(PageRequest::GoTo(2));
    let log = recorder(&mut table);

    table.on_header_click("A");
    assert_eq!(table.page_index(), 0);
    assert_eq!(
        take(&log),
        vec!["sort=A:Asc order=select,A,B,C".to_string(), "page=0".to_string()]
    );
}

#[test]
fn test_default_sort_applied() {
    let config = TableConfig::new("id").default_sort(DefaultSort::desc("A"));
    let table = TableEngine::from_values(columns(), rows(3), config).unwrap();
    assert_eq!(table.current_sort_descriptor(), Some(&SortDescriptor::desc("A")));
    assert_eq!(table.page_rows()[0].id(), &RowId::from("2"));
}

#[test]
fn test_default_sort_unknown_column() {
    let config = TableConfig::new("id").default_sort(DefaultSort::asc("Z"));
    let err = TableEngine::from_values(columns(), rows(3), config).unwrap_err();
    assert!(matches!(err, TableError::UnknownSortColumn(id) if id == "Z"));
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_pagination_scenario() {
    let mut table = engine(57);
    assert_eq!(table.page_count(), 3);
    assert!(table.shows_pagination());
    assert!(table.on_page_request(PageRequest::GoTo(10)));
    assert_eq!(table.page_index(), 2);
    assert!(!table.can_next_page());
    assert!(table.can_previous_page());
    assert!(!table.on_page_request(PageRequest::Next));
}

#[test]
fn test_default_page_index_clamped() {
    let config = TableConfig::new("id").default_page_index(9);
    let table = TableEngine::from_values(columns(), rows(57), config).unwrap();
    assert_eq!(table.page_index(), 2);
}

#[test]
fn test_page_size_request() {
    let mut table = engine(57);
    table.on_page_request(PageRequest::GoTo(2));
    let log = recorder(&mut table);

    assert!(table.on_page_request(PageRequest::PageSize(50)));
    assert_eq!(table.page_count(), 2);
    assert_eq!(table.page_index(), 1);
    assert_eq!(take(&log), vec!["page=1".to_string()]);

    assert!(!table.on_page_request(PageRequest::PageSize(0)));
    assert_eq!(table.page_size(), 50);
    assert!(take(&log).is_empty());
}

#[test]
fn test_go_to_input_request() {
    let mut table = engine(57);
    assert!(table.on_page_request(PageRequest::GoToInput("2".into())));
    assert_eq!(table.page_index(), 1);
    assert!(!table.on_page_request(PageRequest::GoToInput("two".into())));
    assert_eq!(table.page_index(), 1);
}

#[test]
fn test_no_page_notification_for_noop() {
    let mut table = engine(57);
    let log = recorder(&mut table);
    assert!(!table.on_page_request(PageRequest::Previous));
    assert!(!table.on_page_request(PageRequest::First));
    assert!(take(&log).is_empty());
}

// =============================================================================
// Column order
// =============================================================================

#[test]
fn test_column_drop_scenario() {
    let cols = vec![
        Column::new("A", "A"),
        Column::new("B", "B"),
        Column::new("C", "C"),
        Column::new("D", "D"),
    ];
    let mut table = TableEngine::from_values(cols, rows(2), TableConfig::new("id")).unwrap();
    let log = recorder(&mut table);

    assert!(table.on_column_drag_start("D"));
    assert_eq!(table.dragging_column(), Some("D"));
    assert!(table.on_column_drop(Some(0)));
    assert_eq!(table.current_column_order(), ids(&["D", "A", "B", "C"]).as_slice());
    assert_eq!(table.dragging_column(), None);
    assert_eq!(take(&log), vec!["sort=none order=D,A,B,C".to_string()]);

    let ordered: Vec<&str> = table.ordered_columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ordered, vec!["D", "A", "B", "C"]);
}

#[test]
fn test_pinned_column_drop_is_noop() {
    let mut table = engine(2);
    let log = recorder(&mut table);
    assert!(!table.on_column_drag_start("select"));
    assert!(!table.on_column_drop(Some(3)));
    assert!(!table.on_column_drop_from("select", Some(3)));
    assert_eq!(
        table.current_column_order(),
        ids(&["select", "A", "B", "C"]).as_slice()
    );
    assert!(take(&log).is_empty());
}

#[test]
fn test_drop_outside_and_cancel() {
    let mut table = engine(2);
    let log = recorder(&mut table);

    table.on_column_drag_start("B");
    assert!(!table.on_column_drop(None));
    assert_eq!(table.dragging_column(), None);

    table.on_column_drag_start("B");
    table.on_column_drag_cancel();
    assert!(!table.on_column_drop(Some(0)));
    assert!(take(&log).is_empty());
}

#[test]
fn test_one_shot_drop() {
    let mut table = engine(2);
    assert!(table.on_column_drop_from("C", Some(1)));
    assert_eq!(
        table.current_column_order(),
        ids(&["select", "C", "A", "B"]).as_slice()
    );
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_row_click_toggles_and_notifies() {
    let mut table = engine(5);
    let log = recorder(&mut table);

    assert_eq!(table.on_row_click(RowId::from("3")), Some(&RowId::from("3")));
    assert_eq!(table.on_row_click(RowId::from("3")), None);
    assert_eq!(table.active_row_id(), None);
    assert_eq!(
        take(&log),
        vec![
            "active=Some(\"3\")".to_string(),
            "active=None".to_string()
        ]
    );
}

#[test]
fn test_notify_initial_reports_current_state() {
    let config = TableConfig::new("id").default_sort(DefaultSort::desc("B"));
    let mut table = TableEngine::from_values(columns(), rows(3), config).unwrap();
    let log = recorder(&mut table);
    assert!(take(&log).is_empty());

    table.notify_initial();
    assert_eq!(
        take(&log),
        vec![
            "sort=B:Desc order=select,A,B,C".to_string(),
            "page=0".to_string(),
            "active=None".to_string(),
        ]
    );
    assert!(!table.is_dirty());
}

#[test]
fn test_hover_does_not_notify() {
    let mut table = engine(5);
    let log = recorder(&mut table);
    table.clear_dirty();

    assert!(table.on_row_hover(Some(RowId::from("1"))));
    assert!(table.is_dirty());
    assert!(table.shows_affordance(&RowId::from("1")));
    assert!(!table.on_row_hover(Some(RowId::from("1"))));
    assert!(table.on_row_hover(None));
    assert_eq!(table.hovered_row_id(), None);
    assert!(take(&log).is_empty());
}

#[test]
fn test_stale_active_row_kept_after_refresh() {
    let mut table = engine(5);
    table.on_row_click(RowId::from("4"));
    table.set_values(rows(2)).unwrap();
    assert_eq!(table.active_row_id(), Some(&RowId::from("4")));
    assert!(table.find_row(&RowId::from("4")).is_none());

    assert!(table.clear_selection());
    assert_eq!(table.active_row_id(), None);
    assert!(!table.clear_selection());
}

// =============================================================================
// Data refresh
// =============================================================================

#[test]
fn test_set_rows_clamps_page() {
    let mut table = engine(57);
    table.on_page_request(PageRequest::Last);
    let log = recorder(&mut table);

    table.set_values(rows(30)).unwrap();
    assert_eq!(table.page_index(), 1);
    assert_eq!(table.page_rows().len(), 5);
    assert_eq!(take(&log), vec!["page=1".to_string()]);
}

#[test]
fn test_refresh_keeps_configured_row_id_field() {
    let config = TableConfig::new("sku");
    let rows = vec![json!({"sku": "a-1", "id": 9}), json!({"sku": "a-2", "id": 8})];
    let mut table = TableEngine::from_values(columns(), rows, config).unwrap();
    assert_eq!(table.row_id_field(), "sku");
    table.on_row_click(RowId::from("a-2"));

    table
        .set_values(vec![json!({"sku": "a-2", "id": 1}), json!({"sku": "a-3", "id": 2})])
        .unwrap();
    assert!(table.find_row(&RowId::from("a-2")).is_some());
    assert!(table.find_row(&RowId::from("1")).is_none());
    assert!(table.shows_affordance(&RowId::from("a-2")));

    let err = table.set_values(vec![json!({"id": 3})]).unwrap_err();
    assert!(matches!(err, TableError::MissingRowId { ref field, .. } if field == "sku"));
}

#[test]
fn test_set_rows_rejects_duplicates() {
    let mut table = engine(3);
    let err = table
        .set_values(vec![json!({"id": 1}), json!({"id": "1"})])
        .unwrap_err();
    assert!(matches!(err, TableError::DuplicateRowId(id) if id == "1"));
    assert_eq!(table.row_count(), 3);
}

#[test]
fn test_set_columns_clears_removed_sort() {
    let mut table = engine(3);
    table.on_header_click("B");
    let log = recorder(&mut table);

    let next = vec![
        Column::new("select", "").row_id().no_drag(),
        Column::new("A", "Alpha"),
        Column::new("C", "Gamma"),
        Column::new("D", "Delta"),
    ];
    table.set_columns(next).unwrap();
    assert_eq!(table.current_sort_descriptor(), None);
    assert_eq!(
        table.current_column_order(),
        ids(&["select", "A", "C", "D"]).as_slice()
    );
    assert_eq!(take(&log), vec!["sort=none order=select,A,C,D".to_string()]);
}

#[test]
fn test_set_columns_keeps_user_order() {
    let mut table = engine(3);
    table.on_column_drop_from("C", Some(1));

    let mut next = columns();
    next.push(Column::new("E", "Epsilon"));
    table.set_columns(next).unwrap();
    assert_eq!(
        table.current_column_order(),
        ids(&["select", "C", "A", "B", "E"]).as_slice()
    );
}

#[test]
fn test_duplicate_columns_rejected() {
    let cols = vec![Column::new("A", "A"), Column::new("A", "A2")];
    let err = TableEngine::from_values(cols, rows(1), TableConfig::new("id")).unwrap_err();
    assert!(matches!(err, TableError::DuplicateColumn(_)));
}

#[test]
fn test_summary_serializes() {
    let mut table = engine(57);
    table.on_header_click("A");
    table.on_header_click("A");
    table.on_page_request(PageRequest::Next);
    table.on_row_click(RowId::from("9"));

    let summary = serde_json::to_value(table.summary()).unwrap();
    assert_eq!(
        summary,
        json!({
            "sort": {"accessor": "A", "direction": "DESC"},
            "column_order": ["select", "A", "B", "C"],
            "page_index": 1,
            "active_row_id": "9"
        })
    );
}

#[test]
fn test_total_width() {
    let table = engine(1);
    assert_eq!(table.total_width(), 40 + 150 * 3);
}
