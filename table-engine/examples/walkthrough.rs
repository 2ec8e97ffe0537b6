//! Walkthrough example - drives a table engine through a typical session.
//!
//! Builds a table of 57 orders, then sorts, pages, drags a column and
//! selects a row, printing what the observers see. Engine logs go to
//! `walkthrough.log`.

use std::fs::File;

use log::LevelFilter;
use serde_json::json;
use simplelog::{Config, WriteLogger};
use table_engine::prelude::*;
use table_engine::sort::descriptor_json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("walkthrough.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let columns = vec![
        Column::new("select", "").row_id().no_drag().unsortable().width(40),
        Column::new("order", "Order #").width(100),
        Column::new("customer", "Customer").width(220),
        Column::new("total", "Total").width(120),
    ];
    let customers = ["Acme", "Globex", "Initech", "Umbrella", "Hooli"];
    let rows = (0..57)
        .map(|i| {
            json!({
                "order_id": format!("SO-{:04}", 1000 + i),
                "order": 1000 + i,
                "customer": customers[i % customers.len()],
                "total": ((i * 37) % 500) as f64 + 0.99,
            })
        })
        .collect();

    let config = TableConfig::new("order_id").default_sort(DefaultSort::asc("order"));
    let mut table = TableEngine::from_values(columns, rows, config)?;

    table.on_sort_or_columns_changed(|sort, order| {
        println!("sort {} columns {:?}", descriptor_json(sort), order);
    });
    table.on_page_changed(|page| println!("page {}", page + 1));
    table.on_selection_changed(|active| println!("active {:?}", active));
    table.notify_initial();

    print_page(&table);

    table.on_header_click("total");
    table.on_header_click("total");
    print_page(&table);

    table.on_page_request(PageRequest::Next);
    table.on_page_request(PageRequest::GoToInput("7".into()));
    print_page(&table);

    table.on_column_drag_start("total");
    table.on_column_drop(Some(1));

    table.on_row_hover(Some(RowId::from("SO-1010")));
    table.on_row_click(RowId::from("SO-1010"));
    table.on_row_hover(None);

    println!("{}", serde_json::to_string_pretty(&table.summary())?);
    Ok(())
}

fn print_page(table: &TableEngine<Record>) {
    println!(
        "-- page {} of {} --",
        table.page_index() + 1,
        table.page_count()
    );
    for row in table.page_rows().iter().take(3) {
        let cells: Vec<String> = table
            .ordered_columns()
            .iter()
            .filter(|c| !c.is_row_id)
            .map(|c| row.get(&c.id).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        println!("{}", cells.join(" | "));
    }
}
