//! Walks the data table through its triggers and prints each view.
//!
//! Run with `cargo run --example table_browser`.

use std::time::Duration;

use simplelog::{Config, LevelFilter, SimpleLogger};

use tablekit::prelude::*;

fn dataset() -> Vec<Row> {
    let names = [
        "Ada Lovelace",
        "Grace Hopper",
        "Alan Turing",
        "Edsger Dijkstra",
        "Barbara Liskov",
        "Donald Knuth",
        "Margaret Hamilton",
        "Tony Hoare",
        "Frances Allen",
        "John Backus",
        "Niklaus Wirth",
        "Katherine Johnson",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Row::new(format!("u-{i}"))
                .set("name", *name)
                .set("team", if i % 2 == 0 { "compilers" } else { "systems" })
                .set("commits", (i as i64 + 1) * 37)
        })
        .collect()
}

fn print_page(table: &DataTable) {
    println!(
        "page {}/{} ({} matching rows)",
        table.current_page(),
        table.total_pages(),
        table.processed_len()
    );
    for row in table.page_rows() {
        println!(
            "  [{}] {:<20} {:<10} {}",
            if table.selected_rows().iter().any(|r| r.id() == row.id()) {
                "x"
            } else {
                " "
            },
            row.get_string("name").unwrap().unwrap_or(""),
            row.get_string("team").unwrap().unwrap_or(""),
            row.get_long("commits").unwrap().unwrap_or(0),
        );
    }
}

#[tokio::main]
async fn main() {
    SimpleLogger::init(LevelFilter::Debug, Config::default()).expect("Failed to initialize logger");

    let table = DataTable::new();
    table.on_selection_change(|rows| {
        println!("-> {} row(s) selected", rows.len());
    });
    table.on_row_activate(|row| {
        println!("-> activated {}", row.id());
    });

    table.configure(
        dataset(),
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("team", "Team").sortable(),
            Column::new("commits", "Commits").sortable(),
        ],
        5,
    );
    println!("== initial view ==");
    print_page(&table);

    println!("\n== sorted by commits, descending ==");
    table.request_sort("commits");
    table.request_sort("commits");
    print_page(&table);

    println!("\n== second page, two rows toggled ==");
    table.request_page(2);
    table.toggle_row(0);
    table.toggle_row(1);
    print_page(&table);

    println!("\n== searching for \"an\" ==");
    table.set_search_input("a");
    table.set_search_input("an");
    // The committed term only updates after the quiet window
    tokio::time::sleep(Duration::from_millis(350)).await;
    print_page(&table);

    table.activate_row(0);
    table.dispose();
}
