use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dispense_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.out_dir.display());
    match result.anchor {
        Some(anchor) => println!("Latest day: {anchor} (freq {})", result.frequency),
        None => println!("Latest day: - (freq {})", result.frequency),
    }
    let lookups: Vec<String> = result
        .lookups
        .iter()
        .map(|(domain, entries)| format!("{domain}={entries}"))
        .collect();
    println!("Lookups: {}", lookups.join(", "));

    print_batch_table(result);
    print_kpi_table(result);
}

fn print_batch_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Batch"),
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Kept"),
        header_cell("Undated"),
        header_cell("Not critical"),
    ]);
    apply_table_style(&mut table, 120);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for batch in &result.batches {
        table.add_row(vec![
            Cell::new(&batch.file_name),
            Cell::new(batch.columns),
            Cell::new(batch.rows_read),
            count_cell(batch.rows_kept, Color::Green),
            count_cell(batch.undated, Color::Yellow),
            dim_cell(batch.unclassified),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.rows_read()).add_attribute(Attribute::Bold),
        count_cell(result.rows_kept(), Color::Green).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn print_kpi_table(result: &RunResult) {
    if result.kpis.is_empty() {
        println!("No critical-supply items found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("Total"),
        header_cell("Last 7d"),
        header_cell("Last 30d"),
        header_cell("Avg/day 30d"),
    ]);
    apply_table_style(&mut table, 100);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for kpi in &result.kpis {
        table.add_row(vec![
            Cell::new(&kpi.item).add_attribute(Attribute::Bold),
            Cell::new(format_quantity(kpi.total)),
            Cell::new(format_quantity(kpi.last_7_days)),
            Cell::new(format_quantity(kpi.last_30_days)),
            Cell::new(format!("{:.2}", kpi.avg_daily_30_days)),
        ]);
    }
    println!();
    println!("Items:");
    println!("{table}");
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
