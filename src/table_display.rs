use crate::data::datatable::DataTable;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use crossterm::style::Stylize;

/// Build a grid with a leading row-index column and bold headers
pub fn render_table(data: &DataTable, datetime_format: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers = vec![Cell::new("").add_attribute(Attribute::Bold)];
    headers.extend(
        data.column_names()
            .into_iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
    );
    table.set_header(headers);

    for row in 0..data.row_count() {
        let mut cells = vec![Cell::new(row).set_alignment(CellAlignment::Right)];
        cells.extend(
            data.columns
                .iter()
                .map(|c| Cell::new(c.values[row].format_with(datetime_format))),
        );
        table.add_row(cells);
    }

    table
}

/// Print a table followed by a row count
pub fn display_table(data: &DataTable, datetime_format: &str) {
    if data.column_count() == 0 {
        println!("{}", "No columns to display.".yellow());
        return;
    }

    println!("{}", render_table(data, datetime_format));
    println!("\n{}", format!("{} rows", data.row_count()).green());
}
