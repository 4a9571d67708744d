use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cells(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

/// Colours an execution status the way the CodePipeline console does.
pub fn status_cell(status: Option<&str>) -> Cell {
    match status {
        Some(status @ "Succeeded") => Cell::new(status).fg(TableColor::Green),
        Some(status @ ("InProgress" | "Stopping")) => Cell::new(status).fg(TableColor::Yellow),
        Some(status @ ("Failed" | "Abandoned" | "Stopped")) => {
            Cell::new(status).fg(TableColor::Red)
        }
        Some(status) => Cell::new(status),
        None => Cell::new("-").fg(TableColor::DarkGrey),
    }
}

pub fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").fg(TableColor::DarkGrey),
    }
}
