use crate::ui::viewmodel::DisplayRow;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

#[must_use]
pub fn render_rows(columns: &[&str], rows: &[DisplayRow]) -> String {
    let mut table = new_table();
    table.set_header(columns.to_vec());
    for row in rows {
        table.add_row(row.cells.clone());
    }
    table.to_string()
}

/// Two-column table for a single record.
#[must_use]
pub fn render_key_values<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    for (key, value) in pairs {
        table.add_row(vec![key.as_ref(), value.as_ref()]);
    }
    table.to_string()
}
