use super::ui;
use crate::core::exclusions::ExclusionRegistry;
use anyhow::Result;
use comfy_table::Cell;

/// Prints the effective exclusion set and where each entry came from, for
/// diagnosing surprising skips in the summary.
pub fn run(registry: &ExclusionRegistry) -> Result<()> {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Symbol"), ui::header_cell("Source")]);

    for symbol in registry.builtin() {
        table.add_row(vec![Cell::new(symbol.as_str()), Cell::new("built-in")]);
    }
    for symbol in registry.from_file() {
        if !registry.builtin().contains(symbol) {
            table.add_row(vec![Cell::new(symbol.as_str()), Cell::new("file")]);
        }
    }

    println!(
        "{}\n\n{}",
        ui::style_text("Excluded symbols", ui::StyleType::Title),
        table
    );
    Ok(())
}
