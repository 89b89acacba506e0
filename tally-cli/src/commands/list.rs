//! List command - the invoice table, one page at a time

use std::path::Path;

use anyhow::Result;
use tally_core::services::table::{format_cells, paginate, sort_for_display, DISPLAY_COLUMNS};

use crate::commands::{get_context, FilterArgs};
use crate::output;

pub fn run(
    file: &Path,
    filters: &FilterArgs,
    page: usize,
    page_size: Option<usize>,
    json: bool,
) -> Result<()> {
    let ctx = get_context(file)?;
    let rows = ctx.filtered(&filters.criteria());
    let sorted = sort_for_display(&rows);

    let page_size = page_size.unwrap_or(ctx.config.page_size);
    let view = paginate(&sorted, page_size, page);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if page != view.page {
        output::warning(&format!(
            "Page {page} is out of range, showing page {} of {}",
            view.page, view.total_pages
        ));
    }

    let mut table = output::create_table();
    table.set_header(DISPLAY_COLUMNS.to_vec());
    for row in &view.rows {
        table.add_row(format_cells(row).to_vec());
    }
    println!("{table}");

    if view.total_rows == 0 {
        output::info("No invoices match the current filters");
    } else {
        println!(
            "Showing {}-{} of {} invoices (page {} of {})",
            view.start_row(),
            view.end_row(),
            view.total_rows,
            view.page,
            view.total_pages
        );
    }

    Ok(())
}
