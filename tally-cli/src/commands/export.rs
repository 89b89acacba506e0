//! Export command - write the filtered set as CSV

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tally_core::services::export::write_csv;

use crate::commands::{get_context, FilterArgs};
use crate::output;

pub fn run(file: &Path, filters: &FilterArgs, output_path: Option<PathBuf>) -> Result<()> {
    let ctx = get_context(file)?;
    let rows = ctx.filtered(&filters.criteria());
    let csv_text = write_csv(&rows)?;

    match output_path {
        Some(path) if path.as_os_str() == "-" => {
            print!("{csv_text}");
        }
        maybe_path => {
            let path = maybe_path.unwrap_or_else(default_output_path);
            std::fs::write(&path, &csv_text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!(
                "Exported {} invoices to {}",
                output::format_count(rows.len()),
                path.display()
            ));
        }
    }

    Ok(())
}

/// Date-stamped default export path
fn default_output_path() -> PathBuf {
    PathBuf::from(format!("invoice_data_{}.csv", Local::now().format("%Y%m%d")))
}
