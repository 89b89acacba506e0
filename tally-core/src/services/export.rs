//! CSV export of the filtered invoice set

use csv::Writer;

use crate::domain::result::{Error, Result};
use crate::domain::NormalizedRow;
use crate::services::table::{self, DISPLAY_COLUMNS};

/// Serialize the full filtered set as CSV with the display columns.
///
/// The whole set is written in display order regardless of any pagination
/// the caller is showing; export is a separate operation from page
/// retrieval. Dates are plain ISO-8601 and amounts carry no currency
/// symbol.
pub fn write_csv(rows: &[NormalizedRow]) -> Result<String> {
    let sorted = table::sort_for_display(rows);

    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(DISPLAY_COLUMNS)?;
    for row in &sorted {
        writer.write_record(table::format_cells(row))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    tracing::debug!(rows = sorted.len(), "serialized csv export");

    // Every cell came from a Rust string, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
