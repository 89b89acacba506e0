//! Table formatter - display ordering, column shaping, pagination

use serde::Serialize;

use crate::domain::NormalizedRow;

/// Display column headers, in render order
pub const DISPLAY_COLUMNS: [&str; 8] = [
    "Date",
    "Category",
    "Heading",
    "Supplier",
    "Supplier Invoice",
    "Invoice Gross",
    "Property Amount",
    "Property Count",
];

/// One page of a display-sorted row set plus pagination metadata.
///
/// Recomputed on every query; never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub rows: Vec<NormalizedRow>,
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

impl PageView {
    /// 1-based index of the first row on this page, 0 for an empty set
    pub fn start_row(&self) -> usize {
        if self.total_rows == 0 {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// 1-based index of the last row on this page, 0 for an empty set
    pub fn end_row(&self) -> usize {
        usize::min(self.page * self.page_size, self.total_rows)
    }
}

/// Sort rows for display, most recent invoice date first.
///
/// Equal dates keep their original insertion order (stable sort).
pub fn sort_for_display(rows: &[NormalizedRow]) -> Vec<NormalizedRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.invoice_date.cmp(&a.invoice_date));
    sorted
}

/// Render one row as display-column cell text.
///
/// The CSV export writes these same cells, so the downloaded file can never
/// disagree with the on-screen table.
pub fn format_cells(row: &NormalizedRow) -> [String; 8] {
    [
        row.invoice_date.format("%Y-%m-%d").to_string(),
        row.category.clone(),
        row.heading.clone(),
        row.supplier_name.clone(),
        row.supplier_invoice.clone(),
        format!("{:.2}", row.invoice_gross),
        format!("{:.2}", row.property_amount),
        row.property_count.to_string(),
    ]
}

/// Slice a display-sorted row set into a single page.
///
/// The 1-based page number is clamped into [1, total_pages] instead of
/// erroring; a live pager can transiently request a stale page after the
/// filtered set shrinks. total_pages is at least 1 even for an empty set,
/// and page_size floors at 1.
pub fn paginate(rows: &[NormalizedRow], page_size: usize, page: usize) -> PageView {
    let page_size = page_size.max(1);
    let total_rows = rows.len();
    let total_pages = usize::max(1, total_rows.div_ceil(page_size));
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = usize::min(start + page_size, total_rows);
    let rows = if start < total_rows {
        rows[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageView {
        rows,
        page,
        page_size,
        total_rows,
        total_pages,
    }
}
