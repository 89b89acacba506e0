//! Integration tests for the tally-core aggregation engine
//!
//! These tests drive the public pipeline end to end: raw records through
//! normalization, filtering, aggregation, pagination, and CSV export.
//!
//! Run with: cargo test --test engine_tests -- --nocapture

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use tally_core::services::{aggregate, export, filter, table};
use tally_core::snapshot::Snapshot;
use tally_core::{
    DateRange, FilterCriteria, InvoiceDocument, InvoiceRecord, PropertyCharge, TallyContext,
    TOP_CATEGORIES, TOP_SUPPLIERS,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a raw invoice record with the given analysis-relevant fields
fn invoice(category: &str, supplier: &str, gross_cents: i64, date: &str) -> InvoiceRecord {
    InvoiceRecord {
        category: category.to_string(),
        heading: format!("{category} work"),
        internal_reference: format!("INV-{supplier}-{date}"),
        invoice_date: date.to_string(),
        invoice_gross: Decimal::new(gross_cents, 2),
        supplier_invoice: format!("S-{supplier}"),
        supplier_name: supplier.to_string(),
        properties: vec![PropertyCharge {
            property_id: Some("P-1".to_string()),
            amount: Decimal::new(gross_cents, 2),
        }],
    }
}

/// The three-invoice worked example used throughout the scenario tests
fn scenario_records() -> Vec<InvoiceRecord> {
    vec![
        invoice("Repairs", "A", 10000, "2024-01-10"),
        invoice("Repairs", "B", 20000, "2024-02-05"),
        invoice("Cleaning", "A", 5000, "2024-02-20"),
    ]
}

/// Normalize records through the snapshot entry point
fn snapshot_of(records: Vec<InvoiceRecord>) -> Snapshot {
    Snapshot::from_document(InvoiceDocument {
        contractor_invoices: records,
    })
    .expect("records should normalize")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Aggregation Scenario Tests
// ============================================================================

#[test]
fn test_category_totals_match_worked_example() {
    let snapshot = snapshot_of(scenario_records());
    let totals = aggregate::category_totals(snapshot.rows());

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].category, "Repairs");
    assert_eq!(totals[0].total, Decimal::new(30000, 2));
    assert_eq!(totals[1].category, "Cleaning");
    assert_eq!(totals[1].total, Decimal::new(5000, 2));
}

#[test]
fn test_monthly_totals_match_worked_example() {
    let snapshot = snapshot_of(scenario_records());
    let totals = aggregate::monthly_totals(snapshot.rows());

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].year_month, "2024-01");
    assert_eq!(totals[0].total, Decimal::new(10000, 2));
    assert_eq!(totals[1].year_month, "2024-02");
    assert_eq!(totals[1].total, Decimal::new(25000, 2));
}

#[test]
fn test_supplier_filter_matches_worked_example() {
    let snapshot = snapshot_of(scenario_records());
    let criteria = FilterCriteria::from_selections(DateRange::default(), None, Some("A"));
    let rows = filter::apply(snapshot.rows(), &criteria);

    assert_eq!(rows.len(), 2);
    let metrics = aggregate::key_metrics(&rows);
    assert_eq!(metrics.total_gross, Decimal::new(15000, 2));
}

#[test]
fn test_category_totals_conserve_filtered_sum() {
    let snapshot = snapshot_of(scenario_records());
    let criteria = FilterCriteria::from_selections(
        DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 2, 28))),
        None,
        None,
    );
    let rows = filter::apply(snapshot.rows(), &criteria);

    let category_sum: Decimal = aggregate::category_totals(&rows)
        .iter()
        .map(|t| t.total)
        .sum();
    assert_eq!(category_sum, aggregate::key_metrics(&rows).total_gross);
}

#[test]
fn test_top_views_cover_short_sets_without_error() {
    let snapshot = snapshot_of(scenario_records());
    let rows = snapshot.rows();

    let suppliers = aggregate::top_suppliers(rows, TOP_SUPPLIERS);
    assert_eq!(suppliers.len(), 2);

    let breakdown = aggregate::top_category_monthly(rows, TOP_CATEGORIES);
    // Both categories rank in the top 5, so every (month, category) cell
    // with spend appears.
    assert_eq!(breakdown.len(), 3);
    assert_eq!(breakdown[0].year_month, "2024-01");
    assert_eq!(breakdown[0].category, "Repairs");
}

// ============================================================================
// Filtering Tests
// ============================================================================

#[test]
fn test_filter_is_idempotent_with_compound_criteria() {
    let snapshot = snapshot_of(scenario_records());
    let criteria = FilterCriteria::from_selections(
        DateRange::from_bounds(&[date(2024, 1, 1), date(2024, 2, 10)]),
        Some("Repairs"),
        None,
    );

    let once = filter::apply(snapshot.rows(), &criteria);
    let twice = filter::apply(&once, &criteria);

    assert_eq!(once.len(), 2);
    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_eq!(a.internal_reference, b.internal_reference);
    }
}

#[test]
fn test_wildcard_and_malformed_range_leave_set_unfiltered() {
    let snapshot = snapshot_of(scenario_records());

    // "All" selectors and a three-value range request both mean no
    // constraint; the whole set stays visible.
    let criteria = FilterCriteria::from_selections(
        DateRange::from_bounds(&[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]),
        Some("All"),
        Some("All"),
    );
    assert!(criteria.is_empty());

    let rows = filter::apply(snapshot.rows(), &criteria);
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_date_bounds_are_inclusive() {
    let snapshot = snapshot_of(scenario_records());
    let criteria = FilterCriteria::from_selections(
        DateRange::new(Some(date(2024, 1, 10)), Some(date(2024, 2, 20))),
        None,
        None,
    );
    let rows = filter::apply(snapshot.rows(), &criteria);
    assert_eq!(rows.len(), 3);
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[test]
fn test_single_page_holds_all_rows_in_display_order() {
    let snapshot = snapshot_of(scenario_records());
    let sorted = table::sort_for_display(snapshot.rows());
    let view = table::paginate(&sorted, 10, 1);

    assert_eq!(view.total_pages, 1);
    assert_eq!(view.rows.len(), 3);
    let dates: Vec<NaiveDate> = view.rows.iter().map(|r| r.invoice_date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 2, 20), date(2024, 2, 5), date(2024, 1, 10)]
    );
}

#[test]
fn test_out_of_range_page_clamps_to_last_valid_page() {
    let snapshot = snapshot_of(scenario_records());
    let sorted = table::sort_for_display(snapshot.rows());
    let view = table::paginate(&sorted, 10, 5);

    assert_eq!(view.page, 1);
    assert_eq!(view.rows.len(), 3);
}

#[test]
fn test_page_concatenation_reproduces_display_set() {
    let records: Vec<InvoiceRecord> = (1..=23)
        .map(|day| invoice("Repairs", "A", 1000 + i64::from(day), &format!("2024-03-{day:02}")))
        .collect();
    let snapshot = snapshot_of(records);
    let sorted = table::sort_for_display(snapshot.rows());

    for page_size in [1usize, 4, 10, 23, 50] {
        let total_pages = table::paginate(&sorted, page_size, 1).total_pages;
        let mut seen = Vec::new();
        for page in 1..=total_pages {
            seen.extend(
                table::paginate(&sorted, page_size, page)
                    .rows
                    .into_iter()
                    .map(|r| r.internal_reference),
            );
        }
        let expected: Vec<String> = sorted.iter().map(|r| r.internal_reference.clone()).collect();
        assert_eq!(seen, expected, "page size {page_size}");
    }
}

// ============================================================================
// Export Round-Trip Tests
// ============================================================================

#[test]
fn test_export_round_trip_matches_formatted_set() {
    let snapshot = snapshot_of(scenario_records());
    let criteria = FilterCriteria::from_selections(DateRange::default(), None, Some("A"));
    let rows = filter::apply(snapshot.rows(), &criteria);

    let csv_text = export::write_csv(&rows).unwrap();
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    assert_eq!(headers, table::DISPLAY_COLUMNS);

    let parsed: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    let sorted = table::sort_for_display(&rows);
    assert_eq!(parsed.len(), sorted.len());
    for (record, row) in parsed.iter().zip(sorted.iter()) {
        let cells = table::format_cells(row);
        for (index, cell) in cells.iter().enumerate() {
            assert_eq!(&record[index], cell.as_str());
        }
    }
}

#[test]
fn test_export_covers_all_pages() {
    let records: Vec<InvoiceRecord> = (1..=30)
        .map(|day| invoice("Repairs", "A", 1000, &format!("2024-01-{day:02}")))
        .collect();
    let snapshot = snapshot_of(records);

    // One page shows 25 rows; the export still carries all 30.
    let sorted = table::sort_for_display(snapshot.rows());
    let view = table::paginate(&sorted, 25, 1);
    assert_eq!(view.rows.len(), 25);

    let csv_text = export::write_csv(snapshot.rows()).unwrap();
    assert_eq!(csv_text.lines().count(), 31);
}

// ============================================================================
// Empty Set Boundary Tests
// ============================================================================

#[test]
fn test_empty_filtered_set_degrades_gracefully() {
    let snapshot = snapshot_of(scenario_records());
    let criteria =
        FilterCriteria::from_selections(DateRange::default(), Some("Gardening"), None);
    let rows = filter::apply(snapshot.rows(), &criteria);
    assert!(rows.is_empty());

    let metrics = aggregate::key_metrics(&rows);
    assert_eq!(metrics.invoice_count, 0);
    assert_eq!(metrics.total_gross, Decimal::ZERO);
    assert_eq!(metrics.mean_gross, None);
    assert_eq!(metrics.distinct_suppliers, 0);

    assert!(aggregate::category_totals(&rows).is_empty());
    assert!(aggregate::monthly_totals(&rows).is_empty());

    let view = table::paginate(&rows, 25, 1);
    assert_eq!(view.total_pages, 1);
    assert!(view.rows.is_empty());
}

// ============================================================================
// Context Loading Tests
// ============================================================================

#[test]
fn test_context_loads_snapshot_and_settings_from_disk() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("contractor_invoices.json");

    let document = InvoiceDocument {
        contractor_invoices: scenario_records(),
    };
    std::fs::write(&data_path, serde_json::to_string(&document).unwrap()).unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"currencySymbol": "$", "pageSize": 10}"#,
    )
    .unwrap();

    let ctx = TallyContext::new(&data_path).unwrap();
    assert_eq!(ctx.snapshot.len(), 3);
    assert_eq!(ctx.config.currency_symbol, "$");
    assert_eq!(ctx.config.page_size, 10);

    let criteria = FilterCriteria::from_selections(DateRange::default(), Some("Repairs"), None);
    assert_eq!(ctx.filtered(&criteria).len(), 2);
}

#[test]
fn test_context_rejects_malformed_snapshot() {
    let dir = TempDir::new().unwrap();
    let data_path = dir.path().join("contractor_invoices.json");
    std::fs::write(&data_path, r#"{"contractorInvoices": [{"category": 1}]}"#).unwrap();

    assert!(TallyContext::new(&data_path).is_err());
}
