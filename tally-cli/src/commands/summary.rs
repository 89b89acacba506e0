//! Summary command - key metrics for the filtered invoice set

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::services::{aggregate, filter};
use tally_core::{DateRange, FilterCriteria, NormalizedRow};

use crate::commands::{get_context, FilterArgs};
use crate::output;

#[derive(Serialize)]
struct SummaryPayload {
    invoice_count: usize,
    total_gross: Decimal,
    mean_gross: Option<Decimal>,
    distinct_suppliers: usize,
    date_range: Option<DateSpan>,
    categories: Vec<String>,
    suppliers: Vec<String>,
}

#[derive(Serialize)]
struct DateSpan {
    earliest: NaiveDate,
    latest: NaiveDate,
}

pub fn run(file: &Path, filters: &FilterArgs, json: bool) -> Result<()> {
    let ctx = get_context(file)?;
    let rows = ctx.filtered(&filters.criteria());

    let metrics = aggregate::key_metrics(&rows);
    let span = aggregate::date_span(&rows);
    let (categories, suppliers) = option_listings(ctx.snapshot.rows(), filters);

    if json {
        let payload = SummaryPayload {
            invoice_count: metrics.invoice_count,
            total_gross: metrics.total_gross,
            mean_gross: metrics.mean_gross,
            distinct_suppliers: metrics.distinct_suppliers,
            date_range: span.map(|(earliest, latest)| DateSpan { earliest, latest }),
            categories,
            suppliers,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let symbol = &ctx.config.currency_symbol;

    println!("{}", "Invoice Summary".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec![
        "Total invoices".to_string(),
        output::format_count(metrics.invoice_count),
    ]);
    table.add_row(vec![
        "Total amount".to_string(),
        output::format_money(metrics.total_gross, symbol),
    ]);
    table.add_row(vec![
        "Average invoice".to_string(),
        match metrics.mean_gross {
            Some(mean) => output::format_money(mean, symbol),
            None => "n/a".to_string(),
        },
    ]);
    table.add_row(vec![
        "Unique suppliers".to_string(),
        output::format_count(metrics.distinct_suppliers),
    ]);
    println!("{table}");
    println!();

    if let Some((earliest, latest)) = span {
        println!("Date range: {} to {}", earliest, latest);
        println!();
    }

    if !categories.is_empty() {
        println!("{}", "Categories".bold());
        for category in &categories {
            println!("  • {category}");
        }
        println!();
    }

    if !suppliers.is_empty() {
        println!("{}", "Suppliers".bold());
        for supplier in &suppliers {
            println!("  • {supplier}");
        }
    }

    Ok(())
}

/// Values accepted by `--category` and `--supplier` under the current
/// filters: categories are scoped by the date bounds only, suppliers by
/// date and category.
fn option_listings(rows: &[NormalizedRow], filters: &FilterArgs) -> (Vec<String>, Vec<String>) {
    let range = DateRange::new(filters.from, filters.to);
    let date_scope = filter::apply(
        rows,
        &FilterCriteria::from_selections(range.clone(), None, None),
    );
    let supplier_scope = filter::apply(
        rows,
        &FilterCriteria::from_selections(range, filters.category.as_deref(), None),
    );
    (
        aggregate::distinct_categories(&date_scope),
        aggregate::distinct_suppliers(&supplier_scope),
    )
}
