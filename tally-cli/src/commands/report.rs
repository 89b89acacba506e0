//! Report command - aggregated views of the filtered invoice set

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use tally_core::services::aggregate::{self, HISTOGRAM_BINS, TOP_CATEGORIES, TOP_SUPPLIERS};
use tally_core::{NormalizedRow, TallyContext};

use crate::commands::{get_context, FilterArgs};
use crate::output;

#[derive(Subcommand)]
pub enum ReportView {
    /// Total spending by category, highest first
    Categories {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Top suppliers by total spending
    Suppliers {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Total spending per month
    Monthly {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly spending for the top categories
    CategoryMonthly {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Distribution of invoice gross amounts
    Histogram {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Invoice counts per month
    Counts {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(file: &Path, view: ReportView) -> Result<()> {
    match view {
        ReportView::Categories { filters, json } => categories(file, &filters, json),
        ReportView::Suppliers { filters, json } => suppliers(file, &filters, json),
        ReportView::Monthly { filters, json } => monthly(file, &filters, json),
        ReportView::CategoryMonthly { filters, json } => category_monthly(file, &filters, json),
        ReportView::Histogram { filters, json } => histogram(file, &filters, json),
        ReportView::Counts { filters, json } => counts(file, &filters, json),
    }
}

fn filtered_rows(file: &Path, filters: &FilterArgs) -> Result<(TallyContext, Vec<NormalizedRow>)> {
    let ctx = get_context(file)?;
    let rows = ctx.filtered(&filters.criteria());
    Ok((ctx, rows))
}

fn categories(file: &Path, filters: &FilterArgs, json: bool) -> Result<()> {
    let (ctx, rows) = filtered_rows(file, filters)?;
    let totals = aggregate::category_totals(&rows);

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    println!("{}", "Spending by Category".bold());
    let mut table = output::create_table();
    table.set_header(vec!["Category", "Total"]);
    for entry in &totals {
        table.add_row(vec![
            entry.category.clone(),
            output::format_money(entry.total, &ctx.config.currency_symbol),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn suppliers(file: &Path, filters: &FilterArgs, json: bool) -> Result<()> {
    let (ctx, rows) = filtered_rows(file, filters)?;
    let totals = aggregate::top_suppliers(&rows, TOP_SUPPLIERS);

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    println!("{}", "Top Suppliers".bold());
    let mut table = output::create_table();
    table.set_header(vec!["Supplier", "Total"]);
    for entry in &totals {
        table.add_row(vec![
            entry.supplier.clone(),
            output::format_money(entry.total, &ctx.config.currency_symbol),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn monthly(file: &Path, filters: &FilterArgs, json: bool) -> Result<()> {
    let (ctx, rows) = filtered_rows(file, filters)?;
    let totals = aggregate::monthly_totals(&rows);

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    println!("{}", "Monthly Spending".bold());
    let mut table = output::create_table();
    table.set_header(vec!["Month", "Total"]);
    for entry in &totals {
        table.add_row(vec![
            entry.year_month.clone(),
            output::format_money(entry.total, &ctx.config.currency_symbol),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn category_monthly(file: &Path, filters: &FilterArgs, json: bool) -> Result<()> {
    let (ctx, rows) = filtered_rows(file, filters)?;
    let breakdown = aggregate::top_category_monthly(&rows, TOP_CATEGORIES);

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("{}", "Top Category Spending by Month".bold());
    let mut table = output::create_table();
    table.set_header(vec!["Month", "Category", "Total"]);
    for entry in &breakdown {
        table.add_row(vec![
            entry.year_month.clone(),
            entry.category.clone(),
            output::format_money(entry.total, &ctx.config.currency_symbol),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn histogram(file: &Path, filters: &FilterArgs, json: bool) -> Result<()> {
    let (ctx, rows) = filtered_rows(file, filters)?;
    let histogram = aggregate::amount_distribution(&rows, HISTOGRAM_BINS);

    if json {
        println!("{}", serde_json::to_string_pretty(&histogram)?);
        return Ok(());
    }

    let symbol = &ctx.config.currency_symbol;

    println!("{}", "Invoice Amount Distribution".bold());
    let mut table = output::create_table();
    table.set_header(vec!["Range", "Invoices"]);
    for (index, count) in histogram.counts.iter().enumerate() {
        let low = histogram.edges[index];
        let high = histogram.edges[index + 1];
        table.add_row(vec![
            format!(
                "{} to {}",
                output::format_money(low, symbol),
                output::format_money(high, symbol)
            ),
            count.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn counts(file: &Path, filters: &FilterArgs, json: bool) -> Result<()> {
    let (_, rows) = filtered_rows(file, filters)?;
    let counts = aggregate::monthly_counts(&rows);

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("{}", "Monthly Invoice Counts".bold());
    let mut table = output::create_table();
    table.set_header(vec!["Month", "Invoices"]);
    for entry in &counts {
        table.add_row(vec![
            entry.year_month.clone(),
            output::format_count(entry.count),
        ]);
    }
    println!("{table}");

    Ok(())
}
