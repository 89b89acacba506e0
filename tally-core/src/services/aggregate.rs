//! Aggregator - grouped sums, rankings, distributions, and scalar metrics
//!
//! Every function here is a pure reduction over a filtered row slice.
//! Grouping keys, sort directions, and tie-breaks are explicit; nothing
//! relies on incidental map ordering.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::NormalizedRow;

/// Ranking depth of the supplier view
pub const TOP_SUPPLIERS: usize = 10;
/// Ranking depth of the category-by-month view
pub const TOP_CATEGORIES: usize = 5;
/// Bin count of the amount distribution
pub const HISTOGRAM_BINS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierTotal {
    pub supplier: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub year_month: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCount {
    pub year_month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMonthlyTotal {
    pub year_month: String,
    pub category: String,
    pub total: Decimal,
}

/// Equal-width amount distribution; `edges` always has one more entry
/// than `counts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<Decimal>,
    pub counts: Vec<usize>,
}

/// Scalar reductions over the filtered set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub invoice_count: usize,
    pub total_gross: Decimal,
    /// `None` when the set is empty; a mean of nothing is undefined, not zero
    pub mean_gross: Option<Decimal>,
    pub distinct_suppliers: usize,
}

/// Total gross per category, highest first.
///
/// Equal totals keep the order in which the categories first appear in the
/// row set (stable sort over insertion-ordered grouping).
pub fn category_totals(rows: &[NormalizedRow]) -> Vec<CategoryTotal> {
    let mut totals: IndexMap<&str, Decimal> = IndexMap::new();
    for row in rows {
        *totals.entry(row.category.as_str()).or_insert(Decimal::ZERO) += row.invoice_gross;
    }

    let mut result: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    result.sort_by(|a, b| b.total.cmp(&a.total));
    result
}

/// Total gross per supplier, highest first, truncated to `limit`.
///
/// Fewer than `limit` distinct suppliers is fine; truncation is a no-op.
pub fn top_suppliers(rows: &[NormalizedRow], limit: usize) -> Vec<SupplierTotal> {
    let mut totals: IndexMap<&str, Decimal> = IndexMap::new();
    for row in rows {
        *totals
            .entry(row.supplier_name.as_str())
            .or_insert(Decimal::ZERO) += row.invoice_gross;
    }

    let mut result: Vec<SupplierTotal> = totals
        .into_iter()
        .map(|(supplier, total)| SupplierTotal {
            supplier: supplier.to_string(),
            total,
        })
        .collect();
    result.sort_by(|a, b| b.total.cmp(&a.total));
    result.truncate(limit);
    result
}

/// Total gross per calendar month, ascending by month key.
///
/// The zero-padded `YYYY-MM` key makes lexical order chronological order.
pub fn monthly_totals(rows: &[NormalizedRow]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for row in rows {
        *totals
            .entry(row.year_month.as_str())
            .or_insert(Decimal::ZERO) += row.invoice_gross;
    }

    totals
        .into_iter()
        .map(|(year_month, total)| MonthlyTotal {
            year_month: year_month.to_string(),
            total,
        })
        .collect()
}

/// Invoice count per calendar month, ascending by month key
pub fn monthly_counts(rows: &[NormalizedRow]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.year_month.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(year_month, count)| MonthlyCount {
            year_month: year_month.to_string(),
            count,
        })
        .collect()
}

/// Monthly totals for the `limit` highest-total categories.
///
/// Membership is decided by category totals over the whole given set, so it
/// shifts as the caller's filters shift. Rows in other categories are
/// dropped from this view only; they stay visible in [`category_totals`].
/// Output is ordered (month ascending, category ascending).
pub fn top_category_monthly(rows: &[NormalizedRow], limit: usize) -> Vec<CategoryMonthlyTotal> {
    let top: IndexSet<String> = category_totals(rows)
        .into_iter()
        .take(limit)
        .map(|entry| entry.category)
        .collect();

    let mut totals: BTreeMap<(&str, &str), Decimal> = BTreeMap::new();
    for row in rows {
        if top.contains(row.category.as_str()) {
            *totals
                .entry((row.year_month.as_str(), row.category.as_str()))
                .or_insert(Decimal::ZERO) += row.invoice_gross;
        }
    }

    totals
        .into_iter()
        .map(|((year_month, category), total)| CategoryMonthlyTotal {
            year_month: year_month.to_string(),
            category: category.to_string(),
            total,
        })
        .collect()
}

/// Bucket gross amounts into `bins` equal-width bins spanning [min, max].
///
/// An empty set yields one `[0, 0]` bin with count 0. A value range whose
/// `bins`-way split rounds to a zero width (all amounts equal, or a spread
/// finer than Decimal's scale) yields one `[min, max]` bin holding every
/// row. Neither degenerate case divides by the bin width.
pub fn amount_distribution(rows: &[NormalizedRow], bins: usize) -> Histogram {
    let bins = bins.max(1);

    let amounts: Vec<Decimal> = rows.iter().map(|row| row.invoice_gross).collect();
    let (min, max) = match (amounts.iter().min(), amounts.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => {
            return Histogram {
                edges: vec![Decimal::ZERO, Decimal::ZERO],
                counts: vec![0],
            }
        }
    };

    let width = (max - min) / Decimal::from(bins as u64);
    // Zero width covers equal amounts and spreads below Decimal's scale.
    if width.is_zero() {
        return Histogram {
            edges: vec![min, max],
            counts: vec![amounts.len()],
        };
    }

    let mut edges: Vec<Decimal> = (0..bins)
        .map(|i| min + width * Decimal::from(i as u64))
        .collect();
    // The running sum can drift below max by a rounding hair; pin the last
    // edge to the true maximum.
    edges.push(max);

    let mut counts = vec![0usize; bins];
    for amount in amounts {
        let index = ((amount - min) / width)
            .floor()
            .to_usize()
            .unwrap_or(bins - 1)
            .min(bins - 1);
        counts[index] += 1;
    }

    Histogram { edges, counts }
}

/// Scalar metrics of the filtered set, recomputed fresh on every query
pub fn key_metrics(rows: &[NormalizedRow]) -> KeyMetrics {
    let invoice_count = rows.len();
    let total_gross: Decimal = rows.iter().map(|row| row.invoice_gross).sum();
    let mean_gross = if invoice_count == 0 {
        None
    } else {
        Some(total_gross / Decimal::from(invoice_count as u64))
    };
    let distinct_suppliers = rows
        .iter()
        .map(|row| row.supplier_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    KeyMetrics {
        invoice_count,
        total_gross,
        mean_gross,
        distinct_suppliers,
    }
}

/// Distinct category names, sorted, for filter option discovery
pub fn distinct_categories(rows: &[NormalizedRow]) -> Vec<String> {
    rows.iter()
        .map(|row| row.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Distinct supplier names, sorted, for filter option discovery
pub fn distinct_suppliers(rows: &[NormalizedRow]) -> Vec<String> {
    rows.iter()
        .map(|row| row.supplier_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Earliest and latest invoice dates in the set
pub fn date_span(rows: &[NormalizedRow]) -> Option<(NaiveDate, NaiveDate)> {
    let earliest = rows.iter().map(|row| row.invoice_date).min()?;
    let latest = rows.iter().map(|row| row.invoice_date).max()?;
    Some((earliest, latest))
}
