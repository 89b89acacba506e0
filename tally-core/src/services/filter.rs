//! Filter engine - compound criteria over the normalized row set

use crate::domain::{FilterCriteria, NormalizedRow};

/// Return the rows satisfying every populated criterion, in input order.
///
/// An empty result is a valid outcome, not an error; downstream aggregates
/// degrade to zeros and empty series.
pub fn apply(rows: &[NormalizedRow], criteria: &FilterCriteria) -> Vec<NormalizedRow> {
    let matched: Vec<NormalizedRow> = rows
        .iter()
        .filter(|row| criteria.matches(row))
        .cloned()
        .collect();

    tracing::debug!(
        total = rows.len(),
        matched = matched.len(),
        category = criteria.category.as_deref(),
        supplier = criteria.supplier.as_deref(),
        "applied filter criteria"
    );

    matched
}
