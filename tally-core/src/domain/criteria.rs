//! Filter criteria domain model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::NormalizedRow;

/// Selector value meaning "no constraint" on category or supplier.
///
/// This is a control sentinel, never a literal name: a dataset category that
/// happens to be called "All" cannot be selected on its own.
pub const WILDCARD: &str = "All";

/// An inclusive calendar-date range; either side may be unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Build a range from the bound values a date picker produced.
    ///
    /// Two values form a closed range and a single value leaves the end open.
    /// Zero or more than two values is a malformed request; it falls back to
    /// an unconstrained range so a broken picker cannot blank the whole view.
    pub fn from_bounds(bounds: &[NaiveDate]) -> Self {
        match bounds {
            [start, end] => Self::new(Some(*start), Some(*end)),
            [start] => Self::new(Some(*start), None),
            _ => {
                if !bounds.is_empty() {
                    tracing::warn!(
                        bound_count = bounds.len(),
                        "malformed date range request, leaving rows unfiltered"
                    );
                }
                Self::default()
            }
        }
    }

    /// True when neither side constrains
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive containment check on both bounds
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start)
            && self.end.map_or(true, |end| date <= end)
    }
}

/// A conjunction of row predicates; every populated criterion must hold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub range: DateRange,
    pub category: Option<String>,
    pub supplier: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw selector values as a UI control supplies them.
    ///
    /// Absent values and the [`WILDCARD`] sentinel both mean "no constraint",
    /// so the filter never sees the sentinel as a literal name.
    pub fn from_selections(
        range: DateRange,
        category: Option<&str>,
        supplier: Option<&str>,
    ) -> Self {
        Self {
            range,
            category: normalize_selection(category),
            supplier: normalize_selection(supplier),
        }
    }

    /// True when no criterion constrains anything
    pub fn is_empty(&self) -> bool {
        self.range.is_unbounded() && self.category.is_none() && self.supplier.is_none()
    }

    /// Evaluate the conjunction against one row
    pub fn matches(&self, row: &NormalizedRow) -> bool {
        self.range.contains(row.invoice_date)
            && self
                .category
                .as_ref()
                .map_or(true, |category| row.category == *category)
            && self
                .supplier
                .as_ref()
                .map_or(true, |supplier| row.supplier_name == *supplier)
    }
}

fn normalize_selection(value: Option<&str>) -> Option<String> {
    match value {
        None => None,
        Some(WILDCARD) => None,
        Some(other) => Some(other.to_string()),
    }
}
