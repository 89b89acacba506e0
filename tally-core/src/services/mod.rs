//! Service layer - the aggregation engine components
//!
//! Data flows left to right: normalize -> filter -> {aggregate, table,
//! export}. Each module is a set of pure functions over row slices; no
//! component mutates a row after normalization.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod normalize;
pub mod table;

pub use aggregate::{
    CategoryMonthlyTotal, CategoryTotal, Histogram, KeyMetrics, MonthlyCount, MonthlyTotal,
    SupplierTotal, HISTOGRAM_BINS, TOP_CATEGORIES, TOP_SUPPLIERS,
};
pub use table::{PageView, DISPLAY_COLUMNS};
