//! Tally Core - the contractor invoice aggregation engine
//!
//! This crate implements the analysis engine behind the Tally CLI:
//!
//! - **domain**: pure business entities (InvoiceRecord, NormalizedRow, FilterCriteria)
//! - **snapshot**: the one-time load and normalization of the invoice document
//! - **services**: filtering, aggregation, table shaping, and CSV export
//!
//! The engine is pure given explicit criteria: every aggregation and page
//! view is a function of (snapshot rows, criteria), with no UI awareness
//! and no shared mutable state across queries.

pub mod config;
pub mod domain;
pub mod services;
pub mod snapshot;

use std::path::Path;

use config::Config;
use snapshot::Snapshot;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{
    DateRange, FilterCriteria, InvoiceDocument, InvoiceRecord, NormalizedRow, PropertyCharge,
    WILDCARD,
};
pub use services::aggregate::{
    CategoryMonthlyTotal, CategoryTotal, Histogram, KeyMetrics, MonthlyCount, MonthlyTotal,
    SupplierTotal, HISTOGRAM_BINS, TOP_CATEGORIES, TOP_SUPPLIERS,
};
pub use services::table::{PageView, DISPLAY_COLUMNS};

/// Main context for Tally operations
///
/// This is the primary entry point for queries. It holds the loaded
/// snapshot and the display configuration; the presentation layer builds a
/// [`FilterCriteria`] and works with the filtered rows.
pub struct TallyContext {
    pub config: Config,
    pub snapshot: Snapshot,
}

impl TallyContext {
    /// Load the snapshot document at `data_path` and the settings file
    /// sitting next to it
    pub fn new(data_path: &Path) -> Result<Self> {
        let settings_dir = data_path.parent().unwrap_or(Path::new("."));
        let config = Config::load(settings_dir)?;
        let snapshot = Snapshot::load(data_path)?;

        Ok(Self { config, snapshot })
    }

    /// Rows matching the criteria, in snapshot order
    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<NormalizedRow> {
        services::filter::apply(self.snapshot.rows(), criteria)
    }
}
