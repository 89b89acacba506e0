//! CLI command implementations

pub mod export;
pub mod list;
pub mod report;
pub mod summary;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use tally_core::{DateRange, FilterCriteria, TallyContext};

/// Filter flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Start date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// End date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Only invoices in this category ("All" matches everything)
    #[arg(long)]
    pub category: Option<String>,

    /// Only invoices from this supplier ("All" matches everything)
    #[arg(long)]
    pub supplier: Option<String>,
}

impl FilterArgs {
    /// Build engine criteria from the raw flag values
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_selections(
            DateRange::new(self.from, self.to),
            self.category.as_deref(),
            self.supplier.as_deref(),
        )
    }
}

/// Load the snapshot and settings behind a command invocation
pub fn get_context(file: &Path) -> Result<TallyContext> {
    TallyContext::new(file)
        .with_context(|| format!("Failed to load invoice snapshot: {}", file.display()))
}
