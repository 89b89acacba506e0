//! Read-only invoice snapshot
//!
//! The snapshot document is read and normalized exactly once per process.
//! Every query borrows rows from here; no component re-reads the source
//! file.

use std::path::Path;

use crate::domain::result::{Error, Result};
use crate::domain::{InvoiceDocument, NormalizedRow};
use crate::services::{aggregate, normalize};

/// The fully-loaded, immutable invoice row set
#[derive(Debug, Clone)]
pub struct Snapshot {
    rows: Vec<NormalizedRow>,
}

impl Snapshot {
    /// Load and normalize the snapshot document at `path`.
    ///
    /// A document that does not match the expected schema, or any record
    /// with an invalid invoice date, fails the whole load; no partial
    /// dataset is ever served.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let document: InvoiceDocument = serde_json::from_str(&content).map_err(|e| {
            Error::snapshot(format!("invalid document {}: {}", path.display(), e))
        })?;
        Self::from_document(document)
    }

    /// Normalize an already-parsed document
    pub fn from_document(document: InvoiceDocument) -> Result<Self> {
        let rows = normalize::normalize(&document.contractor_invoices)?;

        match aggregate::date_span(&rows) {
            Some((earliest, latest)) => tracing::info!(
                rows = rows.len(),
                earliest = %earliest,
                latest = %latest,
                "loaded invoice snapshot"
            ),
            None => tracing::info!("loaded empty invoice snapshot"),
        }

        Ok(Self { rows })
    }

    /// All normalized rows, in document order
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
