//! Invoice domain model

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level shape of the contractor invoice snapshot document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub contractor_invoices: Vec<InvoiceRecord>,
}

/// A single invoice entry as it appears in the snapshot document
///
/// `invoice_date` stays a raw string here; it is parsed and validated by the
/// normalizer so a bad date can be reported against this record's reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub category: String,
    pub heading: String,
    pub internal_reference: String,
    pub invoice_date: String,
    pub invoice_gross: Decimal,
    pub supplier_invoice: String,
    pub supplier_name: String,
    pub properties: Vec<PropertyCharge>,
}

/// One per-property charge line attached to an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCharge {
    #[serde(default)]
    pub property_id: Option<String>,
    pub amount: Decimal,
}

/// A validated invoice row with derived calendar and property fields
///
/// Rows are produced once by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub category: String,
    pub heading: String,
    pub internal_reference: String,
    pub invoice_date: NaiveDate,
    pub invoice_gross: Decimal,
    pub supplier_invoice: String,
    pub supplier_name: String,
    /// Sum of the per-property charge amounts
    pub property_amount: Decimal,
    /// Number of property charge lines
    pub property_count: usize,
    pub year: i32,
    pub month: u32,
    /// Calendar month key in `YYYY-MM` form, zero-padded
    pub year_month: String,
}

impl NormalizedRow {
    /// Format a date as the `YYYY-MM` month key
    pub fn month_key(date: NaiveDate) -> String {
        format!("{:04}-{:02}", date.year(), date.month())
    }
}
