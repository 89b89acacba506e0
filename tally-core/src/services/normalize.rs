//! Record normalizer - raw invoice entries to flat analysis rows

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::{InvoiceRecord, NormalizedRow};

/// Normalize raw records into flat rows, one per record, in input order.
///
/// Fails on the first record whose invoice date is not a valid ISO-8601
/// calendar date. The whole load is rejected rather than serving a partial
/// dataset, since a dropped row would silently skew every downstream
/// aggregate.
pub fn normalize(records: &[InvoiceRecord]) -> Result<Vec<NormalizedRow>> {
    records.iter().map(normalize_record).collect()
}

fn normalize_record(record: &InvoiceRecord) -> Result<NormalizedRow> {
    let invoice_date =
        NaiveDate::parse_from_str(&record.invoice_date, "%Y-%m-%d").map_err(|e| {
            Error::malformed(
                &record.internal_reference,
                "invoiceDate",
                format!("invalid date '{}': {}", record.invoice_date, e),
            )
        })?;

    let property_amount: Decimal = record.properties.iter().map(|p| p.amount).sum();

    Ok(NormalizedRow {
        category: record.category.clone(),
        heading: record.heading.clone(),
        internal_reference: record.internal_reference.clone(),
        invoice_date,
        invoice_gross: record.invoice_gross,
        supplier_invoice: record.supplier_invoice.clone(),
        supplier_name: record.supplier_name.clone(),
        property_amount,
        property_count: record.properties.len(),
        year: invoice_date.year(),
        month: invoice_date.month(),
        year_month: NormalizedRow::month_key(invoice_date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PropertyCharge;

    fn record(reference: &str, date: &str, gross: Decimal, amounts: &[Decimal]) -> InvoiceRecord {
        InvoiceRecord {
            category: "Repairs".to_string(),
            heading: "Roof repair".to_string(),
            internal_reference: reference.to_string(),
            invoice_date: date.to_string(),
            invoice_gross: gross,
            supplier_invoice: "S-100".to_string(),
            supplier_name: "Supplier A".to_string(),
            properties: amounts
                .iter()
                .map(|amount| PropertyCharge {
                    property_id: None,
                    amount: *amount,
                })
                .collect(),
        }
    }

    #[test]
    fn test_normalize_derives_calendar_and_property_fields() {
        let records = vec![record(
            "INV-001",
            "2024-03-07",
            Decimal::new(45000, 2),
            &[Decimal::new(30000, 2), Decimal::new(15000, 2)],
        )];

        let rows = normalize(&records).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.year, 2024);
        assert_eq!(row.month, 3);
        assert_eq!(row.year_month, "2024-03");
        assert_eq!(row.property_amount, Decimal::new(45000, 2));
        assert_eq!(row.property_count, 2);
    }

    #[test]
    fn test_normalize_empty_properties_sum_to_zero() {
        let records = vec![record("INV-002", "2024-01-01", Decimal::new(5000, 2), &[])];
        let rows = normalize(&records).unwrap();
        assert_eq!(rows[0].property_amount, Decimal::ZERO);
        assert_eq!(rows[0].property_count, 0);
    }

    #[test]
    fn test_normalize_preserves_input_order() {
        let records = vec![
            record("INV-003", "2024-02-05", Decimal::ONE, &[]),
            record("INV-001", "2024-01-10", Decimal::ONE, &[]),
            record("INV-002", "2024-03-20", Decimal::ONE, &[]),
        ];
        let rows = normalize(&records).unwrap();
        let refs: Vec<&str> = rows.iter().map(|r| r.internal_reference.as_str()).collect();
        assert_eq!(refs, vec!["INV-003", "INV-001", "INV-002"]);
    }

    #[test]
    fn test_normalize_rejects_bad_date_naming_the_record() {
        let records = vec![
            record("INV-001", "2024-01-10", Decimal::ONE, &[]),
            record("INV-002", "not-a-date", Decimal::ONE, &[]),
        ];
        let err = normalize(&records).unwrap_err();
        match err {
            Error::MalformedRecord {
                reference, field, ..
            } => {
                assert_eq!(reference, "INV-002");
                assert_eq!(field, "invoiceDate");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let records = vec![record("INV-001", "2024-06-15", Decimal::new(100, 0), &[])];
        let first = normalize(&records).unwrap();
        let second = normalize(&records).unwrap();
        assert_eq!(first[0].year_month, second[0].year_month);
        assert_eq!(first[0].property_amount, second[0].property_amount);
    }
}
