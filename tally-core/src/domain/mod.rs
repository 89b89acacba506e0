//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod criteria;
mod invoice;
pub mod result;

pub use criteria::{DateRange, FilterCriteria, WILDCARD};
pub use invoice::{InvoiceDocument, InvoiceRecord, NormalizedRow, PropertyCharge};
pub use result::{Error, Result};
