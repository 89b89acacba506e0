//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// A record in the snapshot document failed validation. Carries the
    /// record's internal reference so the offending entry can be located.
    #[error("malformed record '{reference}': field '{field}': {message}")]
    MalformedRecord {
        reference: String,
        field: String,
        message: String,
    },

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a malformed record error
    pub fn malformed(
        reference: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            reference: reference.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a snapshot error
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
