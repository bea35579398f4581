//! Custom error types for the ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The named account has never been opened
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// An account with this name already exists
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// Account type outside bank, credit, income, expense
    #[error("Invalid account type '{0}': expected one of bank, credit, income, expense")]
    InvalidAccountType(String),

    /// Wrongly shaped argument (missing endpoint, bad date, bad amount)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Ledger file errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// CSV import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl LedgerError {
    /// Check if this is an "unknown account" error
    pub fn is_unknown_account(&self) -> bool {
        matches!(self, Self::UnknownAccount(_))
    }

    /// Check if this is a "duplicate account" error
    pub fn is_duplicate_account(&self) -> bool {
        matches!(self, Self::DuplicateAccount(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_unknown_account_error() {
        let err = LedgerError::UnknownAccount("groceries".into());
        assert_eq!(err.to_string(), "Unknown account: groceries");
        assert!(err.is_unknown_account());
        assert!(!err.is_duplicate_account());
    }

    #[test]
    fn test_invalid_account_type_error() {
        let err = LedgerError::InvalidAccountType("savings".into());
        assert_eq!(
            err.to_string(),
            "Invalid account type 'savings': expected one of bank, credit, income, expense"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
