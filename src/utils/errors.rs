//! Error handling for RollCall
//!
//! This module defines the main error type used throughout the data layer
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for RollCall operations
#[derive(Error, Debug)]
pub enum RollCallError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate student id: {student_id}")]
    DuplicateStudentId { student_id: String },

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for RollCall operations
pub type Result<T> = std::result::Result<T, RollCallError>;

/// Check whether a sqlx error is a uniqueness-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Check whether a sqlx error is a foreign-key-constraint violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

impl RollCallError {
    /// Check if the error is recoverable by re-issuing the same operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            RollCallError::Database(_) => false,
            RollCallError::Migration(_) => false,
            RollCallError::Config(_) => false,
            RollCallError::DuplicateStudentId { .. } => false,
            RollCallError::ForeignKey(_) => false,
            RollCallError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RollCallError::Database(_) => ErrorSeverity::Critical,
            RollCallError::Migration(_) => ErrorSeverity::Critical,
            RollCallError::Config(_) => ErrorSeverity::Critical,
            RollCallError::ForeignKey(_) => ErrorSeverity::Error,
            RollCallError::DuplicateStudentId { .. } => ErrorSeverity::Warning,
            RollCallError::InvalidInput(_) => ErrorSeverity::Info,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_student_id_is_a_warning() {
        let err = RollCallError::DuplicateStudentId {
            student_id: "2024-0001".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("2024-0001"));
    }

    #[test]
    fn invalid_input_is_informational() {
        let err = RollCallError::InvalidInput("event name cannot be empty".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn row_not_found_is_not_a_constraint_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));
    }
}
