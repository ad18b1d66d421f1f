//! Tracker error handling
//!
//! Services return [`TrackerError`]; the CLI turns it into an error code and
//! message.

use crate::store::StoreError;
use slimplan_shared::{DomainError, ValidationError};
use thiserror::Error;

/// Error type for tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<DomainError> for TrackerError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PhaseNotFound(_) | DomainError::MilestoneNotFound { .. } => {
                TrackerError::NotFound(err.to_string())
            }
            DomainError::InvalidDate(_) => TrackerError::BadRequest(err.to_string()),
        }
    }
}

impl TrackerError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TrackerError::Validation(_) => "VALIDATION_ERROR",
            TrackerError::NotFound(_) => "NOT_FOUND",
            TrackerError::BadRequest(_) => "BAD_REQUEST",
            TrackerError::Store(_) => "STORAGE_ERROR",
            TrackerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field that failed validation, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            TrackerError::Validation(e) => Some(e.field),
            _ => None,
        }
    }
}

/// Result type alias for tracker services
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_code() {
        let error: TrackerError = ValidationError::new("weight", "too low").into();
        assert_eq!(error.code(), "VALIDATION_ERROR");
        assert_eq!(error.field(), Some("weight"));
        assert_eq!(error.to_string(), "Validation error: weight: too low");
    }

    #[test]
    fn test_domain_errors_map_to_not_found() {
        let error: TrackerError = DomainError::PhaseNotFound("phase-9".to_string()).into();
        assert_eq!(error.code(), "NOT_FOUND");

        let error: TrackerError = DomainError::MilestoneNotFound {
            phase_id: "phase-1".to_string(),
            milestone_id: "m".to_string(),
        }
        .into();
        assert!(matches!(error, TrackerError::NotFound(_)));
    }

    #[test]
    fn test_invalid_date_is_bad_request() {
        let error: TrackerError = DomainError::InvalidDate("2026/01/01".to_string()).into();
        assert_eq!(error.code(), "BAD_REQUEST");
    }

    #[test]
    fn test_store_error_code() {
        let error: TrackerError = StoreError::Backend("disk full".to_string()).into();
        assert_eq!(error.code(), "STORAGE_ERROR");
        assert_eq!(error.field(), None);
    }
}
