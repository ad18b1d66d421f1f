//! Error types shared by the SlimPlan crates

use thiserror::Error;

/// Input validation failure, carrying the offending field
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Plan-level lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Phase not found: {0}")]
    PhaseNotFound(String),

    #[error("Milestone not found: {milestone_id} in phase {phase_id}")]
    MilestoneNotFound {
        phase_id: String,
        milestone_id: String,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
