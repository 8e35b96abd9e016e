//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations of the org tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("no unit named '{0}' found")]
    NotFound(String),

    #[error("unit handle does not refer to a live unit")]
    UnknownUnit,

    #[error("'{0}' is not a department")]
    NotADepartment(String),

    #[error("'{0}' is not an employee")]
    NotAnEmployee(String),

    #[error("'{child}' already belongs to '{parent}'")]
    AlreadyAttached { child: String, parent: String },

    #[error("adding '{child}' to '{department}' would create a cycle")]
    CycleDetected { child: String, department: String },

    #[error("the root department '{0}' cannot be moved")]
    RootNotMovable(String),
}

/// Result type for org tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
