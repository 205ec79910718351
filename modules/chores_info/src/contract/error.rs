use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChoresInfoError {
    #[error("User not found with id: {id}")]
    UserNotFound { id: i64 },

    #[error("Chore not found with id: {id}")]
    ChoreNotFound { id: i64 },

    #[error("User with name '{name}' already exists")]
    Conflict { name: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl ChoresInfoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<crate::domain::error::DomainError> for ChoresInfoError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::UserNotFound { id },
            ChoreNotFound { id } => Self::ChoreNotFound { id },
            DuplicateUserName { name } => Self::Conflict { name },
            Validation { message, .. }
            | NoFieldsProvided { message }
            | InvalidFormat { message, .. } => Self::Validation { message },
            Database { .. } => Self::Internal,
        }
    }
}
