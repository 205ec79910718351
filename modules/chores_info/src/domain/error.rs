use thiserror::Error;

/// Domain-specific errors using thiserror
///
/// Display texts are the user-facing messages; transports pass them through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found with id: {id}")]
    UserNotFound { id: i64 },

    #[error("Chore not found with id: {id}")]
    ChoreNotFound { id: i64 },

    #[error("User with name '{name}' already exists")]
    DuplicateUserName { name: String },

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    NoFieldsProvided { message: String },

    #[error("{message}")]
    InvalidFormat { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn chore_not_found(id: i64) -> Self {
        Self::ChoreNotFound { id }
    }

    pub fn duplicate_user_name(name: impl Into<String>) -> Self {
        Self::DuplicateUserName { name: name.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn no_fields(message: impl Into<String>) -> Self {
        Self::NoFieldsProvided {
            message: message.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        Self::database(format!("{e:#}"))
    }
}
