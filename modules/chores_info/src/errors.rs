//! Error catalog for the chores_info REST and tool surfaces.

use modkit::api::ErrDef;

/// Strongly-typed error codes from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserNotFound,
    ChoreNotFound,
    UserNameConflict,
    Validation,
    NoFields,
    InvalidFormat,
    ToolNotFound,
    ToolArguments,
    InternalDb,
}

pub const USER_NOT_FOUND: ErrDef = ErrDef::new(
    404,
    "User Not Found",
    "CHORES_USER_NOT_FOUND",
    "https://errors.chores.local/CHORES_USER_NOT_FOUND",
);
pub const CHORE_NOT_FOUND: ErrDef = ErrDef::new(
    404,
    "Chore Not Found",
    "CHORES_CHORE_NOT_FOUND",
    "https://errors.chores.local/CHORES_CHORE_NOT_FOUND",
);
pub const USER_NAME_CONFLICT: ErrDef = ErrDef::new(
    409,
    "User Name Conflict",
    "CHORES_USER_NAME_CONFLICT",
    "https://errors.chores.local/CHORES_USER_NAME_CONFLICT",
);
pub const VALIDATION: ErrDef = ErrDef::new(
    400,
    "Validation Failed",
    "CHORES_VALIDATION",
    "https://errors.chores.local/CHORES_VALIDATION",
);
pub const NO_FIELDS: ErrDef = ErrDef::new(
    400,
    "No Fields Provided",
    "CHORES_NO_FIELDS",
    "https://errors.chores.local/CHORES_NO_FIELDS",
);
pub const INVALID_FORMAT: ErrDef = ErrDef::new(
    400,
    "Invalid Format",
    "CHORES_INVALID_FORMAT",
    "https://errors.chores.local/CHORES_INVALID_FORMAT",
);
pub const TOOL_NOT_FOUND: ErrDef = ErrDef::new(
    404,
    "Tool Not Found",
    "CHORES_TOOL_NOT_FOUND",
    "https://errors.chores.local/CHORES_TOOL_NOT_FOUND",
);
pub const TOOL_ARGUMENTS: ErrDef = ErrDef::new(
    400,
    "Invalid Tool Arguments",
    "CHORES_TOOL_ARGUMENTS",
    "https://errors.chores.local/CHORES_TOOL_ARGUMENTS",
);
pub const INTERNAL_DB: ErrDef = ErrDef::new(
    500,
    "Internal Database Error",
    "CHORES_INTERNAL_DB",
    "https://errors.chores.local/CHORES_INTERNAL_DB",
);

impl ErrorCode {
    /// Get the error definition for this error code
    pub const fn def(self) -> ErrDef {
        match self {
            ErrorCode::UserNotFound => USER_NOT_FOUND,
            ErrorCode::ChoreNotFound => CHORE_NOT_FOUND,
            ErrorCode::UserNameConflict => USER_NAME_CONFLICT,
            ErrorCode::Validation => VALIDATION,
            ErrorCode::NoFields => NO_FIELDS,
            ErrorCode::InvalidFormat => INVALID_FORMAT,
            ErrorCode::ToolNotFound => TOOL_NOT_FOUND,
            ErrorCode::ToolArguments => TOOL_ARGUMENTS,
            ErrorCode::InternalDb => INTERNAL_DB,
        }
    }

    /// Get the HTTP status code for this error
    pub const fn status(self) -> u16 {
        self.def().status
    }

    pub const fn all() -> &'static [ErrorCode] {
        &[
            ErrorCode::UserNotFound,
            ErrorCode::ChoreNotFound,
            ErrorCode::UserNameConflict,
            ErrorCode::Validation,
            ErrorCode::NoFields,
            ErrorCode::InvalidFormat,
            ErrorCode::ToolNotFound,
            ErrorCode::ToolArguments,
            ErrorCode::InternalDb,
        ]
    }
}
