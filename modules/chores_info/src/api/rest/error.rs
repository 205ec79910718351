use modkit::api::{ErrDef, ProblemResponse};
use tracing::error;

use crate::config::ErrorStatusPolicy;
use crate::contract::error::ChoresInfoError;
use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

const INTERNAL_DETAIL: &str = "An internal database error occurred";

fn apply_policy(def: ErrDef, policy: ErrorStatusPolicy) -> ErrDef {
    match policy {
        ErrorStatusPolicy::Typed => def,
        ErrorStatusPolicy::Legacy => def.with_status(500),
    }
}

/// Map a domain error to an RFC 9457 problem.
///
/// The domain message is carried in `detail` under both policies; database
/// failures are logged and replaced with a generic detail.
pub fn map_domain_error(
    e: &DomainError,
    instance: &str,
    policy: ErrorStatusPolicy,
) -> ProblemResponse {
    let code = match e {
        DomainError::UserNotFound { .. } => ErrorCode::UserNotFound,
        DomainError::ChoreNotFound { .. } => ErrorCode::ChoreNotFound,
        DomainError::DuplicateUserName { .. } => ErrorCode::UserNameConflict,
        DomainError::Validation { .. } => ErrorCode::Validation,
        DomainError::NoFieldsProvided { .. } => ErrorCode::NoFields,
        DomainError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        DomainError::Database { .. } => ErrorCode::InternalDb,
    };
    let detail = match e {
        DomainError::Database { message } => {
            error!(instance, %message, "database error while serving request");
            INTERNAL_DETAIL.to_string()
        }
        other => other.to_string(),
    };
    apply_policy(code.def(), policy).to_response(detail, instance)
}

/// Same mapping for errors that already crossed the contract boundary.
pub fn map_contract_error(
    e: &ChoresInfoError,
    instance: &str,
    policy: ErrorStatusPolicy,
) -> ProblemResponse {
    let (code, detail) = match e {
        ChoresInfoError::UserNotFound { .. } => (ErrorCode::UserNotFound, e.to_string()),
        ChoresInfoError::ChoreNotFound { .. } => (ErrorCode::ChoreNotFound, e.to_string()),
        ChoresInfoError::Conflict { .. } => (ErrorCode::UserNameConflict, e.to_string()),
        ChoresInfoError::Validation { .. } => (ErrorCode::Validation, e.to_string()),
        ChoresInfoError::Internal => (ErrorCode::InternalDb, INTERNAL_DETAIL.to_string()),
    };
    apply_policy(code.def(), policy).to_response(detail, instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn typed_policy_distinguishes_kinds() {
        let p = ErrorStatusPolicy::Typed;
        let cases = [
            (DomainError::user_not_found(1), StatusCode::NOT_FOUND),
            (DomainError::chore_not_found(1), StatusCode::NOT_FOUND),
            (DomainError::duplicate_user_name("Ann"), StatusCode::CONFLICT),
            (DomainError::validation("name", "User name is required"), StatusCode::BAD_REQUEST),
            (DomainError::no_fields("nothing"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_format("date", "bad"), StatusCode::BAD_REQUEST),
            (DomainError::database("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(map_domain_error(&err, "/x", p).status(), status, "{err:?}");
        }
    }

    #[test]
    fn legacy_policy_is_always_500_but_keeps_message() {
        let resp = map_domain_error(
            &DomainError::user_not_found(42),
            "/users/42",
            ErrorStatusPolicy::Legacy,
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.0.detail, "User not found with id: 42");
        assert_eq!(resp.0.code, "CHORES_USER_NOT_FOUND");
        assert_eq!(resp.0.instance, "/users/42");
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let resp = map_domain_error(
            &DomainError::database("UNIQUE constraint failed: users.name"),
            "/users",
            ErrorStatusPolicy::Typed,
        );
        assert_eq!(resp.0.detail, INTERNAL_DETAIL);
    }

    #[test]
    fn contract_errors_map_like_domain_errors() {
        let resp = map_contract_error(
            &ChoresInfoError::Conflict { name: "Ann".into() },
            "/tools/createUser",
            ErrorStatusPolicy::Typed,
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(resp.0.detail, "User with name 'Ann' already exists");
    }
}
