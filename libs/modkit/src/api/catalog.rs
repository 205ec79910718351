//! Static error catalog entries rendered as problems.
use http::StatusCode;

use crate::api::problem::{Problem, ProblemResponse};

/// One entry of a module's error catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    pub const fn new(
        status: u16,
        title: &'static str,
        code: &'static str,
        type_url: &'static str,
    ) -> Self {
        Self {
            status,
            title,
            code,
            type_url,
        }
    }

    /// Convert this error definition into a Problem with the given detail
    #[inline]
    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            self.title,
            detail.into(),
        )
        .with_code(self.code)
        .with_type(self.type_url)
    }

    /// Render a full response for a request path, tagging it with the current span.
    pub fn to_response(&self, detail: impl Into<String>, instance: &str) -> ProblemResponse {
        ProblemResponse(
            self.to_problem(detail)
                .with_instance(instance)
                .with_current_trace(),
        )
    }

    /// Same entry with a different status; used when a module collapses statuses.
    pub const fn with_status(self, status: u16) -> Self {
        Self { status, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOT_FOUND: ErrDef = ErrDef::new(
        404,
        "Not Found",
        "TEST_NOT_FOUND",
        "https://errors.example.com/TEST_NOT_FOUND",
    );

    #[test]
    fn err_def_to_problem_works() {
        let problem = NOT_FOUND.to_problem("Resource missing");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Resource missing");
        assert_eq!(problem.code, "TEST_NOT_FOUND");
        assert_eq!(
            problem.type_url,
            "https://errors.example.com/TEST_NOT_FOUND"
        );
    }

    #[test]
    fn to_response_sets_instance() {
        let resp = NOT_FOUND.to_response("gone", "/users/9");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.0.instance, "/users/9");
    }

    #[test]
    fn with_status_keeps_code() {
        let collapsed = NOT_FOUND.with_status(500);
        assert_eq!(collapsed.status, 500);
        assert_eq!(collapsed.code, NOT_FOUND.code);
    }
}
