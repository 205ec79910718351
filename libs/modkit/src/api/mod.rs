//! HTTP API helpers shared by all REST surfaces.

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};
