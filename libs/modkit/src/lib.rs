//! # ModKit - shared plumbing for chore chart modules
//!
//! Every module (`chores_info`, `chore_assistant`, `api_ingress`) is wired the
//! same way: the server builds a [`ModuleCtx`] per module, the module reads its
//! typed config from it, initializes its services and hands back an axum router.
//!
//! Errors crossing the HTTP boundary are rendered as RFC 9457 problems
//! ([`Problem`], [`ProblemResponse`]) built from a static catalog ([`ErrDef`]).

pub use anyhow::Result;

pub mod context;
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};

pub mod api;
pub use api::catalog::ErrDef;
pub use api::problem::{Problem, ProblemResponse};

pub mod shutdown;
pub use shutdown::{cancel_on_shutdown, wait_for_shutdown};
