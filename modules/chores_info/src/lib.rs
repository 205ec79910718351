// === PUBLIC CONTRACT ===
// Other modules (the assistant, the server) consume only the contract.
pub mod contract;
pub use contract::{client, error, model};

// === ERROR CATALOG ===
pub mod errors;

// === MODULE DEFINITION ===
pub mod module;
pub use module::ChoresInfo;

// === INTERNAL MODULES ===
// Exposed for integration tests; not a stable API.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
