// === MODULE DEFINITION ===
pub mod module;
pub use module::ChoreAssistant;

pub mod config;
pub mod errors;
pub mod memory;
pub mod provider;
pub mod service;
pub mod tool_loop;

// Exposed for integration tests; not a stable API.
#[doc(hidden)]
pub mod api;
