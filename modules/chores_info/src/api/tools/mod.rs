//! Tool-calling surface: the CRUD operations as named, schema-typed functions
//! for conversational agents.

pub mod dto;
pub mod handlers;
pub mod registry;

pub use registry::{ChoreTool, ToolDefinition, ToolError, ToolRegistry};
