//! MCP tool request and response shapes.

pub mod types;

// Re-export types for convenience
pub use types::*;
