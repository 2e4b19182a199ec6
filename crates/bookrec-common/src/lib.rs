pub mod error;
pub mod matrix;
pub mod mcp_api;
