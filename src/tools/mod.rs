//! Prescription Tools module
//!
//! Tool implementations behind the MCP server: validation, persistence
//! and response shaping around the analysis engine.

pub mod analysis;
pub mod recommendations;
pub mod reports;
pub mod status;
