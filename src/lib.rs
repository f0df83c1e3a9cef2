//! Prescription Library
//!
//! Rule-based health risk analysis and risk-tiered lifestyle
//! recommendations, with SQLite persistence per user.

pub mod analysis;
pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod recommendations;
pub mod tools;
