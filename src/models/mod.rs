//! Data models
//!
//! Rust structs representing database entities.

mod health_record;
mod recommendation;

pub use health_record::{HealthRecord, HealthRecordCreate};
pub use recommendation::Recommendation;
