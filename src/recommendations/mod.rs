//! Recommendations module
//!
//! Risk-tiered diet, exercise and lifestyle plans.

pub mod generator;

pub use generator::{generate, plan_for, Plan, RecommendationBundle};
