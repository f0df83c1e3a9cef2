//! Health analysis module
//!
//! Rule-based classification of biometric measurements: BMI, diabetes
//! stage, obesity stage, composite risk level and warnings.

pub mod analyzer;
pub mod blood_pressure;
pub mod classification;
pub mod warnings;

pub use analyzer::{
    analyze, calculate_bmi, AnalysisError, AnalysisResult, ClassificationResult, Measurement,
};
pub use blood_pressure::{BloodPressure, BpCategory};
pub use classification::{
    risk_points, DiabetesStage, ObesityStage, RiskLevel, MAX_RISK_POINTS,
};
pub use warnings::{generate_warnings, Severity, Warning};
