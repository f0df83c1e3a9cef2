//! Health analysis tools
//!
//! Validate incoming measurements, run the analyzer and store the result.

use serde::Serialize;

use crate::analysis::{analyze, ClassificationResult, Measurement, Warning};
use crate::db::Database;
use crate::models::{HealthRecord, HealthRecordCreate};

/// Response for analyze_health
#[derive(Debug, Serialize)]
pub struct AnalyzeHealthResponse {
    pub record_id: i64,
    pub user_id: i64,
    pub bmi: f64,
    pub diabetes_stage: String,
    pub obesity_stage: String,
    pub risk_level: String,
    pub warnings: Vec<String>,
    pub created_at: String,
}

/// Record summary for history listing
#[derive(Debug, Serialize)]
pub struct HealthRecordSummary {
    pub id: i64,
    pub bmi: f64,
    pub fasting_glucose: f64,
    pub post_meal_glucose: f64,
    pub blood_pressure: Option<String>,
    pub diabetes_stage: String,
    pub obesity_stage: String,
    pub risk_level: String,
    pub warning_count: usize,
    pub created_at: String,
}

/// Response for list_health_records
#[derive(Debug, Serialize)]
pub struct ListHealthRecordsResponse {
    pub user_id: i64,
    pub records: Vec<HealthRecordSummary>,
    pub total: usize,
}

impl From<&HealthRecord> for HealthRecordSummary {
    fn from(record: &HealthRecord) -> Self {
        Self {
            id: record.id,
            bmi: round1(record.bmi),
            fasting_glucose: record.fasting_glucose,
            post_meal_glucose: record.post_meal_glucose,
            blood_pressure: record.blood_pressure.clone(),
            diabetes_stage: record.diabetes_stage.as_str().to_string(),
            obesity_stage: record.obesity_stage.as_str().to_string(),
            risk_level: record.risk_level.as_str().to_string(),
            warning_count: record.warnings.len(),
            created_at: record.created_at.clone(),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn warning_texts(warnings: &[Warning]) -> Vec<String> {
    warnings.iter().map(|w| w.message.clone()).collect()
}

/// Reject values the analyzer trusts the caller to have checked
pub fn validate_measurement(m: &Measurement) -> Result<(), String> {
    if !m.height.is_finite() || m.height <= 0.0 {
        return Err("Height must be greater than 0 (meters)".to_string());
    }
    if !m.weight.is_finite() || m.weight <= 0.0 {
        return Err("Weight must be greater than 0 (kilograms)".to_string());
    }
    for (name, value) in [
        ("Fasting glucose", m.fasting_glucose),
        ("Post-meal glucose", m.post_meal_glucose),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{} cannot be negative (mg/dL)", name));
            }
        }
    }
    Ok(())
}

/// Analyze a measurement set and store it in the user's history
pub fn analyze_health(
    db: &Database,
    user_id: i64,
    measurement: Measurement,
) -> Result<AnalyzeHealthResponse, String> {
    validate_measurement(&measurement)?;

    let result: ClassificationResult = analyze(&measurement).map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let record = HealthRecord::create(
        &conn,
        &HealthRecordCreate {
            user_id,
            measurement: &measurement,
            result: &result,
        },
    )
    .map_err(|e| format!("Failed to store health record: {}", e))?;

    Ok(AnalyzeHealthResponse {
        record_id: record.id,
        user_id,
        bmi: result.bmi,
        diabetes_stage: result.diabetes_stage.as_str().to_string(),
        obesity_stage: result.obesity_stage.as_str().to_string(),
        risk_level: result.risk_level.as_str().to_string(),
        warnings: warning_texts(&result.warnings),
        created_at: record.created_at,
    })
}

/// List a user's analysis history, newest first
pub fn list_health_records(
    db: &Database,
    user_id: i64,
    limit: Option<i64>,
) -> Result<ListHealthRecordsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let records = HealthRecord::list_for_user(&conn, user_id, limit)
        .map_err(|e| format!("Failed to list health records: {}", e))?;

    let summaries: Vec<HealthRecordSummary> = records.iter().map(HealthRecordSummary::from).collect();
    let total = summaries.len();

    Ok(ListHealthRecordsResponse {
        user_id,
        records: summaries,
        total,
    })
}
