//! Health record model
//!
//! One stored analysis: the measurements as supplied plus the derived
//! classification. Records are append-only history per user.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::analysis::{
    ClassificationResult, DiabetesStage, Measurement, ObesityStage, RiskLevel, Warning,
};
use crate::db::{DbError, DbResult};

/// A stored analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: i64,
    pub user_id: i64,
    pub height: f64,
    pub weight: f64,
    pub fasting_glucose: f64,
    pub post_meal_glucose: f64,
    pub blood_pressure: Option<String>,
    pub activity_level: Option<String>,
    pub family_history: Option<String>,
    pub bmi: f64,
    pub diabetes_stage: DiabetesStage,
    pub obesity_stage: ObesityStage,
    pub risk_level: RiskLevel,
    pub warnings: Vec<Warning>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new record
#[derive(Debug, Clone)]
pub struct HealthRecordCreate<'a> {
    pub user_id: i64,
    pub measurement: &'a Measurement,
    pub result: &'a ClassificationResult,
}

fn invalid_label(column: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        format!("unknown label: {}", value).into(),
    )
}

impl HealthRecord {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let diabetes: String = row.get("diabetes_stage")?;
        let obesity: String = row.get("obesity_stage")?;
        let risk: String = row.get("risk_level")?;
        let warnings_json: String = row.get("warnings_json")?;

        let diabetes_stage = DiabetesStage::from_str(&diabetes)
            .ok_or_else(|| invalid_label(0, &diabetes))?;
        let obesity_stage = ObesityStage::from_str(&obesity)
            .ok_or_else(|| invalid_label(0, &obesity))?;
        let risk_level = RiskLevel::from_str(&risk).ok_or_else(|| invalid_label(0, &risk))?;
        let warnings = serde_json::from_str(&warnings_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            fasting_glucose: row.get("fasting_glucose")?,
            post_meal_glucose: row.get("post_meal_glucose")?,
            blood_pressure: row.get("blood_pressure")?,
            activity_level: row.get("activity_level")?,
            family_history: row.get("family_history")?,
            bmi: row.get("bmi")?,
            diabetes_stage,
            obesity_stage,
            risk_level,
            warnings,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Persist an analysis.
    ///
    /// The measurement must have passed analysis, so both glucose readings
    /// are present.
    pub fn create(conn: &Connection, data: &HealthRecordCreate) -> DbResult<Self> {
        let m = data.measurement;
        let r = data.result;
        let warnings_json = serde_json::to_string(&r.warnings)?;

        conn.execute(
            r#"
            INSERT INTO health_records (
                user_id, height, weight, fasting_glucose, post_meal_glucose,
                blood_pressure, activity_level, family_history,
                bmi, diabetes_stage, obesity_stage, risk_level, warnings_json
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                data.user_id,
                m.height,
                m.weight,
                m.fasting_glucose,
                m.post_meal_glucose,
                m.blood_pressure,
                m.activity_level,
                m.family_history,
                r.bmi,
                r.diabetes_stage.as_str(),
                r.obesity_stage.as_str(),
                r.risk_level.as_str(),
                warnings_json,
            ],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(
            record_id = id,
            user_id = data.user_id,
            risk_level = r.risk_level.as_str(),
            "Stored health record"
        );

        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a record by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM health_records WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's records, newest first
    pub fn list_for_user(conn: &Connection, user_id: i64, limit: Option<i64>) -> DbResult<Vec<Self>> {
        let sql = match limit {
            Some(n) => format!(
                "SELECT * FROM health_records WHERE user_id = ?1 ORDER BY created_at DESC, id DESC LIMIT {}",
                n
            ),
            None => "SELECT * FROM health_records WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
                .to_string(),
        };

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Most recent record for a user
    pub fn latest_for_user(conn: &Connection, user_id: i64) -> DbResult<Option<Self>> {
        Ok(Self::list_for_user(conn, user_id, Some(1))?.into_iter().next())
    }

    /// Rewrite the derived columns of a record
    pub fn update_classification(
        conn: &Connection,
        id: i64,
        result: &ClassificationResult,
    ) -> DbResult<Option<Self>> {
        let warnings_json = serde_json::to_string(&result.warnings)?;

        conn.execute(
            r#"
            UPDATE health_records SET
                bmi = ?1,
                diabetes_stage = ?2,
                obesity_stage = ?3,
                risk_level = ?4,
                warnings_json = ?5,
                updated_at = datetime('now')
            WHERE id = ?6
            "#,
            params![
                result.bmi,
                result.diabetes_stage.as_str(),
                result.obesity_stage.as_str(),
                result.risk_level.as_str(),
                warnings_json,
                id,
            ],
        )?;

        Self::get_by_id(conn, id)
    }

    /// Rebuild the measurement this record was analyzed from
    pub fn measurement(&self) -> Measurement {
        Measurement {
            height: self.height,
            weight: self.weight,
            fasting_glucose: Some(self.fasting_glucose),
            post_meal_glucose: Some(self.post_meal_glucose),
            blood_pressure: self.blood_pressure.clone(),
            activity_level: self.activity_level.clone(),
            family_history: self.family_history.clone(),
        }
    }

    /// Stored classification as a result bundle
    pub fn classification(&self) -> ClassificationResult {
        ClassificationResult {
            bmi: self.bmi,
            diabetes_stage: self.diabetes_stage,
            obesity_stage: self.obesity_stage,
            risk_level: self.risk_level,
            warnings: self.warnings.clone(),
        }
    }
}
