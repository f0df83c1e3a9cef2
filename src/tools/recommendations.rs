//! Recommendation tools

use serde::Serialize;

use crate::db::Database;
use crate::models::Recommendation;
use crate::recommendations::generate;

/// Stored recommendations for a user
#[derive(Debug, Serialize)]
pub struct RecommendationDetail {
    pub id: i64,
    pub user_id: i64,
    pub risk_level: String,
    pub diet_plan: String,
    pub exercise_plan: String,
    pub lifestyle_tips: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Recommendation> for RecommendationDetail {
    fn from(rec: Recommendation) -> Self {
        Self {
            id: rec.id,
            user_id: rec.user_id,
            risk_level: rec.risk_level,
            diet_plan: rec.diet_plan,
            exercise_plan: rec.exercise_plan,
            lifestyle_tips: rec.lifestyle_tips,
            created_at: rec.created_at,
            updated_at: rec.updated_at,
        }
    }
}

/// Generate recommendations for a risk level and store them for the user
pub fn generate_recommendations(
    db: &Database,
    user_id: i64,
    risk_level: &str,
) -> Result<RecommendationDetail, String> {
    let bundle = generate(risk_level);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let rec = Recommendation::upsert(&conn, user_id, &bundle)
        .map_err(|e| format!("Failed to store recommendations: {}", e))?;

    Ok(RecommendationDetail::from(rec))
}

/// Get a user's stored recommendations
pub fn get_recommendations(db: &Database, user_id: i64) -> Result<Option<RecommendationDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let rec = Recommendation::get_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to get recommendations: {}", e))?;

    Ok(rec.map(RecommendationDetail::from))
}
