//! Recommendation model
//!
//! Latest generated plan per user. Generating again replaces the stored plan.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::recommendations::RecommendationBundle;

/// A stored recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub user_id: i64,
    pub risk_level: String,
    pub diet_plan: String,
    pub exercise_plan: String,
    pub lifestyle_tips: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Recommendation {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            risk_level: row.get("risk_level")?,
            diet_plan: row.get("diet_plan")?,
            exercise_plan: row.get("exercise_plan")?,
            lifestyle_tips: row.get("lifestyle_tips")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Store a bundle for a user, replacing any previous one (upsert)
    pub fn upsert(conn: &Connection, user_id: i64, bundle: &RecommendationBundle) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO recommendations (user_id, risk_level, diet_plan, exercise_plan, lifestyle_tips)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id) DO UPDATE SET
                risk_level = excluded.risk_level,
                diet_plan = excluded.diet_plan,
                exercise_plan = excluded.exercise_plan,
                lifestyle_tips = excluded.lifestyle_tips,
                updated_at = datetime('now')
            "#,
            params![
                user_id,
                bundle.risk_level,
                bundle.diet_plan,
                bundle.exercise_plan,
                bundle.lifestyle_tips,
            ],
        )?;

        tracing::info!(user_id, risk_level = %bundle.risk_level, "Stored recommendations");

        Self::get_for_user(conn, user_id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Look up a user's recommendations
    pub fn get_for_user(conn: &Connection, user_id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recommendations WHERE user_id = ?1")?;

        let result = stmt.query_row([user_id], Self::from_row);
        match result {
            Ok(rec) => Ok(Some(rec)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn bundle(&self) -> RecommendationBundle {
        RecommendationBundle {
            risk_level: self.risk_level.clone(),
            diet_plan: self.diet_plan.clone(),
            exercise_plan: self.exercise_plan.clone(),
            lifestyle_tips: self.lifestyle_tips.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::recommendations::generate;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_lookup_missing_user() {
        let conn = setup();
        assert!(Recommendation::get_for_user(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn test_upsert_keeps_one_record_per_user() {
        let conn = setup();

        let first = Recommendation::upsert(&conn, 1, &generate("High")).unwrap();
        let second = Recommendation::upsert(&conn, 1, &generate("Low")).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.risk_level, "Low");
        assert_eq!(second.bundle(), generate("Low"));

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM recommendations WHERE user_id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_users_are_independent() {
        let conn = setup();
        Recommendation::upsert(&conn, 1, &generate("High")).unwrap();
        Recommendation::upsert(&conn, 2, &generate("Medium")).unwrap();

        let one = Recommendation::get_for_user(&conn, 1).unwrap().unwrap();
        let two = Recommendation::get_for_user(&conn, 2).unwrap().unwrap();
        assert_eq!(one.bundle(), generate("High"));
        assert_eq!(two.bundle(), generate("Medium"));
    }
}
