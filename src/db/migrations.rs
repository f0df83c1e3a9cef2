//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- HEALTH RECORDS
        -- One row per analysis call (history)
        -- ============================================
        CREATE TABLE health_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,

            -- Measurements as supplied
            height REAL NOT NULL,                -- meters
            weight REAL NOT NULL,                -- kilograms
            fasting_glucose REAL NOT NULL,       -- mg/dL
            post_meal_glucose REAL NOT NULL,     -- mg/dL
            blood_pressure TEXT,                 -- "systolic/diastolic", raw text
            activity_level TEXT,
            family_history TEXT,

            -- Derived classification
            bmi REAL NOT NULL,
            diabetes_stage TEXT NOT NULL CHECK(diabetes_stage IN ('Normal', 'Pre-Diabetic', 'Diabetic')),
            obesity_stage TEXT NOT NULL,
            risk_level TEXT NOT NULL CHECK(risk_level IN ('Low', 'Medium', 'High')),
            warnings_json TEXT NOT NULL DEFAULT '[]',

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_health_records_user ON health_records(user_id);
        CREATE INDEX idx_health_records_created ON health_records(created_at);

        -- ============================================
        -- RECOMMENDATIONS
        -- Latest plan per user
        -- ============================================
        CREATE TABLE recommendations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE,
            risk_level TEXT NOT NULL,            -- as supplied, may be outside Low/Medium/High
            diet_plan TEXT NOT NULL,
            exercise_plan TEXT NOT NULL,
            lifestyle_tips TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(!needs_migration(&conn).unwrap());
    }

    #[test]
    fn test_fresh_database_needs_migration() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT)",
            [],
        )
        .unwrap();
        assert!(needs_migration(&conn).unwrap());
    }
}
