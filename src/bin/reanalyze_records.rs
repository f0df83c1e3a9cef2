//! Re-run the analysis over a user's stored records and rewrite the
//! derived columns (after threshold table changes)
//! Usage: cargo run --bin reanalyze_records -- <user_id>

use prescription::analysis::analyze;
use prescription::config::get_database_path;
use prescription::db::{migrations, Database, DbError};
use prescription::models::HealthRecord;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let user_id: i64 = match args.get(1).map(|s| s.parse()) {
        Some(Ok(id)) => id,
        _ => {
            eprintln!("Usage: reanalyze_records <user_id>");
            std::process::exit(2);
        }
    };

    let db_path = get_database_path();
    println!("Database: {}", db_path.display());

    let database = Database::new(&db_path)?;

    database.with_conn_mut(|conn| {
        migrations::run_migrations(conn)?;

        let tx = conn.transaction()?;
        let records = HealthRecord::list_for_user(&tx, user_id, None)?;
        println!("Found {} records for user {}", records.len(), user_id);

        let mut changed = 0;
        for record in &records {
            let result = match analyze(&record.measurement()) {
                Ok(r) => r,
                Err(e) => {
                    println!("  Record {}: skipped ({})", record.id, e);
                    continue;
                }
            };

            if result == record.classification() {
                continue;
            }

            println!(
                "  Record {}: {} / {} / {} -> {} / {} / {}",
                record.id,
                record.diabetes_stage.as_str(),
                record.obesity_stage.as_str(),
                record.risk_level.as_str(),
                result.diabetes_stage.as_str(),
                result.obesity_stage.as_str(),
                result.risk_level.as_str(),
            );
            HealthRecord::update_classification(&tx, record.id, &result)?;
            changed += 1;
        }

        tx.commit().map_err(DbError::from)?;
        println!("Updated {} of {} records", changed, records.len());
        Ok(())
    })?;

    Ok(())
}
