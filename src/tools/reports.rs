//! Health report export
//!
//! Markdown summary of a user's latest analysis and stored plan.

use serde::Serialize;

use crate::analysis::Severity;
use crate::db::Database;
use crate::models::{HealthRecord, Recommendation};

/// Response for export_health_report
#[derive(Debug, Serialize)]
pub struct ExportHealthReportResponse {
    pub user_id: i64,
    pub markdown: String,
    pub record_count: usize,
    pub has_recommendations: bool,
    pub generated_at: String,
}

/// Number of past analyses listed in the trend table
const HISTORY_ROWS: i64 = 10;

fn severity_heading(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical",
        Severity::Urgent => "Urgent",
        Severity::Warning => "Warning",
        Severity::Info => "Info",
    }
}

fn push_plan(markdown: &mut String, title: &str, text: &str) {
    markdown.push_str(&format!("### {}\n\n", title));
    // Plans are stored as "1. ... 2. ..." on one line
    for step in split_steps(text) {
        markdown.push_str(&format!("- {}\n", step));
    }
    markdown.push('\n');
}

/// Split "1. A. 2. B." into ["A.", "B."]
fn split_steps(text: &str) -> Vec<String> {
    let mut steps: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut expected = 1;

    for token in text.split_whitespace() {
        if token == format!("{}.", expected) {
            if !current.is_empty() {
                steps.push(current.trim().to_string());
                current.clear();
            }
            expected += 1;
            continue;
        }
        current.push_str(token);
        current.push(' ');
    }
    if !current.trim().is_empty() {
        steps.push(current.trim().to_string());
    }
    steps
}

/// Export a markdown health report for a user
pub fn export_health_report_markdown(
    db: &Database,
    user_id: i64,
) -> Result<ExportHealthReportResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let records = HealthRecord::list_for_user(&conn, user_id, Some(HISTORY_ROWS))
        .map_err(|e| format!("Failed to list health records: {}", e))?;
    let recommendation = Recommendation::get_for_user(&conn, user_id)
        .map_err(|e| format!("Failed to get recommendations: {}", e))?;

    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let mut markdown = String::new();
    markdown.push_str("# Health Risk Report\n\n");
    markdown.push_str(&format!("**User:** {}\n\n", user_id));
    markdown.push_str(&format!("**Generated:** {}\n\n", generated_at));
    markdown.push_str("---\n\n");

    match records.first() {
        Some(latest) => {
            markdown.push_str("## Latest Analysis\n\n");
            markdown.push_str(&format!("*Recorded {}*\n\n", latest.created_at));
            markdown.push_str("| Measure | Value |\n|---|---|\n");
            markdown.push_str(&format!("| Height | {:.2} m |\n", latest.height));
            markdown.push_str(&format!("| Weight | {:.1} kg |\n", latest.weight));
            markdown.push_str(&format!("| BMI | {:.1} ({}) |\n", latest.bmi, latest.obesity_stage.as_str()));
            markdown.push_str(&format!("| Fasting glucose | {} mg/dL |\n", latest.fasting_glucose));
            markdown.push_str(&format!("| Post-meal glucose | {} mg/dL |\n", latest.post_meal_glucose));
            markdown.push_str(&format!("| Diabetes stage | {} |\n", latest.diabetes_stage.as_str()));
            if let Some(ref bp) = latest.blood_pressure {
                markdown.push_str(&format!("| Blood pressure | {} mmHg |\n", bp));
            }
            markdown.push_str(&format!("| **Risk level** | **{}** |\n\n", latest.risk_level.as_str()));

            if latest.warnings.is_empty() {
                markdown.push_str("No warnings.\n\n");
            } else {
                markdown.push_str("### Warnings\n\n");
                for warning in &latest.warnings {
                    markdown.push_str(&format!(
                        "- **{}**: {}\n",
                        severity_heading(warning.severity),
                        warning.message
                    ));
                }
                markdown.push('\n');
            }

            if records.len() > 1 {
                markdown.push_str("## History\n\n");
                markdown.push_str("| Date | BMI | Diabetes | Risk |\n|---|---|---|---|\n");
                for record in &records {
                    markdown.push_str(&format!(
                        "| {} | {:.1} | {} | {} |\n",
                        record.created_at,
                        record.bmi,
                        record.diabetes_stage.as_str(),
                        record.risk_level.as_str()
                    ));
                }
                markdown.push('\n');
            }
        }
        None => {
            markdown.push_str("No analyses recorded.\n\n");
        }
    }

    if let Some(ref rec) = recommendation {
        markdown.push_str(&format!("## Recommendations ({} risk)\n\n", rec.risk_level));
        push_plan(&mut markdown, "Diet", &rec.diet_plan);
        push_plan(&mut markdown, "Exercise", &rec.exercise_plan);
        push_plan(&mut markdown, "Lifestyle", &rec.lifestyle_tips);
    }

    markdown.push_str("---\n\n");
    markdown.push_str("*Rule-based screening only. Not a medical diagnosis.*\n");

    Ok(ExportHealthReportResponse {
        user_id,
        markdown,
        record_count: records.len(),
        has_recommendations: recommendation.is_some(),
        generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Measurement;
    use crate::db::migrations::run_migrations;
    use crate::tools::analysis::analyze_health;
    use crate::tools::recommendations::generate_recommendations;

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    #[test]
    fn test_split_steps() {
        assert_eq!(
            split_steps("1. Brisk walking. 2. Swimming or cycling. 3. Stretch."),
            vec!["Brisk walking.", "Swimming or cycling.", "Stretch."]
        );
        // Numbers inside a step are kept
        assert_eq!(
            split_steps("1. Sleep 7-8 hours. 2. Walk 30 minutes."),
            vec!["Sleep 7-8 hours.", "Walk 30 minutes."]
        );
    }

    #[test]
    fn test_empty_report() {
        let db = setup();
        let report = export_health_report_markdown(&db, 9).unwrap();
        assert_eq!(report.record_count, 0);
        assert!(!report.has_recommendations);
        assert!(report.markdown.contains("No analyses recorded."));
    }

    #[test]
    fn test_full_report() {
        let db = setup();
        let m = Measurement {
            height: 1.75,
            weight: 95.0,
            fasting_glucose: Some(130.0),
            post_meal_glucose: Some(210.0),
            blood_pressure: Some("150/95".to_string()),
            activity_level: None,
            family_history: None,
        };
        let analysis = analyze_health(&db, 9, m).unwrap();
        generate_recommendations(&db, 9, &analysis.risk_level).unwrap();

        let report = export_health_report_markdown(&db, 9).unwrap();
        assert_eq!(report.record_count, 1);
        assert!(report.has_recommendations);
        assert!(report.markdown.contains("| **Risk level** | **High** |"));
        assert!(report.markdown.contains("**Critical**"));
        assert!(report.markdown.contains("## Recommendations (High risk)"));
        assert!(report.markdown.contains("- Consult endocrinologist."));
        assert!(!report.markdown.contains("## History"));
    }
}
