//! Prescription MCP Server Implementation
//!
//! Exposes the analysis and recommendation tools over MCP.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::analysis::Measurement;
use crate::db::Database;
use crate::tools::analysis;
use crate::tools::recommendations;
use crate::tools::reports;
use crate::tools::status::StatusTracker;

/// Prescription MCP Service
#[derive(Clone)]
pub struct PrescriptionService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<PrescriptionService>,
}

impl PrescriptionService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeHealthParams {
    /// User ID the record is stored under
    pub user_id: i64,
    /// Height in meters (e.g., 1.75)
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Fasting blood glucose in mg/dL
    pub fasting_glucose: Option<f64>,
    /// Post-meal blood glucose in mg/dL
    pub post_meal_glucose: Option<f64>,
    /// Blood pressure as "systolic/diastolic" in mmHg (e.g., "120/80")
    pub blood_pressure: Option<String>,
    /// Activity level (free text, stored only)
    pub activity_level: Option<String>,
    /// Family history (free text, stored only)
    pub family_history: Option<String>,
}

impl From<AnalyzeHealthParams> for Measurement {
    fn from(p: AnalyzeHealthParams) -> Self {
        Self {
            height: p.height,
            weight: p.weight,
            fasting_glucose: p.fasting_glucose,
            post_meal_glucose: p.post_meal_glucose,
            blood_pressure: p.blood_pressure,
            activity_level: p.activity_level,
            family_history: p.family_history,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateRecommendationsParams {
    /// User ID the recommendations are stored under
    pub user_id: i64,
    /// Risk level: Low, Medium or High (anything else gets the Low plan)
    pub risk_level: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecommendationsParams {
    /// User ID
    pub user_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListHealthRecordsParams {
    /// User ID
    pub user_id: i64,
    /// Maximum number of records to return (newest first)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExportHealthReportParams {
    /// User ID
    pub user_id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PrescriptionService {
    // --- Status ---

    #[tool(description = "Get the current status of the Prescription service including build info, database status, and process information")]
    async fn prescription_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for running a health analysis: required units, classification rules and the analyze -> recommend workflow. Call this before the first analysis.")]
    fn analysis_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ANALYSIS_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ANALYSIS_INSTRUCTIONS)]))
    }

    // --- Analysis ---

    #[tool(description = "Analyze a user's measurements: BMI, diabetes stage, obesity stage, risk level (Low/Medium/High) and warnings. Stores the result in the user's history. Units: meters, kilograms, mg/dL, mmHg.")]
    fn analyze_health(&self, Parameters(p): Parameters<AnalyzeHealthParams>) -> Result<CallToolResult, McpError> {
        let user_id = p.user_id;
        let result = analysis::analyze_health(&self.database, user_id, Measurement::from(p))
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List a user's past health analyses, newest first")]
    fn list_health_records(&self, Parameters(p): Parameters<ListHealthRecordsParams>) -> Result<CallToolResult, McpError> {
        let result = analysis::list_health_records(&self.database, p.user_id, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Recommendations ---

    #[tool(description = "Generate diet, exercise and lifestyle plans for a risk level and store them for the user (replaces any previous plan)")]
    fn generate_recommendations(&self, Parameters(p): Parameters<GenerateRecommendationsParams>) -> Result<CallToolResult, McpError> {
        let result = recommendations::generate_recommendations(&self.database, p.user_id, &p.risk_level)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the stored recommendations for a user")]
    fn get_recommendations(&self, Parameters(p): Parameters<GetRecommendationsParams>) -> Result<CallToolResult, McpError> {
        let result = recommendations::get_recommendations(&self.database, p.user_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(rec) => to_json(&rec)?,
            None => format!(
                r#"{{"error": "No recommendations found for this user", "user_id": {}}}"#,
                p.user_id
            ),
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Reports ---

    #[tool(description = "Export a markdown health report for a user: latest analysis, warnings, recent history and stored recommendations")]
    fn export_health_report(&self, Parameters(p): Parameters<ExportHealthReportParams>) -> Result<CallToolResult, McpError> {
        let result = reports::export_health_report_markdown(&self.database, p.user_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = to_json(&result)?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PrescriptionService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "prescription".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Prescription Health Risk Analysis".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Prescription - rule-based health risk analysis and lifestyle recommendations. \
                 IMPORTANT: Call analysis_instructions first for units and rules. \
                 Analysis: analyze_health (stores a record), list_health_records. \
                 Recommendations: generate_recommendations (pass the risk_level from analyze_health), get_recommendations. \
                 Reports: export_health_report. Status: prescription_status."
                    .into(),
            ),
        }
    }
}
