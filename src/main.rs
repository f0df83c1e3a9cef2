//! Prescription
//!
//! An MCP server for health risk analysis and recommendations.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use prescription::mcp::PrescriptionService;
use prescription::{build_info, config, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr; stdout carries the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config::DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let db_path = config::get_database_path();
    tracing::info!(path = %db_path.display(), "Opening database");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!(version, "Database schema ready");
        Ok(())
    })?;

    let service = PrescriptionService::new(db_path, database);

    tracing::info!("Starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
