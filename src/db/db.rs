use crate::config::Settings;
use anyhow::{Context, Result};
use sea_orm::{Database, DatabaseConnection};
use tracing::debug;

/// Opens the target database named by the settings. The engine itself never
/// connects; it is handed the resulting connection.
pub async fn init_db(settings: &Settings) -> Result<DatabaseConnection> {
    let url = settings.database_url()?;
    debug!("Connecting to target database");
    Database::connect(url)
        .await
        .context("Failed to connect to the target database")
}
