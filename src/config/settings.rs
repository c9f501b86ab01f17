use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::config::{DatabaseConfig, LedgerConfig, LogConfig, MigrationsConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logs: LogConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub migrations: MigrationsConfig,
}

/// Environment variable naming the target database.
pub const DATABASE_URL_VAR: &str = "TIDEMARK__DATABASE__URL";

fn get_env_file_name() -> String {
    if let Ok(env_file) = std::env::var("TIDEMARK_ENV_FILE") {
        return env_file;
    }
    if let Ok(env) = std::env::var("TIDEMARK_ENV") {
        return match env.to_lowercase().as_str() {
            "dev" => ".env.dev".to_string(),
            "test" => ".env.test".to_string(),
            _ => ".env".to_string(),
        };
    }
    ".env".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file using `TIDEMARK_ENV` env var
        dotenvy::from_filename(get_env_file_name()).ok();

        let settings = Config::builder()
            .add_source(
                Environment::with_prefix("TIDEMARK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// The connection string, or an error naming the variable to set.
    pub fn database_url(&self) -> Result<&str> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("Database url is not set, export {}", DATABASE_URL_VAR))
    }

    pub fn print_config(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to serialize settings: {}", err),
        }
    }
}
