use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Connection string of the target database, e.g. `sqlite://app.db?mode=rwc`.
    /// Left unset on purpose: commands that need a database refuse to run without it.
    #[serde(default)]
    pub url: Option<String>,
}
