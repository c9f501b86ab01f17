use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MigrationsConfig {
    /// Directory holding the `.up.sql` / `.down.sql` scripts.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

fn default_location() -> String {
    ".".to_string()
}
