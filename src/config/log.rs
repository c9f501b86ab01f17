use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Targets that are too chatty at `info` for a migration run.
const QUIET_TARGETS: [(&str, &str); 2] = [("sqlx", "error"), ("sea_orm", "warn")];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_console_format")]
    pub console_format: String,

    #[serde(default)]
    pub file_enabled: bool,

    #[serde(
        default = "default_ext_level",
        deserialize_with = "deserialize_ext_level"
    )]
    pub ext_level: Option<HashMap<String, String>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: Some("./logs".to_string()),
            console_format: default_console_format(),
            file_enabled: false,
            ext_level: default_ext_level(),
        }
    }
}

impl LogConfig {
    /// `EnvFilter` directives: the base level followed by per-target overrides.
    pub fn filter_directives(&self) -> String {
        let mut filter = self.level.clone();
        if let Some(ext_levels) = &self.ext_level {
            let mut targets: Vec<_> = ext_levels.iter().collect();
            targets.sort();
            for (target, level) in targets {
                filter.push_str(&format!(",{}={}", target, level));
            }
        }
        filter
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_console_format() -> String {
    "pretty".to_string()
}

fn quiet_targets() -> HashMap<String, String> {
    QUIET_TARGETS
        .iter()
        .map(|(t, l)| (t.to_string(), l.to_string()))
        .collect()
}

fn default_ext_level() -> Option<HashMap<String, String>> {
    Some(quiet_targets())
}

/// Parses `target:level, target:level`. Entries without a colon are ignored;
/// explicit entries override the quiet defaults.
fn deserialize_ext_level<'de, D>(
    deserializer: D,
) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;

    let mut map = quiet_targets();
    for pair in s.as_deref().unwrap_or_default().split(',') {
        if let Some((key, value)) = pair.trim().split_once(':') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Ok(Some(map))
}
