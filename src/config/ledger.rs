use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    errors::{MigrationError, Result},
    types::HistoryAction,
};

/// Names of the bookkeeping tables and the values stored in the history
/// `action` column.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    #[serde(default = "default_version_table")]
    pub version_table: String,

    #[serde(default = "default_history_table")]
    pub history_table: String,

    #[serde(default)]
    pub actions: ActionLabels,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ActionLabels {
    #[serde(default = "default_migrating_up")]
    pub migrating_up: String,

    #[serde(default = "default_migrating_down")]
    pub migrating_down: String,

    #[serde(default = "default_migrated_up")]
    pub migrated_up: String,

    #[serde(default = "default_migrated_down")]
    pub migrated_down: String,

    #[serde(default = "default_error")]
    pub error: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            version_table: default_version_table(),
            history_table: default_history_table(),
            actions: ActionLabels::default(),
        }
    }
}

impl Default for ActionLabels {
    fn default() -> Self {
        Self {
            migrating_up: default_migrating_up(),
            migrating_down: default_migrating_down(),
            migrated_up: default_migrated_up(),
            migrated_down: default_migrated_down(),
            error: default_error(),
        }
    }
}

fn default_version_table() -> String {
    "goschema_migration_version".to_string()
}

fn default_history_table() -> String {
    "goschema_migration_history".to_string()
}

fn default_migrating_up() -> String {
    HistoryAction::MigratingUp.to_string()
}

fn default_migrating_down() -> String {
    HistoryAction::MigratingDown.to_string()
}

fn default_migrated_up() -> String {
    HistoryAction::MigratedUp.to_string()
}

fn default_migrated_down() -> String {
    HistoryAction::MigratedDown.to_string()
}

fn default_error() -> String {
    HistoryAction::Error.to_string()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl ActionLabels {
    pub fn label(&self, action: HistoryAction) -> &str {
        match action {
            HistoryAction::MigratingUp => &self.migrating_up,
            HistoryAction::MigratingDown => &self.migrating_down,
            HistoryAction::MigratedUp => &self.migrated_up,
            HistoryAction::MigratedDown => &self.migrated_down,
            HistoryAction::Error => &self.error,
        }
    }

    pub fn action(&self, label: &str) -> Option<HistoryAction> {
        HistoryAction::iter().find(|a| self.label(*a) == label)
    }

    /// `'a', 'b', ...` for the CHECK constraint of the history table.
    pub fn sql_list(&self) -> String {
        HistoryAction::iter()
            .map(|a| format!("'{}'", self.label(a)))
            .join(", ")
    }
}

impl LedgerConfig {
    /// Table names end up interpolated into SQL, so only plain identifiers
    /// are accepted. Labels must be distinct and free of quotes.
    pub fn validate(&self) -> Result<()> {
        for table in [&self.version_table, &self.history_table] {
            if !is_identifier(table) {
                return Err(MigrationError::Configuration(format!(
                    "'{}' is not a valid table name",
                    table
                )));
            }
        }
        if self.version_table == self.history_table {
            return Err(MigrationError::Configuration(
                "version and history tables must differ".to_string(),
            ));
        }

        let labels: Vec<&str> = HistoryAction::iter()
            .map(|a| self.actions.label(a))
            .collect();
        if let Some(bad) = labels
            .iter()
            .find(|l| l.trim().is_empty() || l.contains('\''))
        {
            return Err(MigrationError::Configuration(format!(
                "'{}' is not a valid action label",
                bad
            )));
        }
        if labels.iter().unique().count() != labels.len() {
            return Err(MigrationError::Configuration(
                "action labels must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}
