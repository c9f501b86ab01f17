use colored::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// State transitions recorded in the history table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    MigratingUp,
    MigratingDown,
    MigratedUp,
    MigratedDown,
    Error,
}

impl HistoryAction {
    pub fn to_colored_string(&self) -> String {
        match self {
            HistoryAction::MigratingUp => "MIGRATING UP".blue().bold().to_string(),
            HistoryAction::MigratingDown => "MIGRATING DOWN".blue().bold().to_string(),
            HistoryAction::MigratedUp => "MIGRATED UP".green().bold().to_string(),
            HistoryAction::MigratedDown => "MIGRATED DOWN".yellow().bold().to_string(),
            HistoryAction::Error => "ERROR".red().bold().to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            HistoryAction::MigratingUp | HistoryAction::MigratingDown
        )
    }
}
