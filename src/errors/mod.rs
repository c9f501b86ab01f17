use std::path::PathBuf;

use sea_orm::DbErr;
use thiserror::Error;

use crate::types::Direction;

pub type Result<T> = std::result::Result<T, MigrationError>;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Migration location '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ledger configuration: {0}")]
    Configuration(String),

    #[error(
        "Malformed migration filename '{0}', expected <YYYYMMDDHHMMSS>_<name>.<up|down>.sql"
    )]
    MalformedFilename(String),

    #[error("Malformed timestamp '{timestamp}' in '{source_name}', expected YYYYMMDDHHMMSS")]
    MalformedTimestamp {
        source_name: String,
        timestamp: String,
    },

    #[error("Failed to migrate {direction} '{file}': {source}")]
    Execution {
        file: String,
        direction: Direction,
        #[source]
        source: DbErr,
    },

    #[error("Failed to open a transaction for version {version}: {source}")]
    Transaction {
        version: String,
        #[source]
        source: DbErr,
    },

    #[error("Ledger failed to {operation}: {source}")]
    Ledger {
        operation: &'static str,
        #[source]
        source: DbErr,
    },
}

impl MigrationError {
    pub fn ledger(operation: &'static str, source: DbErr) -> Self {
        Self::Ledger { operation, source }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures of the bookkeeping tables themselves.
    pub fn is_ledger(&self) -> bool {
        matches!(self, Self::Ledger { .. })
    }
}
