use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::Direction;

/// A migration script discovered on disk. Rediscovered on every run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MigrationFile {
    /// Full filename, the identity of the script.
    pub file_name: String,

    /// The 14-digit `YYYYMMDDHHMMSS` token preceding the first underscore.
    pub version: String,

    pub timestamp: NaiveDateTime,

    /// Free text between the version and the direction suffix.
    pub name: String,

    pub direction: Direction,

    pub path: PathBuf,
}

impl MigrationFile {
    pub fn read_contents(&self) -> std::io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}
