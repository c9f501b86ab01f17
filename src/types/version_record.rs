use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the version table: a timestamp that was up-applied at least once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: String,
    pub is_current: bool,
    pub created_at: Option<NaiveDateTime>,
}
