use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::HistoryAction;

/// Append-only audit row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub version: String,
    pub action: HistoryAction,
    pub created_at: Option<NaiveDateTime>,
}
