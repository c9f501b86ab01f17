use serde::Serialize;

use crate::types::Direction;

/// Outcome of a successful (possibly partial) run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub direction: Direction,

    /// Versions applied or reverted, in execution order.
    pub applied: Vec<String>,

    /// Watermark after the run, `None` when nothing is applied.
    pub current: Option<String>,
}

impl MigrationSummary {
    pub fn new(direction: Direction, current: Option<String>) -> Self {
        Self {
            direction,
            applied: vec![],
            current,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}
