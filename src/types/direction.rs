use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which half of a migration pair a run executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Filename suffix of the scripts for this direction, e.g. `.up.sql`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::Up => ".up.sql",
            Direction::Down => ".down.sql",
        }
    }
}
