mod direction;
mod history_action;
mod history_entry;
mod migration_file;
mod summary;
mod version_record;

pub use direction::Direction;
pub use history_action::HistoryAction;
pub use history_entry::HistoryEntry;
pub use migration_file::MigrationFile;
pub use summary::MigrationSummary;
pub use version_record::VersionRecord;
