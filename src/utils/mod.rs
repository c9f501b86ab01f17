pub mod fs;
pub mod init;
pub mod logger;
pub mod progress;
pub mod scaffold;
pub mod templates;
pub mod time;

pub use fs::validate_dir;
pub use progress::ProgressReporter;
pub use scaffold::{ScaffoldedMigration, create_migration};
pub use time::{format_duration, format_timestamp, format_version};
