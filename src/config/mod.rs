pub mod database;
pub mod ledger;
pub mod log;
pub mod migrations;
pub mod settings;

pub use database::DatabaseConfig;
pub use ledger::{ActionLabels, LedgerConfig};
pub use log::LogConfig;
pub use migrations::MigrationsConfig;
pub use settings::Settings;
