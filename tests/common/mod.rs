pub mod migrations;

pub use db::{TestDb, table_exists};
pub use migrations::{write_file, write_migration};
