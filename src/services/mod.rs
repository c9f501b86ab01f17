pub mod migration_runner;

pub use migration_runner::MigrationRunner;
