pub mod cmd_config;
pub mod cmd_create;
pub mod cmd_history;
pub mod cmd_init;
pub mod cmd_migrate;
pub mod cmd_status;
pub mod cmd_version;
pub mod shared;

use clap::Subcommand;

use crate::cli::commands::{
    cmd_create::CreateArgs, cmd_history::HistoryArgs, cmd_init::InitCommands,
    cmd_migrate::MigrateCommands, cmd_status::StatusArgs, cmd_version::VersionCommand,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply or revert migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },

    /// List recorded versions and the current one
    Status(StatusArgs),

    /// Show the migration audit trail, newest first
    History(HistoryArgs),

    /// Create a new up/down migration pair
    Create(CreateArgs),

    /// Initialize application
    Init {
        #[command(subcommand)]
        action: InitCommands,
    },

    /// Print version
    Version(VersionCommand),

    /// Print the effective configuration
    Config,
}

pub trait ExitOnErr<T> {
    fn exit_on_err(self, msg: &str) -> T;
}

impl<T, E: std::fmt::Display> ExitOnErr<T> for Result<T, E> {
    fn exit_on_err(self, msg: &str) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("❌ {}: {}", msg, e);
                std::process::exit(1);
            }
        }
    }
}
