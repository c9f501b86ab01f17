mod commands;

use clap::Parser;
use colored::Colorize;

use crate::cli::commands::{
    Commands, cmd_config, cmd_create, cmd_history, cmd_init, cmd_migrate, cmd_status, cmd_version,
};
use crate::config::Settings;

pub struct Context<'a> {
    pub settings: &'a Settings,
}

#[derive(Parser, Debug)]
#[command(
    name = "tidemark",
    about = "Tidemark schema migration runner",
    long_about = format!(
r#"{} - {}"#,
"TIDEMARK".cyan().bold(),
"Applies and reverts timestamped SQL migrations, one transaction per file."
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub async fn execute(&self, ctx: &Context<'_>) {
        match &self.command {
            Some(Commands::Migrate { action }) => cmd_migrate::execute(action, ctx).await,
            Some(Commands::Status(args)) => cmd_status::execute(args, ctx).await,
            Some(Commands::History(args)) => cmd_history::execute(args, ctx).await,
            Some(Commands::Create(args)) => cmd_create::execute(args, ctx).await,
            Some(Commands::Init { action }) => cmd_init::execute(action, ctx).await,
            Some(Commands::Version(action)) => cmd_version::execute(action, ctx.settings).await,
            Some(Commands::Config) => cmd_config::execute(ctx.settings).await,
            None => {
                eprintln!("No command given, run with --help to list commands");
                std::process::exit(2);
            }
        }
    }
}
