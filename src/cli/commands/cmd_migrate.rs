use std::{path::PathBuf, time::Instant};

use clap::{Args, Subcommand};
use colored::Colorize;
use inquire::Confirm;
use tracing::error;

use crate::{
    cli::{
        Context,
        commands::{
            ExitOnErr,
            shared::{new_spinner, runner_or_bail, spinner_reporter},
        },
    },
    types::{Direction, MigrationSummary},
    utils::{format_duration, validate_dir},
};

#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Maximum number of migrations to run, 0 runs all eligible
    #[arg(short, long, default_value_t = 0)]
    pub steps: usize,

    /// Directory holding the migration scripts, defaults to the configured location
    #[arg(long, value_name = "DIR", value_parser = validate_dir)]
    pub loc: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum MigrateCommands {
    /// Apply pending migrations, oldest first
    Up(MigrateArgs),

    /// Revert applied migrations, newest first
    Down {
        #[command(flatten)]
        args: MigrateArgs,

        /// Skip the confirmation prompt
        #[arg(short, long, default_value_t = false)]
        yes: bool,
    },
}

pub async fn execute(action: &MigrateCommands, ctx: &Context<'_>) {
    match action {
        MigrateCommands::Up(args) => migrate(Direction::Up, args, ctx).await,
        MigrateCommands::Down { args, yes } => {
            if !*yes && !confirm_down(args.steps) {
                println!("Exiting...");
                return;
            }
            migrate(Direction::Down, args, ctx).await
        }
    }
}

fn confirm_down(steps: usize) -> bool {
    let question = if steps == 0 {
        "Revert ALL applied migrations?".to_string()
    } else {
        format!("Revert up to {} migration(s)?", steps)
    };

    Confirm::new(&question)
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

async fn migrate(direction: Direction, args: &MigrateArgs, ctx: &Context<'_>) {
    let runner = runner_or_bail(args.loc.as_ref(), args.steps, ctx).await;

    let spinner = new_spinner(format!("Migrating {}...", direction));
    let runner = runner.with_progress(spinner_reporter(&spinner));

    let started = Instant::now();
    let res = match direction {
        Direction::Up => runner.migrate_up().await,
        Direction::Down => runner.migrate_down().await,
    };
    spinner.finish_and_clear();

    if let Err(e) = &res {
        error!("Migration {} failed: {}", direction, e);
    }
    let summary = res.exit_on_err(&format!("Failed to migrate {}", direction));
    print_summary(&summary, started.elapsed());
}

fn print_summary(summary: &MigrationSummary, elapsed: std::time::Duration) {
    if summary.is_empty() {
        println!("✅ Nothing to migrate {}", summary.direction);
    } else {
        for version in &summary.applied {
            println!("  {} {}", "•".green(), version);
        }
        println!(
            "✅ Migrated {} {} migration(s) in {}",
            summary.direction,
            summary.applied.len(),
            format_duration(elapsed)
        );
    }

    match &summary.current {
        Some(current) => println!("Current version: {}", current.bold()),
        None => println!("Current version: {}", "none".dimmed()),
    }
}
