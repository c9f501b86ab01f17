use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::{
    cli::{Context, commands::ExitOnErr},
    db::init_db,
    services::MigrationRunner,
    utils::ProgressReporter,
};

/// Connects to the configured database and builds a runner over `location`,
/// falling back to the configured migrations directory.
pub async fn runner_or_bail(
    location: Option<&PathBuf>,
    steps: usize,
    ctx: &Context<'_>,
) -> MigrationRunner {
    let db = init_db(ctx.settings)
        .await
        .exit_on_err("Failed to connect to database");

    let location = location
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&ctx.settings.migrations.location));

    MigrationRunner::with_ledger_config(db, location, steps, ctx.settings.ledger.clone())
        .exit_on_err("Invalid ledger configuration")
}

pub fn new_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message);
    spinner
}

/// Reporter whose messages are mirrored onto `spinner`.
pub fn spinner_reporter(spinner: &ProgressBar) -> ProgressReporter {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let spinner = spinner.clone();
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            spinner.set_message(msg);
        }
    });
    ProgressReporter::new(Some(tx))
}
