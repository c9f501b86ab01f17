use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use crate::{
    cli::{Context, commands::ExitOnErr},
    utils::create_migration,
};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Migration name, spaces become underscores
    #[arg(short, long, required = true)]
    pub name: String,

    /// Output directory, created when missing. Defaults to the configured location
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

pub async fn execute(args: &CreateArgs, ctx: &Context<'_>) {
    let dir = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.settings.migrations.location));

    let created = create_migration(&dir, &args.name, Utc::now())
        .exit_on_err("Failed to create migration");

    println!("✅ Created migration {}", created.version);
    println!("  {}", created.up.display());
    println!("  {}", created.down.display());
}
