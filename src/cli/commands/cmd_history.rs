use clap::Args;
use colored::Colorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::{
    cli::{
        Context,
        commands::{ExitOnErr, shared::runner_or_bail},
    },
    types::HistoryEntry,
    utils::format_timestamp,
};

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of entries to show, newest first
    #[arg(short, long)]
    pub limit: Option<u64>,

    /// Print the entries as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Version")]
    version: String,

    #[tabled(rename = "Action")]
    action: String,

    #[tabled(rename = "At")]
    created_at: String,
}

pub async fn execute(args: &HistoryArgs, ctx: &Context<'_>) {
    let runner = runner_or_bail(None, 0, ctx).await;
    let entries = runner
        .history(args.limit)
        .await
        .exit_on_err("Failed to read migration history");

    if args.json {
        let json =
            serde_json::to_string_pretty(&entries).exit_on_err("Failed to serialize history");
        println!("{}", json);
        return;
    }

    if entries.is_empty() {
        println!("No migration history");
        return;
    }

    print_table(&entries);
}

fn print_table(entries: &[HistoryEntry]) {
    let rows: Vec<HistoryRow> = entries
        .iter()
        .map(|e| {
            // Dim transition rows so outcomes stand out.
            let version = if e.action.is_terminal() {
                e.version.clone()
            } else {
                e.version.dimmed().to_string()
            };
            HistoryRow {
                id: e.id.to_string(),
                version,
                action: e.action.to_colored_string(),
                created_at: format_timestamp(e.created_at),
            }
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();
    println!("{}", table);
}
