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
    types::VersionRecord,
    utils::{format_timestamp, format_version},
};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the records as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "#")]
    index: String,

    #[tabled(rename = "Version")]
    version: String,

    #[tabled(rename = "Timestamp")]
    timestamp: String,

    #[tabled(rename = "Recorded At")]
    created_at: String,

    #[tabled(rename = "Current")]
    current: String,
}

pub async fn execute(args: &StatusArgs, ctx: &Context<'_>) {
    let runner = runner_or_bail(None, 0, ctx).await;
    let records = runner
        .status()
        .await
        .exit_on_err("Failed to read migration status");

    if args.json {
        let json = serde_json::to_string_pretty(&records).exit_on_err("Failed to serialize status");
        println!("{}", json);
        return;
    }

    if records.is_empty() {
        println!("No migrations recorded");
        return;
    }

    print_table(&records);
}

fn print_table(records: &[VersionRecord]) {
    let rows: Vec<VersionRow> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let version = if r.is_current {
                r.version.green().bold().to_string()
            } else {
                r.version.clone()
            };
            VersionRow {
                index: (i + 1).to_string(),
                version,
                timestamp: format_version(&r.version),
                created_at: format_timestamp(r.created_at),
                current: if r.is_current {
                    "✔".green().bold().to_string()
                } else {
                    String::new()
                },
            }
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string();
    println!("{}", table);
}
