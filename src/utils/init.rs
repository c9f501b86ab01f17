use anyhow::Result;
use tera::Context;

use crate::{config::Settings, utils::templates};

/// Contents of a starter `.env`, seeded from the current settings.
pub fn get_env_file_with_defaults(settings: &Settings) -> Result<String> {
    let mut context = Context::new();
    context.insert("location", &settings.migrations.location);
    context.insert("version_table", &settings.ledger.version_table);
    context.insert("history_table", &settings.ledger.history_table);

    templates::render("env.default.jinja", &context)
}
