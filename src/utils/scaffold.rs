use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Utc};
use tera::Context;

use crate::{catalog::orderer::VERSION_FORMAT, types::Direction, utils::templates};

/// Paths of a freshly created migration pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldedMigration {
    pub version: String,
    pub up: PathBuf,
    pub down: PathBuf,
}

/// `my new table` -> `my_new_table`
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Writes `<version>_<name>.up.sql` and `.down.sql` stubs into `dir`, creating
/// it when missing. Existing files are never overwritten.
pub fn create_migration(dir: &Path, name: &str, now: DateTime<Utc>) -> Result<ScaffoldedMigration> {
    let name = normalize_name(name);
    if name.is_empty() {
        bail!("Migration name is required");
    }

    let version = now.format(VERSION_FORMAT).to_string();
    std::fs::create_dir_all(dir)
        .context(format!("Failed to create directory {}", dir.display()))?;

    let mut context = Context::new();
    context.insert("name", &name);
    context.insert("version", &version);

    let path_for = |direction: Direction| {
        dir.join(format!("{}_{}{}", version, name, direction.suffix()))
    };
    let (up, down) = (path_for(Direction::Up), path_for(Direction::Down));
    for path in [&up, &down] {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
    }

    for (path, direction) in [(&up, Direction::Up), (&down, Direction::Down)] {
        let body = templates::render(&format!("migration.{}.sql.jinja", direction), &context)?;
        std::fs::write(path, body).context(format!("Failed to write {}", path.display()))?;
    }

    Ok(ScaffoldedMigration { version, up, down })
}
