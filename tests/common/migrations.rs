use std::path::{Path, PathBuf};

use anyhow::Result;

pub fn write_file(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Writes `<version>_<name>.up.sql` and `<version>_<name>.down.sql`.
pub fn write_migration(dir: &Path, version: &str, name: &str, up: &str, down: &str) -> Result<()> {
    write_file(dir, &format!("{}_{}.up.sql", version, name), up)?;
    write_file(dir, &format!("{}_{}.down.sql", version, name), down)?;
    Ok(())
}
