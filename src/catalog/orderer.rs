use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::{
    catalog::CatalogEntry,
    errors::{MigrationError, Result},
    types::{Direction, MigrationFile},
};

/// chrono format of the version token.
pub const VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

const VERSION_LEN: usize = 14;

/// Returns the token preceding the first underscore of `file_name`.
pub fn parse(file_name: &str) -> Result<&str> {
    match file_name.split_once('_') {
        Some((prefix, _)) => Ok(prefix),
        None => Err(MigrationError::MalformedFilename(file_name.to_string())),
    }
}

/// Checks that `version` is a real fixed-width UTC timestamp.
///
/// The width check matters: chrono alone accepts unpadded fields, and the
/// watermark comparisons rely on plain string ordering.
pub fn parse_version(source_name: &str, version: &str) -> Result<NaiveDateTime> {
    let malformed = || MigrationError::MalformedTimestamp {
        source_name: source_name.to_string(),
        timestamp: version.to_string(),
    };

    if version.len() != VERSION_LEN || !version.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    NaiveDateTime::parse_from_str(version, VERSION_FORMAT).map_err(|_| malformed())
}

fn to_migration_file(entry: CatalogEntry, direction: Direction) -> Result<MigrationFile> {
    let version = parse(&entry.file_name)?.to_string();
    let timestamp = parse_version(&entry.file_name, &version)?;

    let rest = &entry.file_name[version.len() + 1..];
    let name = rest[..rest.len().saturating_sub(direction.suffix().len())].to_string();

    Ok(MigrationFile {
        file_name: entry.file_name,
        version,
        timestamp,
        name,
        direction,
        path: entry.path,
    })
}

/// Parses every entry and returns them ascending by version. Entries sharing a
/// version are ordered by filename.
///
/// Entries are expected to be pre-filtered to `direction`'s suffix.
pub fn sort(entries: Vec<CatalogEntry>, direction: Direction) -> Result<Vec<MigrationFile>> {
    let files: Vec<MigrationFile> = entries
        .into_iter()
        .map(|e| to_migration_file(e, direction))
        .collect::<Result<_>>()?;

    Ok(files
        .into_iter()
        .sorted_by(|a, b| {
            a.version
                .cmp(&b.version)
                .then_with(|| a.file_name.cmp(&b.file_name))
        })
        .collect())
}
