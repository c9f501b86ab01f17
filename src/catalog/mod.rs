//! Discovery of migration scripts on disk.

pub mod file_catalog;
pub mod orderer;

pub use file_catalog::CatalogEntry;

use std::path::Path;

use crate::{errors::Result, types::{Direction, MigrationFile}};

/// Lists `location`, keeps the scripts for `direction` and returns them
/// ascending by version.
pub fn discover(location: &Path, direction: Direction) -> Result<Vec<MigrationFile>> {
    let entries = file_catalog::list(location)?;
    let entries = file_catalog::filter(entries, direction.suffix());
    orderer::sort(entries, direction)
}
