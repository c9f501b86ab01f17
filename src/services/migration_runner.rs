use std::{collections::HashSet, path::PathBuf};

use itertools::Itertools;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use tracing::{debug, error, info, warn};

use crate::{
    catalog::{self, orderer},
    config::LedgerConfig,
    errors::{MigrationError, Result},
    repo::VersionLedger,
    types::{
        Direction, HistoryAction, HistoryEntry, MigrationFile, MigrationSummary, VersionRecord,
    },
    utils::ProgressReporter,
};

/// Applies or reverts the scripts of one migration directory against one
/// database, one transaction per version, strictly in order.
///
/// There is no locking: two runners pointed at the same database can race on
/// the version table.
pub struct MigrationRunner {
    db: DatabaseConnection,
    ledger: VersionLedger,
    location: PathBuf,
    /// Maximum files per run, 0 for no limit.
    steps: usize,
    progress: ProgressReporter,
}

impl MigrationRunner {
    pub fn new(db: DatabaseConnection, location: impl Into<PathBuf>, steps: usize) -> Self {
        Self {
            ledger: VersionLedger::with_defaults(db.clone()),
            db,
            location: location.into(),
            steps,
            progress: ProgressReporter::new(None),
        }
    }

    /// Same as [`MigrationRunner::new`] with custom ledger table names and labels.
    pub fn with_ledger_config(
        db: DatabaseConnection,
        location: impl Into<PathBuf>,
        steps: usize,
        config: LedgerConfig,
    ) -> Result<Self> {
        Ok(Self {
            ledger: VersionLedger::new(db.clone(), config)?,
            db,
            location: location.into(),
            steps,
            progress: ProgressReporter::new(None),
        })
    }

    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    pub fn ledger(&self) -> &VersionLedger {
        &self.ledger
    }

    fn budget(&self) -> usize {
        if self.steps == 0 {
            usize::MAX
        } else {
            self.steps
        }
    }

    /// The watermark, checked to be a well formed version.
    pub async fn current_version(&self) -> Result<Option<String>> {
        let current = self.ledger.current().await?;
        if let Some(version) = &current {
            orderer::parse_version(&self.ledger.config().version_table, version)?;
        }
        Ok(current)
    }

    /// Applies, ascending, the up scripts newer than the watermark.
    pub async fn migrate_up(&self) -> Result<MigrationSummary> {
        self.ledger.ensure_schema().await?;

        let files = catalog::discover(&self.location, Direction::Up)?;
        let current = self.current_version().await?;
        let mut summary = MigrationSummary::new(Direction::Up, current.clone());

        if files.is_empty() {
            info!("No files to migrate up in {}", self.location.display());
            return Ok(summary);
        }

        let recorded = self.recorded_versions().await?;
        let steps = group_by_version(select_up(files, current.as_deref(), &recorded));
        if steps.is_empty() {
            info!("Database is up to date");
            return Ok(summary);
        }

        for step in steps.iter().take(self.budget()) {
            summary.current = self.apply(step).await?;
            summary.applied.push(step[0].version.clone());
        }

        info!(
            "Migrated up {} of {} pending migration(s)",
            summary.applied.len(),
            steps.len()
        );
        Ok(summary)
    }

    /// Reverts, descending, the down scripts at or below the watermark.
    pub async fn migrate_down(&self) -> Result<MigrationSummary> {
        self.ledger.ensure_schema().await?;

        let mut files = catalog::discover(&self.location, Direction::Down)?;
        files.reverse();

        let current = self.current_version().await?;
        let mut summary = MigrationSummary::new(Direction::Down, current.clone());

        let Some(current) = current else {
            info!("No current version, nothing to migrate down");
            return Ok(summary);
        };

        let recorded = self.recorded_versions().await?;
        let steps = group_by_version(select_down(files, &current, &recorded));
        for step in steps.iter().take(self.budget()) {
            summary.current = self.apply(step).await?;
            summary.applied.push(step[0].version.clone());
        }

        info!("Migrated down {} migration(s)", summary.applied.len());
        Ok(summary)
    }

    /// Every recorded version with its current flag. Never creates the ledger.
    pub async fn status(&self) -> Result<Vec<VersionRecord>> {
        if !self.ledger.is_bootstrapped().await? {
            return Ok(vec![]);
        }
        self.ledger.versions().await
    }

    /// Audit trail, newest first. Never creates the ledger.
    pub async fn history(&self, limit: Option<u64>) -> Result<Vec<HistoryEntry>> {
        if !self.ledger.is_bootstrapped().await? {
            return Ok(vec![]);
        }
        self.ledger.history(limit).await
    }

    async fn recorded_versions(&self) -> Result<HashSet<String>> {
        Ok(self
            .ledger
            .versions()
            .await?
            .into_iter()
            .map(|v| v.version)
            .collect())
    }

    /// Runs the scripts of one version in a single transaction and moves the
    /// watermark. Returns the watermark after the step.
    async fn apply(&self, step: &[MigrationFile]) -> Result<Option<String>> {
        let Some(first) = step.first() else {
            return self.ledger.current().await;
        };
        let version = first.version.as_str();
        let direction = first.direction;

        let transitioning = match direction {
            Direction::Up => HistoryAction::MigratingUp,
            Direction::Down => HistoryAction::MigratingDown,
        };
        self.ledger.append_history(version, transitioning).await?;

        let mut scripts = Vec::with_capacity(step.len());
        for file in step {
            match file.read_contents() {
                Ok(sql) => scripts.push((file, sql)),
                Err(e) => {
                    error!("Failed to read {}: {}", file.path.display(), e);
                    self.ledger
                        .append_history(version, HistoryAction::Error)
                        .await?;
                    return Err(MigrationError::io(&file.path, e));
                }
            }
        }

        let txn = match self.db.begin().await {
            Ok(txn) => txn,
            Err(source) => {
                error!("Failed to open a transaction for {}: {}", version, source);
                self.ledger
                    .append_history(version, HistoryAction::Error)
                    .await?;
                return Err(MigrationError::Transaction {
                    version: version.to_string(),
                    source,
                });
            }
        };

        for (file, sql) in &scripts {
            debug!("Migrating {} {}", direction, file.file_name);
            self.progress
                .report(format!("Migrating {} {}...", direction, file.file_name));

            if sql.trim().is_empty() {
                warn!("{} is empty, recording it without executing", file.file_name);
            } else if let Err(e) = txn.execute_unprepared(sql).await {
                if let Err(rollback_err) = txn.rollback().await {
                    error!(
                        "Failed to roll back {}: {}",
                        file.file_name, rollback_err
                    );
                }
                return self.fail(file, e).await;
            }
        }

        if let Err(e) = txn.commit().await {
            let last = scripts.last().map(|(f, _)| *f).unwrap_or(first);
            return self.fail(last, e).await;
        }

        let current = match direction {
            Direction::Up => {
                self.ledger.set_current(version).await?;
                self.ledger
                    .append_history(version, HistoryAction::MigratedUp)
                    .await?;
                Some(version.to_string())
            }
            Direction::Down => {
                let previous = self.ledger.previous_version(version).await?;
                match &previous {
                    Some(previous) => self.ledger.set_current(previous).await?,
                    None => self.ledger.clear_current().await?,
                }
                self.ledger
                    .append_history(version, HistoryAction::MigratedDown)
                    .await?;
                previous
            }
        };

        for file in step {
            info!("Migrated {} {}", direction, file.file_name);
        }
        Ok(current)
    }

    /// Records the failure and turns it into the error that aborts the run.
    /// Runs after the transaction is gone so the audit write cannot block on it.
    async fn fail<T>(&self, file: &MigrationFile, source: DbErr) -> Result<T> {
        error!(
            "Failed to migrate {} {}: {}",
            file.direction, file.file_name, source
        );
        self.ledger
            .append_history(&file.version, HistoryAction::Error)
            .await?;

        Err(MigrationError::Execution {
            file: file.file_name.clone(),
            direction: file.direction,
            source,
        })
    }
}

/// Up scripts strictly newer than the watermark, ascending. Older scripts that
/// were never recorded are reported and left alone.
fn select_up(
    files: Vec<MigrationFile>,
    current: Option<&str>,
    recorded: &HashSet<String>,
) -> Vec<MigrationFile> {
    let Some(current) = current else {
        return files;
    };

    files
        .into_iter()
        .filter(|f| {
            if f.version.as_str() > current {
                return true;
            }
            if !recorded.contains(&f.version) {
                warn!(
                    "Skipping {}: older than current version {} but never applied",
                    f.file_name, current
                );
            }
            false
        })
        .collect()
}

/// Down scripts at or below the watermark, keeping the given (descending) order.
/// Scripts whose version was never applied still run and are reported.
fn select_down(
    files: Vec<MigrationFile>,
    current: &str,
    recorded: &HashSet<String>,
) -> Vec<MigrationFile> {
    files
        .into_iter()
        .filter(|f| f.version.as_str() <= current)
        .inspect(|f| {
            if !recorded.contains(&f.version) {
                warn!(
                    "Reverting {}: version {} was never recorded as applied",
                    f.file_name, f.version
                );
            }
        })
        .collect()
}

/// Splits sorted files into runs sharing one version. Each run is a single
/// step: one transaction, one watermark move.
fn group_by_version(files: Vec<MigrationFile>) -> Vec<Vec<MigrationFile>> {
    let chunks = files.into_iter().chunk_by(|f| f.version.clone());
    chunks
        .into_iter()
        .map(|(_, group)| group.collect())
        .collect()
}
