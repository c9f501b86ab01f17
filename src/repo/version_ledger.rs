use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, QueryResult, Statement, TransactionTrait, Value,
};
use tracing::{debug, info};

use crate::{
    config::LedgerConfig,
    errors::{MigrationError, Result},
    types::{HistoryAction, HistoryEntry, VersionRecord},
};

/// Bookkeeping for applied migrations: a version table holding the watermark
/// and an append-only history table.
///
/// The ledger owns the layout of both tables but only shares the caller's
/// connection pool. Statements are written for SQLite.
pub struct VersionLedger {
    db: DatabaseConnection,
    config: LedgerConfig,
}

impl VersionLedger {
    pub fn new(db: DatabaseConnection, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { db, config })
    }

    /// Ledger with the stock table names and action labels.
    pub fn with_defaults(db: DatabaseConnection) -> Self {
        Self {
            db,
            config: LedgerConfig::default(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn statement<I>(&self, sql: impl Into<String>, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        let row = self
            .db
            .query_one_raw(self.statement(
                "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?",
                [table.into()],
            ))
            .await
            .map_err(|e| MigrationError::ledger("look up ledger tables", e))?;

        let count: i64 = match row {
            Some(row) => row
                .try_get("", "count")
                .map_err(|e| MigrationError::ledger("look up ledger tables", e))?,
            None => 0,
        };
        Ok(count > 0)
    }

    /// True once both tables exist.
    pub async fn is_bootstrapped(&self) -> Result<bool> {
        Ok(self.table_exists(&self.config.version_table).await?
            && self.table_exists(&self.config.history_table).await?)
    }

    /// Creates whichever of the two tables is missing. Safe to call on every run.
    pub async fn ensure_schema(&self) -> Result<()> {
        if !self.table_exists(&self.config.version_table).await? {
            info!("Creating version table '{}'", self.config.version_table);
            let sql = format!(
                r#"CREATE TABLE {} (
                    version VARCHAR(255) NOT NULL PRIMARY KEY,
                    is_current BOOLEAN NOT NULL DEFAULT 0,
                    created_at TIMESTAMP
                )"#,
                self.config.version_table
            );
            self.db
                .execute_unprepared(&sql)
                .await
                .map_err(|e| MigrationError::ledger("create the version table", e))?;
        }

        if !self.table_exists(&self.config.history_table).await? {
            info!("Creating history table '{}'", self.config.history_table);
            let sql = format!(
                r#"CREATE TABLE {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    version VARCHAR(255) NOT NULL,
                    action TEXT NOT NULL CHECK (action IN ({})),
                    created_at TIMESTAMP
                )"#,
                self.config.history_table,
                self.config.actions.sql_list()
            );
            self.db
                .execute_unprepared(&sql)
                .await
                .map_err(|e| MigrationError::ledger("create the history table", e))?;
        }

        Ok(())
    }

    /// The watermark. `None` means nothing is applied, which is not an error.
    pub async fn current(&self) -> Result<Option<String>> {
        let sql = format!(
            "SELECT version FROM {} WHERE is_current = 1 ORDER BY version DESC LIMIT 1",
            self.config.version_table
        );
        let row = self
            .db
            .query_one_raw(self.statement(sql, []))
            .await
            .map_err(|e| MigrationError::ledger("read the current version", e))?;

        row.map(|r| r.try_get::<String>("", "version"))
            .transpose()
            .map_err(|e| MigrationError::ledger("read the current version", e))
    }

    /// Moves the watermark to `version`, recording the version if it is new.
    pub async fn set_current(&self, version: &str) -> Result<()> {
        let op = "set the current version";
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MigrationError::ledger(op, e))?;

        txn.execute_raw(self.statement(
            format!(
                "UPDATE {} SET is_current = 0 WHERE is_current = 1",
                self.config.version_table
            ),
            [],
        ))
        .await
        .map_err(|e| MigrationError::ledger(op, e))?;

        txn.execute_raw(self.statement(
            format!(
                r#"INSERT INTO {} (version, is_current, created_at) VALUES (?, 1, ?)
                ON CONFLICT(version) DO UPDATE SET is_current = 1"#,
                self.config.version_table
            ),
            [version.into(), Utc::now().naive_utc().into()],
        ))
        .await
        .map_err(|e| MigrationError::ledger(op, e))?;

        txn.commit().await.map_err(|e| MigrationError::ledger(op, e))?;
        debug!("Current version set to {}", version);
        Ok(())
    }

    /// Leaves no version current. Used after reverting the earliest migration.
    pub async fn clear_current(&self) -> Result<()> {
        self.db
            .execute_raw(self.statement(
                format!(
                    "UPDATE {} SET is_current = 0 WHERE is_current = 1",
                    self.config.version_table
                ),
                [],
            ))
            .await
            .map_err(|e| MigrationError::ledger("clear the current version", e))?;
        debug!("Current version cleared");
        Ok(())
    }

    /// Greatest recorded version strictly below `version`.
    pub async fn previous_version(&self, version: &str) -> Result<Option<String>> {
        let sql = format!(
            "SELECT version FROM {} WHERE version < ? ORDER BY version DESC LIMIT 1",
            self.config.version_table
        );
        let row = self
            .db
            .query_one_raw(self.statement(sql, [version.into()]))
            .await
            .map_err(|e| MigrationError::ledger("read the previous version", e))?;

        row.map(|r| r.try_get::<String>("", "version"))
            .transpose()
            .map_err(|e| MigrationError::ledger("read the previous version", e))
    }

    /// Version preceding the watermark, `None` when there is no watermark or
    /// nothing below it.
    pub async fn previous(&self) -> Result<Option<String>> {
        match self.current().await? {
            Some(current) => self.previous_version(&current).await,
            None => Ok(None),
        }
    }

    /// Inserts one audit row. Callers must abort when this fails.
    pub async fn append_history(&self, version: &str, action: HistoryAction) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (version, action, created_at) VALUES (?, ?, ?)",
            self.config.history_table
        );
        self.db
            .execute_raw(self.statement(
                sql,
                [
                    version.into(),
                    self.config.actions.label(action).into(),
                    Utc::now().naive_utc().into(),
                ],
            ))
            .await
            .map_err(|e| MigrationError::ledger("append history", e))?;
        debug!("History: {} {}", version, action);
        Ok(())
    }

    /// Every recorded version, ascending.
    pub async fn versions(&self) -> Result<Vec<VersionRecord>> {
        let op = "list versions";
        let sql = format!(
            "SELECT version, is_current, created_at FROM {} ORDER BY version ASC",
            self.config.version_table
        );
        let rows = self
            .db
            .query_all_raw(self.statement(sql, []))
            .await
            .map_err(|e| MigrationError::ledger(op, e))?;

        rows.iter()
            .map(to_version_record)
            .collect::<std::result::Result<_, DbErr>>()
            .map_err(|e| MigrationError::ledger(op, e))
    }

    /// History rows, newest first.
    pub async fn history(&self, limit: Option<u64>) -> Result<Vec<HistoryEntry>> {
        let op = "list history";
        let mut sql = format!(
            "SELECT id, version, action, created_at FROM {} ORDER BY id DESC",
            self.config.history_table
        );
        let mut values: Vec<Value> = vec![];
        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            values.push((limit as i64).into());
        }

        let rows = self
            .db
            .query_all_raw(self.statement(sql, values))
            .await
            .map_err(|e| MigrationError::ledger(op, e))?;

        rows.iter()
            .map(|row| self.to_history_entry(row))
            .collect::<std::result::Result<_, DbErr>>()
            .map_err(|e| MigrationError::ledger(op, e))
    }

    fn to_history_entry(&self, row: &QueryResult) -> std::result::Result<HistoryEntry, DbErr> {
        let label: String = row.try_get("", "action")?;
        let action = self
            .config
            .actions
            .action(&label)
            .ok_or_else(|| DbErr::Custom(format!("Unknown history action '{}'", label)))?;

        Ok(HistoryEntry {
            id: row.try_get("", "id")?,
            version: row.try_get("", "version")?,
            action,
            created_at: row.try_get::<Option<NaiveDateTime>>("", "created_at")?,
        })
    }
}

fn to_version_record(row: &QueryResult) -> std::result::Result<VersionRecord, DbErr> {
    Ok(VersionRecord {
        version: row.try_get("", "version")?,
        is_current: row.try_get("", "is_current")?,
        created_at: row.try_get::<Option<NaiveDateTime>>("", "created_at")?,
    })
}
