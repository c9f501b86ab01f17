use anyhow::Result;
use tidemark::{
    config::LedgerConfig, errors::MigrationError, repo::VersionLedger, types::HistoryAction,
};

use crate::common::{TestDb, table_exists};

#[tokio::test]
async fn test_ensure_schema_is_idempotent() -> Result<()> {
    let t = TestDb::new().await?;
    let ledger = VersionLedger::with_defaults(t.db.clone());

    assert!(!ledger.is_bootstrapped().await?);
    ledger.ensure_schema().await?;
    ledger.ensure_schema().await?;

    assert!(ledger.is_bootstrapped().await?);
    assert!(table_exists(&t.db, "goschema_migration_version").await?);
    assert!(table_exists(&t.db, "goschema_migration_history").await?);
    Ok(())
}

#[tokio::test]
async fn test_current_is_none_on_fresh_ledger() -> Result<()> {
    let t = TestDb::new().await?;
    let ledger = VersionLedger::with_defaults(t.db.clone());
    ledger.ensure_schema().await?;

    assert_eq!(ledger.current().await?, None);
    assert_eq!(ledger.previous().await?, None);
    assert!(ledger.versions().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_set_current_keeps_a_single_current_row() -> Result<()> {
    let t = TestDb::new().await?;
    let ledger = VersionLedger::with_defaults(t.db.clone());
    ledger.ensure_schema().await?;

    ledger.set_current("20240101000000").await?;
    ledger.set_current("20240102000000").await?;
    assert_eq!(ledger.current().await?.as_deref(), Some("20240102000000"));

    // Moving back onto a known version reuses its row.
    ledger.set_current("20240101000000").await?;
    let versions = ledger.versions().await?;
    assert_eq!(versions.len(), 2);
    assert_eq!(versions.iter().filter(|v| v.is_current).count(), 1);
    assert!(versions[0].is_current);
    assert_eq!(versions[0].version, "20240101000000");
    assert!(versions[0].created_at.is_some());
    Ok(())
}

#[tokio::test]
async fn test_clear_current() -> Result<()> {
    let t = TestDb::new().await?;
    let ledger = VersionLedger::with_defaults(t.db.clone());
    ledger.ensure_schema().await?;

    ledger.set_current("20240101000000").await?;
    ledger.clear_current().await?;

    assert_eq!(ledger.current().await?, None);
    assert_eq!(ledger.versions().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_previous_version() -> Result<()> {
    let t = TestDb::new().await?;
    let ledger = VersionLedger::with_defaults(t.db.clone());
    ledger.ensure_schema().await?;

    for version in ["20240101000000", "20240102000000", "20240103000000"] {
        ledger.set_current(version).await?;
    }

    assert_eq!(ledger.previous().await?.as_deref(), Some("20240102000000"));
    assert_eq!(
        ledger.previous_version("20240102000000").await?.as_deref(),
        Some("20240101000000")
    );
    assert_eq!(ledger.previous_version("20240101000000").await?, None);
    // A version that was never recorded still resolves against what is recorded.
    assert_eq!(
        ledger.previous_version("20240102120000").await?.as_deref(),
        Some("20240102000000")
    );
    Ok(())
}

#[tokio::test]
async fn test_history_is_newest_first() -> Result<()> {
    let t = TestDb::new().await?;
    let ledger = VersionLedger::with_defaults(t.db.clone());
    ledger.ensure_schema().await?;

    ledger
        .append_history("20240101000000", HistoryAction::MigratingUp)
        .await?;
    ledger
        .append_history("20240101000000", HistoryAction::MigratedUp)
        .await?;
    ledger
        .append_history("20240102000000", HistoryAction::Error)
        .await?;

    let history = ledger.history(None).await?;
    let actions: Vec<_> = history.iter().map(|h| h.action).collect();
    assert_eq!(
        actions,
        vec![
            HistoryAction::Error,
            HistoryAction::MigratedUp,
            HistoryAction::MigratingUp
        ]
    );
    assert!(history[0].id > history[1].id);
    assert!(history.iter().all(|h| h.created_at.is_some()));

    let limited = ledger.history(Some(1)).await?;
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].version, "20240102000000");
    Ok(())
}

#[tokio::test]
async fn test_custom_tables_and_labels() -> Result<()> {
    let t = TestDb::new().await?;
    let mut config = LedgerConfig::default();
    config.version_table = "schema_version".to_string();
    config.history_table = "schema_history".to_string();
    config.actions.migrated_up = "applied".to_string();

    let ledger = VersionLedger::new(t.db.clone(), config)?;
    ledger.ensure_schema().await?;
    ledger
        .append_history("20240101000000", HistoryAction::MigratedUp)
        .await?;

    assert!(table_exists(&t.db, "schema_version").await?);
    assert!(table_exists(&t.db, "schema_history").await?);
    assert!(!table_exists(&t.db, "goschema_migration_version").await?);

    let history = ledger.history(None).await?;
    assert_eq!(history[0].action, HistoryAction::MigratedUp);
    Ok(())
}

#[tokio::test]
async fn test_rejects_unsafe_table_name() -> Result<()> {
    let t = TestDb::new().await?;
    let mut config = LedgerConfig::default();
    config.version_table = "versions; DROP TABLE users".to_string();

    let res = VersionLedger::new(t.db.clone(), config);
    assert!(matches!(res, Err(MigrationError::Configuration(_))));
    Ok(())
}

#[tokio::test]
async fn test_history_rejects_unknown_label() -> Result<()> {
    let t = TestDb::new().await?;
    let ledger = VersionLedger::with_defaults(t.db.clone());
    ledger.ensure_schema().await?;
    ledger
        .append_history("20240101000000", HistoryAction::MigratedUp)
        .await?;

    // Same tables read with different labels: the stored value no longer maps.
    let mut config = LedgerConfig::default();
    config.actions.migrated_up = "applied".to_string();
    let relabeled = VersionLedger::new(t.db.clone(), config)?;

    let err = relabeled.history(None).await.unwrap_err();
    assert!(err.is_ledger());
    Ok(())
}
