pub mod version_ledger;

pub use version_ledger::VersionLedger;
