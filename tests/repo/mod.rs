mod test_version_ledger;
