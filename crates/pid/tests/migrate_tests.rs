//! Worklist handling of the URL migration, without touching a resolver.

use std::fs;

use datahub_pid::{migrate_urls, EpicClient, MigrationOptions, MigrationOutcome};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn rows_with_a_foreign_prefix_are_skipped_before_any_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pids.csv");
    fs::write(
        &input,
        "P01C01,99.9999/P000000001C000000001\nP01C02,99.9999/P000000001C000000002\n",
    )
    .unwrap();

    // The resolver endpoint is unreachable on purpose: a prefix mismatch
    // must short-circuit before any HTTP request is made.
    let client = EpicClient::new("http://127.0.0.1:9/epic/", "21.T12996", "user", "pass");
    let options = MigrationOptions {
        input: input.clone(),
        expected_old_url: "https://old.example.org".into(),
        new_base_url: "https://new.example.org".into(),
        dry_run: true,
    };

    let outcome = migrate_urls(&client, &options).await.unwrap();
    assert_eq!(
        outcome,
        MigrationOutcome { processed: 2, updated: 0, skipped: 2, failed: 0 }
    );

    // The timestamped record files are created next to the input.
    let outputs: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name != "pids.csv")
        .collect();
    assert_eq!(outputs.len(), 2);
    assert!(outputs.iter().any(|name| name.ends_with("_original.csv")));
    assert!(outputs.iter().any(|name| name.ends_with("_changed.csv")));
}

#[tokio::test]
async fn a_missing_worklist_is_an_input_error() {
    let client = EpicClient::new("http://127.0.0.1:9/epic/", "21.T12996", "user", "pass");
    let options = MigrationOptions {
        input: "/nonexistent/pids.csv".into(),
        expected_old_url: "https://old.example.org".into(),
        new_base_url: "https://new.example.org".into(),
        dry_run: true,
    };
    assert!(migrate_urls(&client, &options).await.is_err());
}
