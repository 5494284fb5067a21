//! Batch re-pointing of registered handles onto a new platform base URL.
//!
//! The worklist is a headerless CSV of `collection,pid` rows. For every row
//! the current URL is resolved and recorded, and when it still points at the
//! old base it is rewritten onto the new scheme and host and pushed back to
//! the resolver. A failing row never aborts the batch; the outcome tally is
//! reported at the end.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono::Local;
use tracing::{error, info, warn};
use url::Url;

use crate::client::EpicClient;

#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// CSV worklist of `collection,pid` rows, no header
    pub input: PathBuf,
    /// Only URLs starting with this base are rewritten
    pub expected_old_url: String,
    /// Base URL whose scheme and host replace the old ones
    pub new_base_url: String,
    /// Resolve and record, but do not push updates
    pub dry_run: bool,
}

/// Tally of one migration run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub processed: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

fn sibling_output(input: &Path, stamp: &str, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("pids");
    input.with_file_name(format!("{stem}_{stamp}_{suffix}.csv"))
}

/// Rewrites `current` onto the scheme, host and port of `new_base`,
/// preserving path and query.
pub fn rebase_url(current: &str, new_base: &Url) -> anyhow::Result<String> {
    let mut rebased = Url::parse(current).context("current handle URL is not a valid URL")?;
    rebased
        .set_scheme(new_base.scheme())
        .map_err(|_| anyhow!("cannot set scheme '{}' on '{}'", new_base.scheme(), current))?;
    rebased
        .set_host(new_base.host_str())
        .context("cannot set new host")?;
    rebased
        .set_port(new_base.port())
        .map_err(|_| anyhow!("cannot set new port on '{}'", current))?;
    Ok(rebased.to_string())
}

/// Runs the migration over the whole worklist.
pub async fn migrate_urls(
    client: &EpicClient,
    options: &MigrationOptions,
) -> anyhow::Result<MigrationOutcome> {
    let new_base = Url::parse(&options.new_base_url).context("invalid new base URL")?;
    let stamp = Local::now().format("%m%d%y%H%M%S").to_string();
    let original_path = sibling_output(&options.input, &stamp, "original");
    let changed_path = sibling_output(&options.input, &stamp, "changed");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&options.input)
        .with_context(|| format!("failed to open {}", options.input.display()))?;
    let mut original_out =
        csv::Writer::from_path(&original_path).context("failed to create the original-URLs file")?;
    let mut changed_out =
        csv::Writer::from_path(&changed_path).context("failed to create the changed-URLs file")?;

    info!(input = %options.input.display(), dry_run = options.dry_run, "starting handle migration");

    let mut outcome = MigrationOutcome::default();
    for row in reader.records() {
        let record = row.context("failed to read the worklist")?;
        let collection = record.get(0).unwrap_or_default().to_string();
        let Some(pid) = record.get(1).map(str::to_string).filter(|pid| !pid.is_empty()) else {
            warn!(%collection, "worklist row has no pid, skipping");
            outcome.skipped += 1;
            continue;
        };
        outcome.processed += 1;
        info!(%pid, "processing handle");

        let prefix = pid.split('/').next().unwrap_or_default();
        if prefix != client.prefix() {
            warn!("Prefix mismatch between: {} and {}", prefix, client.prefix());
            outcome.skipped += 1;
            continue;
        }

        let current = match client.resolve_url(&pid).await {
            Ok(Some(url)) => url,
            Ok(None) => {
                warn!(%pid, "handle record has no URL value, skipping");
                outcome.skipped += 1;
                continue;
            }
            Err(err) => {
                error!(%pid, "handle lookup failed: {err:#}");
                outcome.failed += 1;
                continue;
            }
        };

        info!("currentURL is: {}", current);
        original_out.write_record([&collection, &pid, &current])?;
        original_out.flush()?;

        if !current.starts_with(&options.expected_old_url) {
            warn!("Update not required. Did not match on URL.");
            outcome.skipped += 1;
            continue;
        }

        let new_url = match rebase_url(&current, &new_base) {
            Ok(url) => url,
            Err(err) => {
                error!(%pid, "cannot rewrite URL: {err:#}");
                outcome.failed += 1;
                continue;
            }
        };

        changed_out.write_record([&collection, &pid, &current, &new_url])?;
        changed_out.flush()?;
        info!("New url: {}", new_url);

        if !options.dry_run {
            if let Err(err) = client.update_url(&pid, &new_url).await {
                error!(%pid, "handle update failed: {err:#}");
                outcome.failed += 1;
                continue;
            }
            info!("{} updated with success. New url is {}", pid, new_url);
        }
        outcome.updated += 1;
    }

    info!(
        processed = outcome.processed,
        updated = outcome.updated,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "handle migration finished"
    );
    Ok(outcome)
}
