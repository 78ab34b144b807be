//! Sync command - make the repository's secrets match the local file.

use tracing::info;

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::plan::{Action, Plan};
use crate::core::sync::{self, SyncOptions};
use crate::error::Result;

/// Run a sync, or print the plan when `dry_run` is set.
pub fn execute(settings: &Settings, options: &SyncOptions, dry_run: bool) -> Result<()> {
    info!(
        target_repo = %settings.target,
        env_file = %options.env_file.display(),
        delete_missing = options.delete_missing,
        dry_run,
        "running sync"
    );

    let mut client = settings.client()?;

    if dry_run {
        let (plan, _) = sync::plan_sync(&mut client, options)?;
        print_plan(&plan);
        return Ok(());
    }

    let report = sync::sync_secrets(&mut client, options)?;

    output::success(&format!(
        "synced {} to {} ({} put, {} deleted)",
        options.env_file.display(),
        settings.target,
        report.put.len(),
        report.deleted.len()
    ));

    Ok(())
}

fn print_plan(plan: &Plan) {
    if plan.is_empty() {
        output::dimmed("nothing to sync");
        return;
    }

    output::header("Plan");
    for entry in plan.entries() {
        let marker = match entry.action() {
            Action::Create => '+',
            Action::Update => '~',
            Action::Delete => '-',
            Action::Keep => '=',
        };
        output::action(marker, entry.name(), entry.action().label());
    }

    output::warn(&format!(
        "dry run: would put {}, delete {}",
        plan.puts().count(),
        plan.deletes().count()
    ));
}
