//! Reconciliation of a remote secret store against a local secret file.
//!
//! The local file is the source of truth. A sync lists the remote, parses
//! the file, deletes what the file no longer names (when asked to) and then
//! puts every desired secret. The first failing call aborts the run; nothing
//! already deleted or put is rolled back.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::constants;
use crate::core::env::{DesiredSecrets, EnvFile};
use crate::core::plan::Plan;
use crate::core::remote::SecretStore;
use crate::error::Result;

/// Inputs of a sync besides the store itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Local secret file.
    pub env_file: PathBuf,
    /// Delete remote secrets the file does not name.
    pub delete_missing: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(constants::ENV_FILE),
            delete_missing: true,
        }
    }
}

/// What a completed sync did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Deleted names, in call order.
    pub deleted: Vec<String>,
    /// Put names, in call order.
    pub put: Vec<String>,
}

/// Converge `store` to the secrets in `options.env_file`.
///
/// Every desired secret is re-sealed and re-sent on every run.
///
/// # Errors
///
/// Returns the first error from reading the file or from any remote call.
pub fn sync_secrets<S: SecretStore>(store: &mut S, options: &SyncOptions) -> Result<SyncReport> {
    let (plan, desired) = plan_sync(store, options)?;
    apply(store, &plan, &desired)
}

/// List the remote, read the file and compute the plan without writing.
///
/// # Errors
///
/// Returns error if listing fails or the file cannot be read.
pub fn plan_sync<S: SecretStore>(
    store: &mut S,
    options: &SyncOptions,
) -> Result<(Plan, DesiredSecrets)> {
    let remote = store.list_secrets()?;

    let env = EnvFile::load(&options.env_file)?;
    for key in env.bare_keys() {
        debug!(key, "skipping key without a value");
    }
    let desired = env.into_desired();

    let plan = Plan::compute(
        remote.iter().map(|s| s.name.as_str()),
        &desired,
        options.delete_missing,
    );

    debug!(
        remote = remote.len(),
        desired = desired.len(),
        deletes = plan.deletes().count(),
        puts = plan.puts().count(),
        "sync planned"
    );

    Ok((plan, desired))
}

/// Execute a plan: deletes first, then puts.
///
/// # Errors
///
/// Stops at the first failing call.
pub fn apply<S: SecretStore>(
    store: &mut S,
    plan: &Plan,
    desired: &DesiredSecrets,
) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    for name in plan.deletes() {
        info!(name, "deleting secret");
        store.delete_secret(name)?;
        report.deleted.push(name.to_string());
    }

    for name in plan.puts() {
        let Some(value) = desired.get(name) else {
            continue;
        };
        info!(name, "putting secret");
        store.put_secret(name, value)?;
        report.put.push(name.to_string());
    }

    Ok(report)
}
