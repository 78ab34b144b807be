//! Sync plan.
//!
//! The comparison between remote secret names and the local desired set,
//! turned into the ordered list of calls that converges the remote.

use std::collections::HashSet;

use crate::core::env::DesiredSecrets;

/// What a sync does to a single secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Local only: put creates it.
    Create,
    /// Both sides: put overwrites it. Remote values are unreadable, so this
    /// is never skipped.
    Update,
    /// Remote only, `delete_missing` set.
    Delete,
    /// Remote only, `delete_missing` unset: left alone.
    Keep,
}

impl Action {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Keep => "keep",
        }
    }
}

/// A single planned step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    name: String,
    action: Action,
}

impl PlanEntry {
    pub fn new(name: impl Into<String>, action: Action) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// The secret name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Whether applying this entry sends a put.
    pub fn is_put(&self) -> bool {
        matches!(self.action, Action::Create | Action::Update)
    }
}

/// The full plan: deletes in remote listing order, then puts in file order,
/// then untouched remote secrets.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    entries: Vec<PlanEntry>,
}

impl Plan {
    /// Compute the plan.
    ///
    /// # Arguments
    ///
    /// * `remote` - Remote secret names in listing order
    /// * `desired` - The local desired set
    /// * `delete_missing` - Whether remote-only secrets are deleted
    pub fn compute<'a>(
        remote: impl IntoIterator<Item = &'a str>,
        desired: &DesiredSecrets,
        delete_missing: bool,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut remote_only = Vec::new();

        for name in remote {
            if seen.insert(name) && !desired.contains(name) {
                remote_only.push(name);
            }
        }

        let mut entries = Vec::with_capacity(remote_only.len() + desired.len());

        if delete_missing {
            entries.extend(
                remote_only
                    .iter()
                    .map(|name| PlanEntry::new(*name, Action::Delete)),
            );
        }

        entries.extend(desired.names().map(|name| {
            let action = if seen.contains(name) {
                Action::Update
            } else {
                Action::Create
            };
            PlanEntry::new(name, action)
        }));

        if !delete_missing {
            entries.extend(
                remote_only
                    .iter()
                    .map(|name| PlanEntry::new(*name, Action::Keep)),
            );
        }

        Self { entries }
    }

    /// All entries.
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Names to delete, in order.
    pub fn deletes(&self) -> impl Iterator<Item = &str> {
        self.by_action(Action::Delete)
    }

    /// Names to put (create or update), in order.
    pub fn puts(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.is_put())
            .map(|e| e.name.as_str())
    }

    /// Remote names left untouched.
    pub fn kept(&self) -> impl Iterator<Item = &str> {
        self.by_action(Action::Keep)
    }

    fn by_action(&self, action: Action) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.action == action)
            .map(|e| e.name.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
