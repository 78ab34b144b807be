//! ghsync - sync a local .env file into GitHub Actions repository secrets.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── sync          # Reconcile remote with the local file
//! │   ├── list          # List remote secret names
//! │   ├── secrets       # Put or delete a single secret
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .ghsync.toml and override resolution
//!     ├── cipher        # Sealed-box encryption
//!     ├── env           # Local secret file parsing
//!     ├── remote/       # Secret store trait and GitHub client
//!     ├── plan          # Remote vs local comparison
//!     └── sync          # Reconciliation
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ghsync::core::remote::{GithubClient, Target};
//! use ghsync::core::sync::{sync_secrets, SyncOptions};
//!
//! # fn main() -> ghsync::error::Result<()> {
//! let mut client = GithubClient::new(Target::new("octo-org", "app"), "ghp_...")?;
//! let report = sync_secrets(&mut client, &SyncOptions::default())?;
//! println!("put {} secrets", report.put.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
