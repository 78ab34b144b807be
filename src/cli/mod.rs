//! Command-line interface.

pub mod completions;
pub mod list;
pub mod output;
pub mod secrets;
pub mod sync;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::{Config, Overrides, Settings};
use crate::core::constants;
use crate::error::Result;

/// ghsync - sync a local .env file into GitHub Actions secrets.
#[derive(Parser)]
#[command(
    name = "ghsync",
    about = "Sync a local .env file into GitHub Actions repository secrets",
    version
)]
pub struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub remote: RemoteArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to sync and how to authenticate.
#[derive(Args, Debug, Default)]
pub struct RemoteArgs {
    /// Target repository as owner/name
    #[arg(long, global = true, env = constants::REPO_ENV)]
    pub repo: Option<String>,

    /// Token with write access to the repository's secrets
    #[arg(long, global = true, env = constants::TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, global = true, env = constants::API_URL_ENV)]
    pub api_url: Option<String>,

    /// Value of the X-GitHub-Api-Version header
    #[arg(long, global = true)]
    pub api_version: Option<String>,
}

impl From<RemoteArgs> for Overrides {
    fn from(args: RemoteArgs) -> Self {
        Self {
            repo: args.repo,
            token: args.token,
            api_url: args.api_url,
            api_version: args.api_version,
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Make the repository's secrets match the local file
    Sync {
        /// Local secret file (default: .env)
        #[arg(short = 'f', long)]
        env_file: Option<PathBuf>,
        /// Leave remote secrets that the file does not name
        #[arg(long)]
        keep_missing: bool,
        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List the repository's secret names
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create or overwrite one secret
    Set {
        /// Secret name (e.g., DATABASE_URL)
        name: String,
        /// Secret value
        value: String,
    },

    /// Delete one secret
    Rm {
        /// Secret name
        name: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command, remote: RemoteArgs) -> Result<()> {
    match command {
        Command::Completions { shell } => completions::execute(shell),
        command => execute_remote(command, remote),
    }
}

/// Commands that need a target repository and a token.
fn execute_remote(command: Command, remote: RemoteArgs) -> Result<()> {
    use Command::*;

    let config = Config::load()?;
    let settings = Settings::resolve(&config, remote.into())?;

    match command {
        Sync {
            env_file,
            keep_missing,
            dry_run,
        } => {
            let options = config.sync_options(env_file, keep_missing);
            sync::execute(&settings, &options, dry_run)
        }
        List { json } => list::execute(&settings, json),
        Set { name, value } => secrets::set(&settings, &name, &value),
        Rm { name } => secrets::rm(&settings, &name),
        Completions { shell } => completions::execute(shell),
    }
}
