//! ghsync - sync a local .env file into GitHub Actions secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ghsync::cli::output;
use ghsync::cli::{execute, Cli};
use ghsync::core::constants;
use ghsync::error::{ConfigError, Error, RemoteError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ghsync=debug")
        } else if cli.quiet {
            EnvFilter::new("ghsync=warn")
        } else {
            EnvFilter::new("ghsync=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.remote) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingToken) => Some("export GITHUB_TOKEN=<token>"),
            Error::Config(ConfigError::MissingRepo) => {
                Some("pass --repo owner/name or add [target] repo to .ghsync.toml")
            }
            Error::Remote(RemoteError { status: 401, .. }) => {
                Some("check that the token is valid and not expired")
            }
            Error::Remote(RemoteError {
                status: 403 | 404, ..
            }) => Some("check the repository name and that the token can write secrets"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
