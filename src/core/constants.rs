//! Constants used throughout ghsync.
//!
//! Centralizes magic strings and default values.

/// Optional project configuration file (.ghsync.toml).
pub const CONFIG_FILE: &str = ".ghsync.toml";

/// Default local secret file (.env).
pub const ENV_FILE: &str = ".env";

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default value of the `X-GitHub-Api-Version` header.
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Media type GitHub recommends for REST requests.
pub const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Header carrying the API version.
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Environment variable holding the token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the `owner/name` target.
pub const REPO_ENV: &str = "GHSYNC_REPO";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "GHSYNC_API_URL";

/// Environment variable read for the tracing filter.
pub const LOG_ENV: &str = "GHSYNC_LOG";
