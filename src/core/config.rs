//! Configuration.
//!
//! Settings come from, highest priority first: command-line flags,
//! environment variables (handled by clap), the optional `.ghsync.toml` in
//! the working directory, and built-in defaults. The token is never read
//! from the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::remote::{GithubClient, Target};
use crate::core::sync::SyncOptions;
use crate::error::{ConfigError, Result};

/// Contents of `.ghsync.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target: TargetConfig,
    pub sync: SyncConfig,
    pub api: ApiConfig,
}

/// `[target]`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// `owner/name`
    pub repo: Option<String>,
}

/// `[sync]`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub env_file: Option<PathBuf>,
    pub delete_missing: Option<bool>,
}

/// `[api]`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub url: Option<String>,
    pub version: Option<String>,
}

impl Config {
    /// Load `.ghsync.toml` from `dir`, or defaults if there is none.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read or parsed.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(constants::CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Load from the current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(".")
    }

    /// Parse TOML contents.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents).map_err(ConfigError::Parse)?)
    }

    /// Sync options after applying the command-line overrides.
    pub fn sync_options(&self, env_file: Option<PathBuf>, keep_missing: bool) -> SyncOptions {
        let defaults = SyncOptions::default();
        SyncOptions {
            env_file: env_file
                .or_else(|| self.sync.env_file.clone())
                .unwrap_or(defaults.env_file),
            delete_missing: !keep_missing
                && self.sync.delete_missing.unwrap_or(defaults.delete_missing),
        }
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub repo: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub api_version: Option<String>,
}

/// Everything needed to talk to one repository.
pub struct Settings {
    pub target: Target,
    pub token: Zeroizing<String>,
    pub api_url: String,
    pub api_version: String,
}

impl Settings {
    /// Merge overrides over the file config over defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRepo`, `ConfigError::InvalidRepo` or
    /// `ConfigError::MissingToken`.
    pub fn resolve(config: &Config, overrides: Overrides) -> Result<Self> {
        let repo = overrides
            .repo
            .or_else(|| config.target.repo.clone())
            .ok_or(ConfigError::MissingRepo)?;
        let target: Target = repo.parse()?;

        let token = overrides
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let api_url = overrides
            .api_url
            .or_else(|| config.api.url.clone())
            .unwrap_or_else(|| constants::DEFAULT_API_URL.to_string());
        let api_version = overrides
            .api_version
            .or_else(|| config.api.version.clone())
            .unwrap_or_else(|| constants::DEFAULT_API_VERSION.to_string());

        debug!(%target, api_url = %api_url, api_version = %api_version, "settings resolved");

        Ok(Self {
            target,
            token: Zeroizing::new(token),
            api_url,
            api_version,
        })
    }

    /// Build the API client for these settings.
    pub fn client(&self) -> Result<GithubClient> {
        Ok(
            GithubClient::new(self.target.clone(), self.token.as_str())?
                .with_api_url(&self.api_url)
                .with_api_version(&self.api_version),
        )
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("target", &self.target)
            .field("token", &"***")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn overrides(repo: Option<&str>, token: Option<&str>) -> Overrides {
        Overrides {
            repo: repo.map(String::from),
            token: token.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [target]
            repo = "octo/app"

            [sync]
            env_file = "secrets.env"
            delete_missing = false

            [api]
            url = "https://github.example.com/api/v3"
            version = "2022-11-28"
            "#,
        )
        .unwrap();

        assert_eq!(config.target.repo.as_deref(), Some("octo/app"));
        assert_eq!(config.sync.env_file, Some(PathBuf::from("secrets.env")));
        assert_eq!(config.sync.delete_missing, Some(false));
        assert_eq!(
            config.api.url.as_deref(),
            Some("https://github.example.com/api/v3")
        );
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let err = Config::parse("[target]\ntoken = \"ghp_x\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_missing_dir_file_is_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(Config::load_from(tmp.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_reads_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(constants::CONFIG_FILE),
            "[target]\nrepo = \"a/b\"\n",
        )
        .unwrap();

        let config = Config::load_from(tmp.path()).unwrap();
        assert_eq!(config.target.repo.as_deref(), Some("a/b"));
    }

    #[test]
    fn test_sync_options_precedence() {
        let config = Config::parse("[sync]\nenv_file = \"from-file.env\"\n").unwrap();

        let options = config.sync_options(None, false);
        assert_eq!(options.env_file, PathBuf::from("from-file.env"));
        assert!(options.delete_missing);

        let options = config.sync_options(Some(PathBuf::from("cli.env")), true);
        assert_eq!(options.env_file, PathBuf::from("cli.env"));
        assert!(!options.delete_missing);
    }

    #[test]
    fn test_sync_options_file_can_disable_delete() {
        let config = Config::parse("[sync]\ndelete_missing = false\n").unwrap();
        assert!(!config.sync_options(None, false).delete_missing);
    }

    #[test]
    fn test_resolve_prefers_overrides() {
        let config = Config::parse("[target]\nrepo = \"file/repo\"\n").unwrap();

        let settings = Settings::resolve(&config, overrides(Some("cli/repo"), Some("t"))).unwrap();
        assert_eq!(settings.target, Target::new("cli", "repo"));

        let settings = Settings::resolve(&config, overrides(None, Some("t"))).unwrap();
        assert_eq!(settings.target, Target::new("file", "repo"));
        assert_eq!(settings.api_url, constants::DEFAULT_API_URL);
        assert_eq!(settings.api_version, constants::DEFAULT_API_VERSION);
    }

    #[test]
    fn test_resolve_missing_repo() {
        let err = Settings::resolve(&Config::default(), overrides(None, Some("t"))).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingRepo)));
    }

    #[test]
    fn test_resolve_missing_or_blank_token() {
        for token in [None, Some("  ")] {
            let err = Settings::resolve(&Config::default(), overrides(Some("a/b"), token))
                .unwrap_err();
            assert!(matches!(err, Error::Config(ConfigError::MissingToken)));
        }
    }

    #[test]
    fn test_settings_debug_hides_token() {
        let settings =
            Settings::resolve(&Config::default(), overrides(Some("a/b"), Some("ghp_secret")))
                .unwrap();
        assert!(!format!("{:?}", settings).contains("ghp_secret"));
    }
}
