//! GitHub Actions repository secrets client.
//!
//! Blocking, one request per call, no retries. Endpoints live under
//! `{api_url}/repos/{owner}/{repo}/actions/secrets`.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

use super::types::{PublicKey, PutSecretRequest, SecretBrief, SecretList};
use super::{SecretStore, Target};
use crate::core::cipher::SealingKey;
use crate::core::constants;
use crate::error::{ConfigError, RemoteError, Result};

/// Client for one repository's Actions secrets.
pub struct GithubClient {
    http: Client,
    api_url: String,
    target: Target,
    token: Zeroizing<String>,
    api_version: String,
    /// Fetched on first use, never invalidated.
    public_key: Option<PublicKey>,
}

impl GithubClient {
    /// Create a client against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns `Error::Http` if the HTTP client cannot be built.
    pub fn new(target: Target, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("ghsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: constants::DEFAULT_API_URL.to_string(),
            target,
            token: Zeroizing::new(token.into()),
            api_version: constants::DEFAULT_API_VERSION.to_string(),
            public_key: None,
        })
    }

    /// Point the client at another API root (GitHub Enterprise, test server).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the `X-GitHub-Api-Version` header.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// `{api_url}/repos/{owner}/{repo}/actions/secrets/{tail...}`, each
    /// segment percent-encoded.
    fn endpoint(&self, tail: &[&str]) -> Result<Url> {
        let invalid = || ConfigError::InvalidApiUrl(self.api_url.clone());

        let mut url = Url::parse(&self.api_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend([
                "repos",
                self.target.owner.as_str(),
                self.target.repo.as_str(),
                "actions",
                "secrets",
            ])
            .extend(tail);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = method.as_str(), url = %url, "github request");
        self.http
            .request(method, url)
            .header(reqwest::header::ACCEPT, constants::ACCEPT_HEADER)
            .header(constants::API_VERSION_HEADER, self.api_version.as_str())
            .bearer_auth(self.token.as_str())
    }

    fn fetch_public_key(&self) -> Result<PublicKey> {
        let url = self.endpoint(&["public-key"])?;
        let response = self.request(Method::GET, url).send()?;
        let response = require_success("get public key", response)?;
        decode("get public key", response)
    }
}

impl SecretStore for GithubClient {
    fn public_key(&mut self) -> Result<PublicKey> {
        if let Some(key) = &self.public_key {
            return Ok(key.clone());
        }

        let key = self.fetch_public_key()?;
        debug!(key_id = %key.key_id, "public key cached");
        self.public_key = Some(key.clone());
        Ok(key)
    }

    fn list_secrets(&mut self) -> Result<Vec<SecretBrief>> {
        let url = self.endpoint(&[])?;
        let response = self.request(Method::GET, url).send()?;
        let response = require_success("list secrets", response)?;

        let list: SecretList = decode("list secrets", response)?;
        debug!(
            total = list.total_count,
            returned = list.secrets.len(),
            "listed secrets"
        );
        Ok(list.secrets)
    }

    fn put_secret(&mut self, name: &str, plaintext: &str) -> Result<()> {
        let key = self.public_key()?;
        let encrypted = SealingKey::from_base64(&key.key)?.seal(plaintext)?;

        let url = self.endpoint(&[name])?;
        let body = PutSecretRequest {
            encrypted_value: &encrypted,
            key_id: &key.key_id,
        };
        let response = self.request(Method::PUT, url).json(&body).send()?;

        require_status(
            &format!("put secret {}", name),
            response,
            &[StatusCode::CREATED, StatusCode::NO_CONTENT],
        )?;
        Ok(())
    }

    fn delete_secret(&mut self, name: &str) -> Result<()> {
        let url = self.endpoint(&[name])?;
        let response = self.request(Method::DELETE, url).send()?;

        require_status(
            &format!("delete secret {}", name),
            response,
            &[StatusCode::NO_CONTENT],
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_url", &self.api_url)
            .field("target", &self.target)
            .field("api_version", &self.api_version)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Accept any 2xx.
fn require_success(operation: &str, response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(remote_error(operation, response).into())
}

/// Accept only the listed statuses.
fn require_status(
    operation: &str,
    response: Response,
    accepted: &[StatusCode],
) -> Result<Response> {
    if accepted.contains(&response.status()) {
        return Ok(response);
    }
    Err(remote_error(operation, response).into())
}

/// Decode a JSON body. A body that does not match is the remote's fault, so
/// it is reported as a `RemoteError` carrying the raw text.
fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
    let status = response.status().as_u16();
    let body = response.text()?;

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!(operation, error = %e, "undecodable response body");
            Err(RemoteError::new(operation, status, body).into())
        }
    }
}

fn remote_error(operation: &str, response: Response) -> RemoteError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    RemoteError::new(operation, status, body)
}
