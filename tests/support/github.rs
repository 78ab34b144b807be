//! Mock GitHub Actions secrets API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use ghsync::core::cipher;
use ghsync::core::remote::{GithubClient, Target};

pub const OWNER: &str = "octo-org";
pub const REPO: &str = "app";
pub const TOKEN: &str = "test-token";
pub const KEY_ID: &str = "568250167242549743";

/// A recorded write against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Put(String),
    Delete(String),
}

/// A mock repository secret store with a real sealing keypair.
pub struct GithubMock {
    pub server: MockServer,
    secret_key: SecretKey,
}

impl GithubMock {
    /// Start a server that serves the public key, requiring GitHub's headers.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let secret_key = SecretKey::generate(&mut OsRng);

        Mock::given(method("GET"))
            .and(path(format!("{}/public-key", secrets_path())))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .and(header("accept", "application/vnd.github+json"))
            .and(header("x-github-api-version", "2022-11-28"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "key_id": KEY_ID,
                "key": STANDARD.encode(secret_key.public_key().as_bytes()),
            })))
            .mount(&server)
            .await;

        Self { server, secret_key }
    }

    /// Base URL to hand to the client.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve a listing containing `names`.
    pub async fn with_secrets(&self, names: &[&str]) {
        let secrets: Vec<Value> = names
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "created_at": "2024-01-10T14:59:22Z",
                    "updated_at": "2024-02-10T09:00:00Z",
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path(secrets_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": names.len(),
                "secrets": secrets,
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer every PUT with `status`.
    pub async fn on_put(&self, status: u16) {
        Mock::given(method("PUT"))
            .and(path_regex(format!("^{}/[^/]+$", secrets_path())))
            .respond_with(ResponseTemplate::new(status).set_body_string(body_for(status)))
            .mount(&self.server)
            .await;
    }

    /// Answer every DELETE with `status`.
    pub async fn on_delete(&self, status: u16) {
        Mock::given(method("DELETE"))
            .and(path_regex(format!("^{}/[^/]+$", secrets_path())))
            .respond_with(ResponseTemplate::new(status).set_body_string(body_for(status)))
            .mount(&self.server)
            .await;
    }

    /// Every request the server saw, in arrival order.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// PUT and DELETE calls, in arrival order.
    pub async fn writes(&self) -> Vec<Write> {
        self.requests()
            .await
            .iter()
            .filter_map(|r| {
                let name = secret_name(r);
                match r.method.as_str() {
                    "PUT" => Some(Write::Put(name)),
                    "DELETE" => Some(Write::Delete(name)),
                    _ => None,
                }
            })
            .collect()
    }

    /// Number of public-key fetches.
    pub async fn key_fetches(&self) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|r| r.url.path().ends_with("/public-key"))
            .count()
    }

    /// Open the value sent by the last PUT of `name`.
    pub async fn put_value(&self, name: &str) -> String {
        let requests = self.requests().await;
        let request = requests
            .iter()
            .rev()
            .find(|r| r.method.as_str() == "PUT" && secret_name(r) == name)
            .unwrap_or_else(|| panic!("no PUT for {}", name));

        let body: Value = serde_json::from_slice(&request.body).expect("PUT body is not JSON");
        assert_eq!(body["key_id"], KEY_ID);

        let sealed = body["encrypted_value"]
            .as_str()
            .expect("encrypted_value missing");
        cipher::open(&self.secret_key, sealed).expect("value not sealed to the repository key")
    }
}

/// A client for the mock. Build and use it inside [`super::blocking`].
pub fn client(uri: &str) -> GithubClient {
    GithubClient::new(Target::new(OWNER, REPO), TOKEN)
        .expect("client builds")
        .with_api_url(uri)
}

pub fn secrets_path() -> String {
    format!("/repos/{}/{}/actions/secrets", OWNER, REPO)
}

fn secret_name(request: &Request) -> String {
    request
        .url
        .path_segments()
        .and_then(|mut s| s.next_back())
        .unwrap_or_default()
        .to_string()
}

fn body_for(status: u16) -> String {
    match status {
        201 | 204 => String::new(),
        _ => format!(r#"{{"message":"mock status {}"}}"#, status),
    }
}
