//! Thin client for the two GitHub endpoints the explorer reads.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{self, IssueRecord, RepositoryRecord};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Read-only view of the remote API. Implementations must be shareable
/// across threads, since the detail view issues both requests at once.
pub trait GithubApi: Sync {
    fn repository(&self, identifier: &str) -> Result<RepositoryRecord, ApiError>;

    /// Open issues in API order.
    fn issues(&self, identifier: &str) -> Result<Vec<IssueRecord>, ApiError>;
}

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("repo-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        HttpApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str, identifier: &str) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()?;

        let status = resp.status();
        debug!(%url, status = status.as_u16(), "response");
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(identifier.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(resp.text()?)
    }
}

impl GithubApi for HttpApi {
    fn repository(&self, identifier: &str) -> Result<RepositoryRecord, ApiError> {
        let body = self.get(&repo_path(identifier), identifier)?;
        Ok(types::decode_repository(&body)?)
    }

    fn issues(&self, identifier: &str) -> Result<Vec<IssueRecord>, ApiError> {
        let path = format!("{}/issues", repo_path(identifier));
        let body = self.get(&path, identifier)?;
        Ok(types::decode_issues(&body)?)
    }
}

/// `/repos/{owner}/{name}` with each segment percent-encoded.
pub fn repo_path(identifier: &str) -> String {
    let segments: Vec<_> = identifier
        .split('/')
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("/repos/{}", segments.join("/"))
}
