use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of issues kept for the detail view.
pub const ISSUE_LIMIT: usize = 10;

/// A repository as the explorer remembers it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_avatar_url: String,
    pub star_count: u64,
    pub fork_count: u64,
    pub open_issue_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub id: String,
    pub title: String,
    pub author_login: String,
    pub url: String,
}

/// Payload did not have the shape we expect.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid repository identifier in payload: {0:?}")]
    Identifier(String),
}

#[derive(Deserialize, Debug)]
struct GitHubOwner {
    avatar_url: String,
}

#[derive(Deserialize, Debug)]
struct GitHubRepo {
    full_name: String,
    description: Option<String>,
    owner: GitHubOwner,
    stargazers_count: u64,
    forks: u64,
    open_issues: u64,
}

#[derive(Deserialize, Debug)]
struct GitHubUser {
    login: String,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum GitHubId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize, Debug)]
struct GitHubIssue {
    id: GitHubId,
    title: String,
    user: GitHubUser,
    html_url: String,
}

impl TryFrom<GitHubRepo> for RepositoryRecord {
    type Error = DecodeError;

    fn try_from(repo: GitHubRepo) -> Result<Self, Self::Error> {
        if !is_identifier(&repo.full_name) {
            return Err(DecodeError::Identifier(repo.full_name));
        }
        Ok(RepositoryRecord {
            identifier: repo.full_name,
            description: repo.description,
            owner_avatar_url: repo.owner.avatar_url,
            star_count: repo.stargazers_count,
            fork_count: repo.forks,
            open_issue_count: repo.open_issues,
        })
    }
}

impl From<GitHubIssue> for IssueRecord {
    fn from(issue: GitHubIssue) -> Self {
        let id = match issue.id {
            GitHubId::Number(n) => n.to_string(),
            GitHubId::Text(s) => s,
        };
        IssueRecord {
            id,
            title: issue.title,
            author_login: issue.user.login,
            url: issue.html_url,
        }
    }
}

/// Decode a `GET /repos/{owner}/{name}` body.
pub fn decode_repository(body: &str) -> Result<RepositoryRecord, DecodeError> {
    let repo: GitHubRepo = serde_json::from_str(body)?;
    repo.try_into()
}

/// Decode a `GET /repos/{owner}/{name}/issues` body, keeping at most
/// [`ISSUE_LIMIT`] entries in the order the API returned them.
pub fn decode_issues(body: &str) -> Result<Vec<IssueRecord>, DecodeError> {
    let issues: Vec<GitHubIssue> = serde_json::from_str(body)?;
    Ok(issues
        .into_iter()
        .take(ISSUE_LIMIT)
        .map(IssueRecord::from)
        .collect())
}

/// `owner/name`, both halves non-empty and free of whitespace.
pub fn is_identifier(s: &str) -> bool {
    match s.split_once('/') {
        Some((owner, name)) => {
            !owner.is_empty()
                && !name.is_empty()
                && !name.contains('/')
                && !s.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
