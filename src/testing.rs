//! Fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::GithubApi;
use crate::error::ApiError;
use crate::types::{IssueRecord, RepositoryRecord};

pub fn record(identifier: &str) -> RepositoryRecord {
    RepositoryRecord {
        identifier: identifier.to_string(),
        description: Some(format!("{identifier} description")),
        owner_avatar_url: format!("https://avatars.example/{identifier}"),
        star_count: 10,
        fork_count: 5,
        open_issue_count: 2,
    }
}

pub fn issues(count: usize) -> Vec<IssueRecord> {
    (0..count)
        .map(|i| IssueRecord {
            id: i.to_string(),
            title: format!("issue {i}"),
            author_login: format!("user{i}"),
            url: format!("https://github.com/a/b/issues/{i}"),
        })
        .collect()
}

/// Serves canned records; unknown identifiers are `NotFound`.
#[derive(Default)]
pub struct FakeApi {
    repositories: HashMap<String, RepositoryRecord>,
    issues: HashMap<String, Vec<IssueRecord>>,
    repository_requests: Mutex<Vec<String>>,
    issue_requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, record: RepositoryRecord) -> Self {
        self.repositories.insert(record.identifier.clone(), record);
        self
    }

    pub fn with_issues(mut self, identifier: &str, issues: Vec<IssueRecord>) -> Self {
        self.issues.insert(identifier.to_string(), issues);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.repository_requests.lock().unwrap().clone()
    }

    pub fn repository_calls(&self) -> usize {
        self.repository_requests.lock().unwrap().len()
    }

    pub fn issue_calls(&self) -> usize {
        self.issue_requests.lock().unwrap().len()
    }
}

impl GithubApi for FakeApi {
    fn repository(&self, identifier: &str) -> Result<RepositoryRecord, ApiError> {
        self.repository_requests
            .lock()
            .unwrap()
            .push(identifier.to_string());
        self.repositories
            .get(identifier)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(identifier.to_string()))
    }

    fn issues(&self, identifier: &str) -> Result<Vec<IssueRecord>, ApiError> {
        self.issue_requests
            .lock()
            .unwrap()
            .push(identifier.to_string());
        self.issues
            .get(identifier)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(identifier.to_string()))
    }
}
