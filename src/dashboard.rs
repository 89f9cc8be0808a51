//! The search-and-list screen.

use std::fmt::Write;

use tracing::{info, warn};

use crate::api::GithubApi;
use crate::config::DuplicatePolicy;
use crate::error::ExplorerError;
use crate::route::Route;
use crate::store::RepositoryStore;
use crate::types::RepositoryRecord;

pub const VALIDATION_MESSAGE: &str = "Type a repository as owner/name";
pub const LOOKUP_MESSAGE: &str = "Repository not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Appended,
    /// Already listed and the policy is [`DuplicatePolicy::Ignore`].
    AlreadyKnown,
    /// Existing entry replaced under [`DuplicatePolicy::Refresh`].
    Refreshed,
}

pub struct Dashboard<'a> {
    store: &'a dyn RepositoryStore,
    policy: DuplicatePolicy,
    input: String,
    repositories: Vec<RepositoryRecord>,
    error: Option<String>,
}

impl<'a> Dashboard<'a> {
    /// Hydrates the list from `store`. Any failure to read it means an empty list.
    pub fn initialize(store: &'a dyn RepositoryStore, policy: DuplicatePolicy) -> Self {
        let repositories = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "can't read stored repositories, starting empty");
            Vec::new()
        });
        Dashboard {
            store,
            policy,
            input: String::new(),
            repositories,
            error: None,
        }
    }

    pub fn set_input(&mut self, value: &str) {
        self.input = value.to_string();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn repositories(&self) -> &[RepositoryRecord] {
        &self.repositories
    }

    /// Looks up whatever is in the input field and adds it to the list.
    ///
    /// On success the input and error are cleared and the full list has been
    /// written to the store. On failure the list is exactly what it was.
    pub fn submit(&mut self, api: &dyn GithubApi) -> Result<SubmitOutcome, ExplorerError> {
        let identifier = self.input.trim().to_string();
        if identifier.is_empty() {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return Err(ExplorerError::Validation);
        }

        info!(%identifier, "looking up repository");
        let record = match api.repository(&identifier) {
            Ok(record) => record,
            Err(source) => {
                warn!(%identifier, error = %source, "lookup failed");
                self.error = Some(LOOKUP_MESSAGE.to_string());
                return Err(ExplorerError::Lookup { identifier, source });
            }
        };

        let previous = self.repositories.clone();
        let outcome = self.merge(record);

        if outcome != SubmitOutcome::AlreadyKnown {
            if let Err(e) = self.store.save(&self.repositories) {
                self.repositories = previous;
                self.error = Some(format!("Couldn't save repositories: {e}"));
                return Err(e.into());
            }
        }

        self.input.clear();
        self.error = None;
        Ok(outcome)
    }

    fn merge(&mut self, record: RepositoryRecord) -> SubmitOutcome {
        let existing = self
            .repositories
            .iter()
            .position(|r| r.identifier == record.identifier);

        match (self.policy, existing) {
            (DuplicatePolicy::Ignore, Some(_)) => SubmitOutcome::AlreadyKnown,
            (DuplicatePolicy::Refresh, Some(i)) => {
                self.repositories[i] = record;
                SubmitOutcome::Refreshed
            }
            _ => {
                self.repositories.push(record);
                SubmitOutcome::Appended
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Explore GitHub repositories\n");

        if let Some(error) = &self.error {
            let _ = writeln!(out, "  ! {error}\n");
        }

        if self.repositories.is_empty() {
            let _ = writeln!(out, "No repositories looked up yet.");
            return out;
        }

        for repo in &self.repositories {
            let _ = writeln!(out, "  {}", repo.identifier);
            if let Some(description) = &repo.description {
                let _ = writeln!(out, "    {description}");
            }
            let _ = writeln!(out, "    avatar: {}", repo.owner_avatar_url);
            let _ = writeln!(
                out,
                "    > {}\n",
                Route::Repository(repo.identifier.clone())
            );
        }
        out
    }
}
