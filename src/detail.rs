//! The single-repository screen.
//!
//! Metadata comes from the stored list when the repository is in it and
//! from the API otherwise; issues are always fetched. The two requests run
//! concurrently and their results are applied as they arrive.
//!
//! Every navigation bumps a generation counter and hands out a [`Ticket`].
//! A response carrying an older ticket belongs to a repository the user has
//! already left and is dropped instead of overwriting the current screen.

use std::fmt::Write;
use std::sync::mpsc;
use std::thread;

use tracing::{debug, info, warn};

use crate::api::GithubApi;
use crate::error::ApiError;
use crate::route::Route;
use crate::store::RepositoryStore;
use crate::types::{IssueRecord, RepositoryRecord, ISSUE_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Stored,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IssuesState {
    #[default]
    Loading,
    Loaded(Vec<IssueRecord>),
}

/// What the caller has to fetch after [`DetailView::navigate`].
#[derive(Debug, Clone)]
pub struct Navigation {
    pub ticket: Ticket,
    pub identifier: String,
    pub fetch_repository: bool,
}

enum Update {
    Repository(Result<RepositoryRecord, ApiError>),
    Issues(Result<Vec<IssueRecord>, ApiError>),
}

#[derive(Debug, Default)]
pub struct DetailView {
    generation: u64,
    identifier: String,
    repository: Option<(RepositoryRecord, Source)>,
    issues: IssuesState,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn repository(&self) -> Option<&RepositoryRecord> {
        self.repository.as_ref().map(|(r, _)| r)
    }

    pub fn source(&self) -> Option<Source> {
        self.repository.as_ref().map(|(_, s)| *s)
    }

    pub fn issues(&self) -> &IssuesState {
        &self.issues
    }

    /// Enters the view for `identifier`, resetting whatever was shown before.
    /// A stored record is shown straight away; otherwise the returned
    /// navigation asks for a repository fetch.
    pub fn navigate(&mut self, identifier: &str, store: &dyn RepositoryStore) -> Navigation {
        self.generation += 1;
        self.identifier = identifier.to_string();
        self.issues = IssuesState::Loading;

        let stored = match store.load() {
            Ok(list) => list.into_iter().find(|r| r.identifier == identifier),
            Err(e) => {
                warn!(error = %e, "can't read stored repositories");
                None
            }
        };
        let fetch_repository = stored.is_none();
        debug!(identifier, generation = self.generation, cached = !fetch_repository, "navigate");
        self.repository = stored.map(|r| (r, Source::Stored));

        Navigation {
            ticket: Ticket(self.generation),
            identifier: self.identifier.clone(),
            fetch_repository,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        if ticket.0 != self.generation {
            debug!(stale = ticket.0, current = self.generation, "dropping stale response");
            return false;
        }
        true
    }

    /// Returns whether the result was applied.
    pub fn apply_repository(
        &mut self,
        ticket: Ticket,
        result: Result<RepositoryRecord, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match result {
            Ok(record) => self.repository = Some((record, Source::Remote)),
            Err(e) => warn!(identifier = %self.identifier, error = %e, "repository fetch failed"),
        }
        true
    }

    /// Returns whether the result was applied. A failed fetch shows no issues.
    pub fn apply_issues(&mut self, ticket: Ticket, result: Result<Vec<IssueRecord>, ApiError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let issues = match result {
            Ok(mut issues) => {
                issues.truncate(ISSUE_LIMIT);
                issues
            }
            Err(e) => {
                warn!(identifier = %self.identifier, error = %e, "issues fetch failed");
                Vec::new()
            }
        };
        self.issues = IssuesState::Loaded(issues);
        true
    }

    /// Navigates to `identifier` and runs both fetches to completion.
    /// `on_change` sees the view right after navigation and after every
    /// applied response.
    pub fn resolve<F>(
        &mut self,
        identifier: &str,
        store: &dyn RepositoryStore,
        api: &dyn GithubApi,
        mut on_change: F,
    ) where
        F: FnMut(&DetailView),
    {
        let nav = self.navigate(identifier, store);
        info!(identifier, fetch_repository = nav.fetch_repository, "resolving repository");
        on_change(&*self);

        let (tx, rx) = mpsc::channel();
        let target = nav.identifier.as_str();
        thread::scope(|s| {
            if nav.fetch_repository {
                let tx = tx.clone();
                s.spawn(move || {
                    let _ = tx.send(Update::Repository(api.repository(target)));
                });
            }
            let issues_tx = tx.clone();
            s.spawn(move || {
                let _ = issues_tx.send(Update::Issues(api.issues(target)));
            });
            drop(tx);

            for update in rx {
                let applied = match update {
                    Update::Repository(result) => self.apply_repository(nav.ticket, result),
                    Update::Issues(result) => self.apply_issues(nav.ticket, result),
                };
                if applied {
                    on_change(&*self);
                }
            }
        });
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "< Back ({})\n", Route::Dashboard);

        match self.repository() {
            Some(repo) => {
                let _ = writeln!(out, "{}", repo.identifier);
                if let Some(description) = &repo.description {
                    let _ = writeln!(out, "  {description}");
                }
                let _ = writeln!(out, "  avatar: {}\n", repo.owner_avatar_url);
                let _ = writeln!(
                    out,
                    "  {} stars   {} forks   {} open issues",
                    repo.star_count, repo.fork_count, repo.open_issue_count
                );
            }
            None => {
                let _ = writeln!(out, "{}", self.identifier);
            }
        }

        let _ = writeln!(out, "\nIssues");
        match &self.issues {
            IssuesState::Loading => {
                let _ = writeln!(out, "  Loading issues...");
            }
            IssuesState::Loaded(issues) if issues.is_empty() => {
                let _ = writeln!(out, "  No open issues.");
            }
            IssuesState::Loaded(issues) => {
                for issue in issues {
                    let _ = writeln!(out, "  {}", issue.title);
                    let _ = writeln!(out, "    by {}  {}", issue.author_login, issue.url);
                }
            }
        }
        out
    }
}
