//! The two places a user can be: the dashboard or one repository.

use std::fmt;

const REPOSITORY_PREFIX: &str = "/repositories/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Repository(String),
}

impl Route {
    /// Parses a route path. The identifier segment is percent-decoded, so
    /// both `/repositories/facebook%2Freact` and `/repositories/facebook/react`
    /// name the same repository.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Some(Route::Dashboard);
        }
        let rest = path.strip_prefix(REPOSITORY_PREFIX)?;
        let identifier = urlencoding::decode(rest.trim_end_matches('/')).ok()?;
        if identifier.is_empty() {
            return None;
        }
        Some(Route::Repository(identifier.into_owned()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Repository(identifier) => {
                format!("{}{}", REPOSITORY_PREFIX, urlencoding::encode(identifier))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
