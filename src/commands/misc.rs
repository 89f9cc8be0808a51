use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::collections::BTreeSet;
use std::io;

use crate::cli::Cli;
use crate::store::RepositoryStore;

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "repo-explorer", &mut io::stdout());
}

/// Known identifiers starting with `partial`, sorted and deduplicated.
pub fn suggestions(store: &dyn RepositoryStore, partial: &str) -> Vec<String> {
    let known = store.load().unwrap_or_default();
    known
        .into_iter()
        .map(|r| r.identifier)
        .filter(|id| id.starts_with(partial))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn complete_suggestions(store: &dyn RepositoryStore, partial: &str) {
    for identifier in suggestions(store, partial) {
        println!("{}", identifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::record;

    #[test]
    fn suggestions_filter_and_dedupe() {
        let store = MemoryStore::with_repositories(&[
            record("vuejs/vue"),
            record("facebook/react"),
            record("vuejs/core"),
            record("vuejs/vue"),
        ])
        .unwrap();

        assert_eq!(suggestions(&store, "vuejs/"), ["vuejs/core", "vuejs/vue"]);
        assert_eq!(suggestions(&store, "").len(), 3);
        assert!(suggestions(&store, "torvalds").is_empty());
    }
}
