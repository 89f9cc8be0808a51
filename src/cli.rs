use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::DuplicatePolicy;

#[derive(Parser)]
#[command(name = "repo-explorer")]
#[command(about = "Explore GitHub repositories and their open issues", long_about = None)]
#[command(version)]
pub struct Cli {
    /// GitHub API base URL
    #[arg(long, global = true, env = "REPO_EXPLORER_API_URL", value_hint = ValueHint::Url)]
    pub api_url: Option<String>,

    /// Storage file holding looked-up repositories
    #[arg(long, global = true, env = "REPO_EXPLORER_STORAGE", value_hint = ValueHint::FilePath)]
    pub storage: Option<PathBuf>,

    /// What to do when a repository is already in the list
    #[arg(long, global = true, value_enum)]
    pub duplicates: Option<DuplicatePolicy>,

    /// Log filter, e.g. `debug` or `repo_explorer=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a repository and add it to the list
    #[command(short_flag = 'a', visible_alias = "search")]
    Add {
        /// Repository as owner/name (e.g. facebook/react)
        repo: String,
    },
    /// Show every repository looked up so far
    #[command(short_flag = 'l')]
    List,
    /// Show a repository's details and its first open issues
    #[command(short_flag = 's')]
    Show {
        /// Repository as owner/name
        repo: String,
    },
    /// Open a route path, e.g. `/` or `/repositories/facebook%2Freact`
    Open {
        path: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Internal command for completion suggestions (don't use this manually)
    #[command(hide = true)]
    Complete {
        /// Current partial input
        #[arg(default_value = "")]
        partial: String,
    },
}
