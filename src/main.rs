use anyhow::Context;
use clap::Parser;

use repo_explorer::cli::{Cli, Commands};
use repo_explorer::commands::{self, Session};
use repo_explorer::config::ExplorerConfig;
use repo_explorer::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        commands::generate_completions(*shell);
        return Ok(());
    }

    let mut config = ExplorerConfig::load().context("loading configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(storage) = cli.storage {
        config.storage_path = Some(storage);
    }
    if let Some(duplicates) = cli.duplicates {
        config.duplicates = duplicates;
    }

    let session = Session::open(&config)?;

    match cli.command {
        Some(Commands::Add { repo }) => commands::add_repo(&session, &repo)?,
        Some(Commands::List) | None => commands::list_repos(&session),
        Some(Commands::Show { repo }) => commands::show_repo(&session, &repo)?,
        Some(Commands::Open { path }) => {
            if !commands::open_route(&session, &path)? {
                anyhow::bail!("no such route: {}", path);
            }
        }
        Some(Commands::Complete { partial }) => {
            commands::complete_suggestions(&session.store, &partial)
        }
        Some(Commands::Completions { .. }) => {}
    }
    Ok(())
}
