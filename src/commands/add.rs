use crate::commands::Session;
use crate::dashboard::{Dashboard, SubmitOutcome};
use crate::error::ExplorerError;

pub fn add_repo(session: &Session, repo: &str) -> Result<(), ExplorerError> {
    let mut dashboard = Dashboard::initialize(&session.store, session.duplicates);
    dashboard.set_input(repo);

    let result = dashboard.submit(&session.api);
    match &result {
        Ok(SubmitOutcome::Appended) => println!("✓ Added {}\n", repo.trim()),
        Ok(SubmitOutcome::Refreshed) => println!("✓ Refreshed {}\n", repo.trim()),
        Ok(SubmitOutcome::AlreadyKnown) => println!("{} is already listed\n", repo.trim()),
        Err(_) => {}
    }
    print!("{}", dashboard.render());
    result.map(|_| ())
}
