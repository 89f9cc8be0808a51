use crate::commands::Session;
use crate::dashboard::Dashboard;

pub fn list_repos(session: &Session) {
    let dashboard = Dashboard::initialize(&session.store, session.duplicates);
    print!("{}", dashboard.render());
}
