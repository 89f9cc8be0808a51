use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use repo_explorer::api::HttpApi;
use repo_explorer::config::DuplicatePolicy;
use repo_explorer::dashboard::{Dashboard, LOOKUP_MESSAGE};
use repo_explorer::detail::{DetailView, IssuesState, Source};
use repo_explorer::error::{ApiError, ExplorerError};
use repo_explorer::store::{LocalStorage, LocalStorageStore, RepositoryStore};

/// Minimal HTTP server answering canned JSON per path.
struct FakeGithub {
    base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl FakeGithub {
    fn start(routes: Vec<(&str, u16, String)>) -> Self {
        let routes: HashMap<String, (u16, String)> = routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Mutex::new(Vec::new()));

        let seen = hits.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                        break;
                    }
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("").to_string();
                seen.lock().unwrap().push(path.clone());

                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, r#"{"message":"Not Found"}"#.to_string()));
                let response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        FakeGithub { base_url, hits }
    }

    fn api(&self) -> HttpApi {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        HttpApi::with_client(client, &self.base_url)
    }

    fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().iter().filter(|p| *p == path).count()
    }
}

fn repo_json(full_name: &str, stars: u64) -> String {
    format!(
        r#"{{"id":1,"name":"x","full_name":"{full_name}","private":false,"description":"about {full_name}","owner":{{"login":"someone","id":2,"avatar_url":"https://avatars.example/{full_name}","type":"User"}},"stargazers_count":{stars},"watchers_count":{stars},"forks_count":7,"open_issues_count":3,"forks":7,"open_issues":3,"watchers":{stars},"default_branch":"main"}}"#
    )
}

fn issues_json(count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(r#"{{"id":{i},"title":"bug {i}","user":{{"login":"dev{i}"}},"html_url":"https://github.com/x/y/issues/{i}"}}"#)
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn temp_store(dir: &tempfile::TempDir) -> LocalStorageStore {
    LocalStorageStore::new(LocalStorage::new(dir.path().join("storage.json")))
}

#[test]
fn submitted_repositories_survive_a_restart() {
    let github = FakeGithub::start(vec![
        ("/repos/facebook/react", 200, repo_json("facebook/react", 100)),
        ("/repos/vuejs/vue", 200, repo_json("vuejs/vue", 50)),
    ]);
    let api = github.api();
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);

    let mut dashboard = Dashboard::initialize(&store, DuplicatePolicy::Allow);
    for repo in ["facebook/react", "vuejs/vue"] {
        dashboard.set_input(repo);
        dashboard.submit(&api).unwrap();
    }
    let before = dashboard.repositories().to_vec();

    let restarted = temp_store(&dir);
    let reloaded = Dashboard::initialize(&restarted, DuplicatePolicy::Allow);
    assert_eq!(reloaded.repositories(), before.as_slice());
    assert_eq!(before[0].identifier, "facebook/react");
    assert_eq!(before[1].star_count, 50);
    assert_eq!(before[1].fork_count, 7);
    assert_eq!(before[1].open_issue_count, 3);
}

#[test]
fn unknown_repository_is_a_lookup_error() {
    let github = FakeGithub::start(vec![]);
    let api = github.api();
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);

    let mut dashboard = Dashboard::initialize(&store, DuplicatePolicy::Allow);
    dashboard.set_input("nobody/nothing");
    let err = dashboard.submit(&api).unwrap_err();

    assert!(matches!(
        err,
        ExplorerError::Lookup { source: ApiError::NotFound(_), .. }
    ));
    assert_eq!(dashboard.error(), Some(LOOKUP_MESSAGE));
    assert!(store.load().unwrap().is_empty());
    assert_eq!(github.hits("/repos/nobody/nothing"), 1);
}

#[test]
fn malformed_and_failing_responses_are_lookup_errors() {
    let github = FakeGithub::start(vec![
        ("/repos/odd/shape", 200, r#"{"full_name":"odd/shape"}"#.to_string()),
        ("/repos/busy/server", 503, "{}".to_string()),
    ]);
    let api = github.api();
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    let mut dashboard = Dashboard::initialize(&store, DuplicatePolicy::Allow);

    dashboard.set_input("odd/shape");
    assert!(matches!(
        dashboard.submit(&api),
        Err(ExplorerError::Lookup { source: ApiError::Decode(_), .. })
    ));

    dashboard.set_input("busy/server");
    assert!(matches!(
        dashboard.submit(&api),
        Err(ExplorerError::Lookup { source: ApiError::Status(503), .. })
    ));
    assert!(dashboard.repositories().is_empty());
}

#[test]
fn detail_view_prefers_the_stored_record() {
    let github = FakeGithub::start(vec![
        ("/repos/facebook/react", 200, repo_json("facebook/react", 999)),
        ("/repos/facebook/react/issues", 200, issues_json(3)),
    ]);
    let api = github.api();
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);

    let mut dashboard = Dashboard::initialize(&store, DuplicatePolicy::Allow);
    dashboard.set_input("facebook/react");
    dashboard.submit(&api).unwrap();
    assert_eq!(github.hits("/repos/facebook/react"), 1);

    let mut view = DetailView::new();
    view.resolve("facebook/react", &store, &api, |_| {});

    assert_eq!(github.hits("/repos/facebook/react"), 1);
    assert_eq!(github.hits("/repos/facebook/react/issues"), 1);
    assert_eq!(view.source(), Some(Source::Stored));
    assert_eq!(view.repository().unwrap().star_count, 999);
}

#[test]
fn detail_view_fetches_unknown_repositories_and_caps_issues() {
    let github = FakeGithub::start(vec![
        ("/repos/vuejs/vue", 200, repo_json("vuejs/vue", 42)),
        ("/repos/vuejs/vue/issues", 200, issues_json(37)),
    ]);
    let api = github.api();
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);

    let mut view = DetailView::new();
    view.resolve("vuejs/vue", &store, &api, |_| {});

    assert_eq!(github.hits("/repos/vuejs/vue"), 1);
    assert_eq!(view.source(), Some(Source::Remote));
    assert_eq!(view.repository().unwrap().star_count, 42);

    let IssuesState::Loaded(issues) = view.issues() else {
        panic!("issues still loading");
    };
    let titles: Vec<_> = issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles.len(), 10);
    assert_eq!(titles.first(), Some(&"bug 0"));
    assert_eq!(titles.last(), Some(&"bug 9"));
    assert!(store.load().unwrap().is_empty());
}
