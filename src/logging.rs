use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays pipeable. `level` wins over `RUST_LOG`.
pub fn init(level: Option<&str>) {
    let (filter, notice) = filter_for(level);
    if let Some(notice) = notice {
        eprintln!("{notice}");
    }

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// The filter to install, plus a notice for the user when an explicit
/// `level` didn't parse and the default was used instead.
fn filter_for(level: Option<&str>) -> (EnvFilter, Option<String>) {
    match level {
        Some(level) => match EnvFilter::try_new(level) {
            Ok(filter) => (filter, None),
            Err(e) => (
                EnvFilter::new(DEFAULT_FILTER),
                Some(format!(
                    "Ignoring --log-level {level:?} ({e}); using `{DEFAULT_FILTER}`"
                )),
            ),
        },
        None => (
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            None,
        ),
    }
}
