use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveToPreviousLine;
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::commands::{list_repos, Session};
use crate::detail::DetailView;
use crate::error::ExplorerError;
use crate::route::Route;

pub fn show_repo(session: &Session, repo: &str) -> Result<(), ExplorerError> {
    let repo = repo.trim();
    if repo.is_empty() {
        return Err(ExplorerError::Validation);
    }
    let interactive = io::stdout().is_terminal();
    let mut view = DetailView::new();
    let mut last_rows: u16 = 0;

    view.resolve(repo, &session.store, &session.api, |view| {
        // Redraw in place on a terminal; otherwise print only the final state.
        if !interactive {
            return;
        }
        let frame = view.render();
        let mut stdout = io::stdout().lock();
        if last_rows > 0 {
            let _ = queue!(
                stdout,
                MoveToPreviousLine(last_rows),
                Clear(ClearType::FromCursorDown)
            );
        }
        let _ = write!(stdout, "{frame}");
        let _ = stdout.flush();
        let cols = terminal::size().map(|(cols, _)| cols).unwrap_or(80);
        last_rows = frame_rows(&frame, cols);
    });

    if !interactive {
        print!("{}", view.render());
    }
    Ok(())
}

/// Terminal rows `frame` takes up once lines wider than `cols` wrap.
fn frame_rows(frame: &str, cols: u16) -> u16 {
    let cols = usize::from(cols.max(1));
    let rows: usize = frame
        .lines()
        .map(|line| line.width().max(1).div_ceil(cols))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Returns `Ok(false)` when the path isn't a known route.
pub fn open_route(session: &Session, path: &str) -> Result<bool, ExplorerError> {
    match Route::parse(path) {
        Some(Route::Dashboard) => list_repos(session),
        Some(Route::Repository(identifier)) => show_repo(session, &identifier)?,
        None => return Ok(false),
    }
    Ok(true)
}
