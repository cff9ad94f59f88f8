//! Line-oriented interactive session.
//!
//! Each input line is one user action. The control document is polled and
//! the search debouncer ticked before every action; a search still pending
//! when input ends is logged then.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use super::{Settings, boot_app, write_grid};
use crate::app::{App, View};
use crate::cli::BrowseArgs;
use crate::debounce::Clock;
use crate::domain::{CategoryFilter, RecordId, Semester};
use crate::infra::LocalStorage;
use crate::store::RemoteStore;

const HELP: &str = "commands: sem N | cat NAME|all|favorites | search [TEXT] | fav ID | open ID | close | dl ID | share ID | ad SLOT | ls | help | quit";

pub fn handle_browse(args: &BrowseArgs, settings: &Settings) -> Result<()> {
    let mut app = boot_app(settings, args.open.as_deref())?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run_session(&mut app, &settings.site_url, stdin.lock(), &mut stdout)
}

/// Drives `app` with commands read from `input`. `site_url` is the base of
/// share links.
pub fn run_session<S, L, C, R, W>(
    app: &mut App<S, L, C>,
    site_url: &str,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: RemoteStore,
    L: LocalStorage,
    C: Clock,
    R: BufRead,
    W: Write,
{
    write_view(app, out)?;
    if let Some(record) = app.detail() {
        writeln!(out, "open: {} ({})", record.title(), record.id())?;
    }

    for line in input.lines() {
        let line = line?;
        if let Err(e) = app.poll_control() {
            writeln!(out, "warning: {}", e)?;
        }
        if let Some(term) = app.tick() {
            writeln!(out, "(logged search '{}')", term)?;
        }

        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "ls" => write_view(app, out)?,
            "sem" => match rest.parse::<Semester>() {
                Ok(semester) => {
                    if let Err(e) = app.set_semester(semester) {
                        writeln!(out, "warning: {}", e)?;
                    }
                    write_view(app, out)?;
                }
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "cat" => {
                let category: CategoryFilter = rest.parse().unwrap_or_default();
                app.set_category(category);
                write_view(app, out)?;
            }
            "search" => {
                app.set_search(rest);
                write_view(app, out)?;
            }
            "fav" => match rest.parse::<RecordId>() {
                Ok(id) => match app.toggle_favorite(&id) {
                    Ok(toggle) => {
                        writeln!(out, "{}", toggle.message())?;
                        write_view(app, out)?;
                    }
                    Err(e) => writeln!(out, "error: {}", e)?,
                },
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "open" => match rest.parse::<RecordId>() {
                Ok(id) => match app.open_record(&id) {
                    Ok(record) => writeln!(out, "open: {} ({})", record.title(), record.id())?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                },
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "dl" => match rest.parse::<RecordId>() {
                Ok(id) => match app.download(&id) {
                    Ok(Some(link)) => writeln!(out, "download: {}", link.url())?,
                    Ok(None) => writeln!(out, "no file attached to {}", id)?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                },
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "share" => match rest.parse::<RecordId>() {
                Ok(id) => match app.share(&id, site_url) {
                    Ok(payload) => writeln!(out, "{}\n{}", payload.text, payload.url)?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                },
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "ad" if !rest.is_empty() => {
                app.click_sponsor(rest);
                writeln!(out, "opened sponsor {}", rest)?;
            }
            "close" => {
                app.close_detail();
                match app.detail() {
                    Some(record) => writeln!(out, "open: {} ({})", record.title(), record.id())?,
                    None => writeln!(out, "closed")?,
                }
            }
            other => writeln!(out, "error: unknown command '{}' ({})", other, HELP)?,
        }
    }

    if let Some(term) = app.flush_search_log() {
        writeln!(out, "(logged search '{}')", term)?;
    }
    Ok(())
}

fn write_view<S, L, C, W>(app: &App<S, L, C>, out: &mut W) -> io::Result<()>
where
    S: RemoteStore,
    L: LocalStorage,
    C: Clock,
    W: Write,
{
    match app.view() {
        View::Maintenance => writeln!(out, "ClassNotes is under maintenance."),
        View::ConnectionError(message) => writeln!(out, "Connection Error: {}", message),
        View::Grid(grid) => {
            writeln!(
                out,
                "Semester {} · {}",
                app.filter().semester,
                app.filter().category
            )?;
            write_grid(out, app, &grid)
        }
    }
}
