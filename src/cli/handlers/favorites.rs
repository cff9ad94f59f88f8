//! Favorite toggling and listing.

use anyhow::{Context, Result};
use std::io::Write;

use super::{Settings, boot_app, open_app, parse_id, write_record_row};
use crate::cli::output::{Output, OutputFormat, RecordListing};
use crate::cli::{FavArgs, FavsArgs};

pub fn handle_fav(args: &FavArgs, settings: &Settings) -> Result<()> {
    let id = parse_id(&args.id)?;
    let mut app = open_app(settings)?;
    let toggle = app
        .toggle_favorite(&id)
        .context("failed to save favorites")?;
    println!("{}", toggle.message());
    Ok(())
}

/// Lists saved notes across all semesters, newest first. Saved ids that are
/// not in the catalog are reported separately.
pub fn handle_favs(args: &FavsArgs, settings: &Settings) -> Result<()> {
    let app = boot_app(settings, None)?;

    let saved: Vec<_> = app
        .catalog()
        .iter()
        .filter(|r| app.favorites().contains(r.id()))
        .collect();
    let missing: Vec<_> = app
        .favorites()
        .iter()
        .filter(|id| app.record(id).is_none())
        .collect();

    match args.format {
        OutputFormat::Json => {
            let listings: Vec<RecordListing> = saved
                .iter()
                .map(|r| RecordListing::new(r, r.is_new(app.today()), true))
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Human | OutputFormat::Html => {
            if saved.is_empty() && missing.is_empty() {
                println!("No saved notes yet.");
                return Ok(());
            }
            let mut out = std::io::stdout().lock();
            for r in &saved {
                write_record_row(&mut out, r, r.is_new(app.today()), true)?;
            }
            for id in &missing {
                writeln!(out, "{:<26}  (not in catalog)", id)?;
            }
            writeln!(out)?;
            writeln!(out, "{} saved note(s)", saved.len() + missing.len())?;
        }
    }
    Ok(())
}
