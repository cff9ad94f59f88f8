//! List command handler.

use anyhow::{Context, Result, bail};
use std::io::{self, Write};

use super::{Settings, boot_app, write_grid};
use crate::app::View;
use crate::catalog::CatalogSource;
use crate::cli::ListArgs;
use crate::cli::output::{GridEntry, GridListing, Output, OutputFormat};
use crate::domain::{CategoryFilter, Semester};
use crate::render::{Grid, GridRenderer};

pub fn handle_list(args: &ListArgs, settings: &Settings) -> Result<()> {
    let mut app = boot_app(settings, None)?;

    if let Some(n) = args.semester {
        let semester = Semester::new(n).with_context(|| format!("invalid semester: {}", n))?;
        app.set_semester(semester)
            .context("failed to remember semester")?;
    }
    let category: CategoryFilter = args.category.parse().unwrap_or_default();
    app.set_category(category);
    if let Some(query) = &args.query {
        app.set_search(query.as_str());
        // A query given on the command line is already settled.
        app.flush_search_log();
    }

    if args.format == OutputFormat::Html {
        let renderer = GridRenderer::new().context("failed to load templates")?;
        println!("{}", app.render_html(&renderer)?);
        return Ok(());
    }

    let grid = match app.view() {
        View::Maintenance => {
            println!("ClassNotes is under maintenance.");
            return Ok(());
        }
        View::ConnectionError(message) => bail!("unable to load notes: {}", message),
        View::Grid(grid) => grid,
    };

    if app.catalog_source() == Some(CatalogSource::Stale) {
        eprintln!("warning: store unavailable, showing cached notes");
    }

    match args.format {
        OutputFormat::Json => {
            let (items, empty) = match &grid {
                Grid::Items(items) => (
                    items
                        .iter()
                        .map(|item| {
                            GridEntry::from_item(
                                item,
                                |r| r.is_new(app.today()),
                                |r| app.favorites().contains(r.id()),
                            )
                        })
                        .collect(),
                    None,
                ),
                Grid::Empty(state) => (Vec::new(), Some(state.heading().to_string())),
            };
            let listing = GridListing {
                semester: app.filter().semester.get(),
                category: app.filter().category.to_string(),
                count: grid.cards().len(),
                source: app.catalog_source(),
                empty,
                items,
            };
            println!("{}", serde_json::to_string_pretty(&Output::new(listing))?);
        }
        OutputFormat::Human | OutputFormat::Html => {
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "Semester {} · {}",
                app.filter().semester,
                app.filter().category
            )?;
            writeln!(out)?;
            write_grid(&mut out, &app, &grid)?;
        }
    }

    Ok(())
}
