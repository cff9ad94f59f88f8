//! Sync command handler.

use anyhow::{Result, bail};

use super::{Settings, boot_app};
use crate::catalog::CatalogSource;
use crate::cli::SyncArgs;
use crate::cli::output::{Output, OutputFormat, SyncReport};

pub fn handle_sync(args: &SyncArgs, settings: &Settings) -> Result<()> {
    let app = boot_app(settings, None)?;

    if app.availability().is_maintenance() {
        println!("ClassNotes is under maintenance.");
        return Ok(());
    }
    if let Some(message) = app.load_error() {
        bail!("unable to load notes: {}", message);
    }
    let Some(source) = app.catalog_source() else {
        bail!("catalog was not loaded");
    };

    let report = SyncReport {
        source,
        count: app.catalog().len(),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&Output::new(report))?),
        OutputFormat::Human | OutputFormat::Html => {
            let how = match report.source {
                CatalogSource::Fresh => "fetched from store",
                CatalogSource::Cached => "cache is up to date",
                CatalogSource::Stale => "store unavailable, using cached copy",
            };
            println!("{} note(s) ({})", report.count, how);
        }
    }
    Ok(())
}
