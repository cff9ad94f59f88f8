//! Show command handler.

use anyhow::{Result, bail};
use std::io::{self, Write};

use super::{CliApp, Settings, boot_app, write_record_row};
use crate::cli::ShowArgs;
use crate::cli::output::{CommentListing, Output, OutputFormat, RecordDetail, RecordListing};
use crate::domain::{NoteRecord, SharePayload};
use crate::infra::{download_url, embeddable_url};
use crate::render::{GridRenderer, RenderContext};

pub fn handle_show(args: &ShowArgs, settings: &Settings) -> Result<()> {
    let app = boot_app(settings, Some(&args.note))?;

    if app.availability().is_maintenance() {
        println!("ClassNotes is under maintenance.");
        return Ok(());
    }
    if let Some(message) = app.load_error() {
        bail!("unable to load notes: {}", message);
    }
    let Some(record) = app.detail() else {
        bail!("note not found: '{}'", args.note);
    };

    let detail = build_detail(&app, record, &settings.site_url)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&Output::new(detail))?),
        OutputFormat::Html => {
            let renderer = GridRenderer::new()?;
            let ctx = RenderContext {
                today: app.today(),
                search: "",
                favorites: app.favorites(),
            };
            println!("{}", renderer.render_card(record, &ctx)?);
        }
        OutputFormat::Human => print_detail(record, &detail)?,
    }
    Ok(())
}

fn build_detail(app: &CliApp, record: &NoteRecord, site_url: &str) -> Result<RecordDetail> {
    let comments = app.comments(record.id())?;
    Ok(RecordDetail {
        record: RecordListing::new(
            record,
            record.is_new(app.today()),
            app.favorites().contains(record.id()),
        ),
        description: record.description().to_string(),
        author: record.author().to_string(),
        view_url: record.file_url().map(embeddable_url),
        download_url: record.file_url().map(|u| download_url(u).url().to_string()),
        share: SharePayload::for_record(record, site_url),
        comments: comments.iter().map(CommentListing::from).collect(),
    })
}

fn print_detail(record: &NoteRecord, detail: &RecordDetail) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "# {}", record.title())?;
    writeln!(out)?;
    if !detail.description.is_empty() {
        writeln!(out, "{}", detail.description)?;
        writeln!(out)?;
    }

    write_record_row(&mut out, record, detail.record.is_new, detail.record.favorite)?;
    writeln!(out, "Semester: {}  Category: {}", record.semester(), record.category())?;
    if !detail.author.is_empty() {
        writeln!(out, "Author: {}", detail.author)?;
    }
    if let Some(url) = &detail.view_url {
        writeln!(out, "View: {}", url)?;
    }
    if let Some(url) = &detail.download_url {
        writeln!(out, "Download: {}", url)?;
    }
    writeln!(out)?;
    writeln!(out, "Share: {}", detail.share.text)?;
    writeln!(out, "       {}", detail.share.url)?;

    writeln!(out)?;
    if detail.comments.is_empty() {
        writeln!(out, "No comments yet.")?;
    } else {
        writeln!(out, "Comments ({}):", detail.comments.len())?;
        for c in &detail.comments {
            writeln!(out, "  {} ({}): {}", c.author, c.timestamp.get(..10).unwrap_or(&c.timestamp), c.text)?;
        }
    }
    Ok(())
}
