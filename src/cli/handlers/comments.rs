//! Comment listing and posting.

use anyhow::{Context, Result};

use super::{Settings, open_app, parse_id};
use crate::cli::output::{CommentListing, Output, OutputFormat};
use crate::cli::{CommentArgs, CommentsArgs};

pub fn handle_comments(args: &CommentsArgs, settings: &Settings) -> Result<()> {
    let id = parse_id(&args.id)?;
    let app = open_app(settings)?;
    let comments = app
        .comments(&id)
        .with_context(|| format!("failed to load comments for {}", id))?;

    match args.format {
        OutputFormat::Json => {
            let listings: Vec<CommentListing> = comments.iter().map(CommentListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
        OutputFormat::Human | OutputFormat::Html => {
            if comments.is_empty() {
                println!("No comments yet.");
            }
            for c in &comments {
                println!(
                    "{}  {}: {}",
                    c.timestamp.format("%Y-%m-%d %H:%M"),
                    c.author,
                    c.text
                );
            }
        }
    }
    Ok(())
}

pub fn handle_comment(args: &CommentArgs, settings: &Settings) -> Result<()> {
    let id = parse_id(&args.id)?;
    let mut app = open_app(settings)?;
    let comment = app
        .post_comment(&id, args.author.as_deref(), &args.text)
        .context("failed to post comment")?;
    println!("Comment posted as {}", comment.author);
    Ok(())
}
