//! classnotes - lecture notes catalog with favorites, sponsors and share links

pub mod app;
pub mod catalog;
pub mod cli;
pub mod debounce;
pub mod domain;
pub mod favorites;
pub mod infra;
pub mod maintenance;
pub mod render;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        Settings, handle_browse, handle_comment, handle_comments, handle_fav, handle_favs,
        handle_import, handle_list, handle_maintenance, handle_show, handle_sponsor, handle_sync,
        handle_upload, handle_watch,
    },
};

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v` flags.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(
            args.shell,
            &mut Cli::command(),
            "classnotes",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let config = Config::load()?;
    let settings = Settings {
        data_dir: config.data_dir(cli.dir.as_ref()),
        site_url: config.site_url().to_string(),
        debounce: config.debounce(),
    };
    tracing::debug!(data_dir = %settings.data_dir.display(), "resolved settings");

    match &cli.command {
        Command::Sync(args) => handle_sync(args, &settings),
        Command::List(args) => handle_list(args, &settings),
        Command::Show(args) => handle_show(args, &settings),
        Command::Fav(args) => handle_fav(args, &settings),
        Command::Favs(args) => handle_favs(args, &settings),
        Command::Comments(args) => handle_comments(args, &settings),
        Command::Comment(args) => handle_comment(args, &settings),
        Command::Upload(args) => handle_upload(args, &settings),
        Command::Import(args) => handle_import(args, &settings),
        Command::Sponsor(args) => handle_sponsor(args, &settings),
        Command::Maintenance(args) => handle_maintenance(args, &settings),
        Command::Watch(args) => handle_watch(args, &settings),
        Command::Browse(args) => handle_browse(args, &settings),
        Command::Completions(_) => Ok(()),
    }
}
