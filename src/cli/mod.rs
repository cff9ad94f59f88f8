//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// classnotes - browse, save and share lecture notes
#[derive(Parser, Debug)]
#[command(name = "classnotes", version, about, long_about = None)]
pub struct Cli {
    /// Data directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh the local catalog cache
    Sync(SyncArgs),

    /// List notes for a semester, category and search
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note by id or share link
    Show(ShowArgs),

    /// Save or unsave a note
    Fav(FavArgs),

    /// List saved notes
    Favs(FavsArgs),

    /// List comments on a note
    Comments(CommentsArgs),

    /// Comment on a note
    Comment(CommentArgs),

    /// Upload a PDF and register it in the catalog
    Upload(UploadArgs),

    /// Import records from a YAML or JSON file
    Import(ImportArgs),

    /// Manage sponsor slots
    Sponsor(SponsorArgs),

    /// Inspect or toggle maintenance mode
    Maintenance(MaintenanceArgs),

    /// Watch the control document and print maintenance transitions
    Watch(WatchArgs),

    /// Interactive session reading commands from stdin
    Browse(BrowseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `sync` command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Switch to this semester (remembered for later runs)
    #[arg(short, long)]
    pub semester: Option<u32>,

    /// Category name, "all" or "favorites"
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Search text (substring of title, description, category or author)
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note id, `?pdf=ID`, or a full share link
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `fav` command
#[derive(Parser, Debug)]
pub struct FavArgs {
    /// Note id
    pub id: String,
}

/// Arguments for the `favs` command
#[derive(Parser, Debug)]
pub struct FavsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `comments` command
#[derive(Parser, Debug)]
pub struct CommentsArgs {
    /// Note id
    pub id: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `comment` command
#[derive(Parser, Debug)]
pub struct CommentArgs {
    /// Note id
    pub id: String,

    /// Comment text
    pub text: String,

    /// Display name (defaults to Anonymous)
    #[arg(short, long)]
    pub author: Option<String>,
}

/// Arguments for the `upload` command
#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// Note title
    #[arg(short, long)]
    pub title: String,

    /// Semester number
    #[arg(short, long)]
    pub semester: u32,

    /// Category (e.g. Organic, Inorganic, Physical)
    #[arg(short, long)]
    pub category: String,

    /// Short description
    #[arg(short = 'D', long, default_value = "")]
    pub description: String,

    /// Author or lecturer name
    #[arg(short, long, default_value = "")]
    pub author: String,

    /// Local file to validate
    #[arg(long)]
    pub file: PathBuf,

    /// Link where the file is hosted
    #[arg(long)]
    pub url: String,

    /// Uploader email
    #[arg(long)]
    pub uploaded_by: Option<String>,
}

/// Arguments for the `import` command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// YAML (.yaml/.yml) or JSON file holding a list of records
    pub file: PathBuf,
}

/// Arguments for the `sponsor` command
#[derive(Parser, Debug)]
pub struct SponsorArgs {
    #[command(subcommand)]
    pub action: SponsorAction,
}

#[derive(Subcommand, Debug)]
pub enum SponsorAction {
    /// Create or replace a sponsor slot
    Set(SponsorSetArgs),

    /// Remove a sponsor slot
    Rm(SponsorRmArgs),

    /// List sponsor slots
    Ls,
}

/// Arguments for `sponsor set`
#[derive(Parser, Debug)]
pub struct SponsorSetArgs {
    /// Slot name (e.g. slot_grid_1, slot_grid)
    pub slot: String,

    /// Image URL (makes this an image sponsor)
    #[arg(long, conflicts_with_all = ["body", "cta"])]
    pub image: Option<String>,

    /// Title (required for text sponsors)
    #[arg(long, required_unless_present = "image")]
    pub title: Option<String>,

    /// Body text
    #[arg(long)]
    pub body: Option<String>,

    /// Call-to-action label
    #[arg(long)]
    pub cta: Option<String>,

    /// Click-through link
    #[arg(long)]
    pub link: Option<String>,

    /// Store the slot but keep it switched off
    #[arg(long)]
    pub inactive: bool,
}

/// Arguments for `sponsor rm`
#[derive(Parser, Debug)]
pub struct SponsorRmArgs {
    /// Slot name
    pub slot: String,
}

/// Arguments for the `maintenance` command
#[derive(Parser, Debug)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub action: MaintenanceAction,
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceAction {
    /// Turn maintenance on
    On {
        /// Also refuse record reads
        #[arg(long)]
        lock: bool,
    },

    /// Turn maintenance off and unlock reads
    Off,

    /// Print the current flags
    Status,
}

/// Arguments for the `watch` command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Stop after this many polls
    #[arg(long)]
    pub count: Option<usize>,
}

/// Arguments for the `browse` command
#[derive(Parser, Debug)]
pub struct BrowseArgs {
    /// Deep link to open on start
    #[arg(long)]
    pub open: Option<String>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
