use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slt", about = concat!("[#] slate v", env!("CARGO_PKG_VERSION"), " - your day in blocks"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a slate workspace in the current directory
    Init(InitArgs),
    /// Show a day's schedule with lane assignments
    Show(ShowArgs),
    /// Add a time block
    Add(AddArgs),
    /// Remove a time block
    Rm(RmArgs),
    /// Move a block to a new start time (and optionally another day)
    Mv(MvArgs),
    /// Change a block's duration
    Resize(ResizeArgs),
    /// Set or clear a block's memo
    Memo(MemoArgs),
    /// List categories
    Categories,
    /// Show time totals per category
    Stats(StatsArgs),
    /// Manage the to-do list
    Todo(TodoCmd),
    /// Search memos and to-dos by regex
    Search(SearchArgs),
    /// Show, set, or clear the "one thing" focus line
    Focus(FocusArgs),
    /// Fill a date range with deterministic demo data
    Demo(DemoArgs),
    /// Read or write slate.toml settings
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Reinitialize even if slate/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// Date to show (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Anchor date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Totals for the week containing the date
    #[arg(long, conflicts_with = "month")]
    pub week: bool,
    /// Totals for the month containing the date
    #[arg(long)]
    pub month: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Category id (see `slt categories`)
    pub category: String,
    /// Start time: 9, 9.25, or 9:15
    pub start: String,
    /// Duration in hours: 1, 1.5, or 1:30
    pub duration: String,
    /// Date to add to (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Memo text for the block
    #[arg(long)]
    pub memo: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Block id (e.g. 2025-11-24-3)
    pub id: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Block id
    pub id: String,
    /// New start time: 9, 9.25, or 9:15
    pub start: String,
    /// Move to a different date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Block id
    pub id: String,
    /// New duration in hours
    pub duration: String,
}

#[derive(Args)]
pub struct MemoArgs {
    /// Block id
    pub id: String,
    /// Memo text (omit with --clear)
    pub text: Option<String>,
    /// Remove the memo
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct FocusArgs {
    /// Focus text (omit to print the current one)
    pub text: Option<String>,
    /// Clear the focus line
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    /// First date to fill (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub from: Option<String>,
    /// Number of days to fill
    #[arg(long, default_value = "7")]
    pub days: u32,
    /// Generator seed; the same seed always produces the same schedule
    #[arg(long, default_value = "1")]
    pub seed: u64,
    /// Replace existing blocks in the range
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// To-do management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TodoCmd {
    #[command(subcommand)]
    pub action: Option<TodoAction>,
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a to-do
    Add(TodoAddArgs),
    /// Toggle a to-do's done state
    Done(TodoIdArg),
    /// Remove a to-do
    Rm(TodoIdArg),
    /// List to-dos (default)
    List(TodoListArgs),
}

#[derive(Args)]
pub struct TodoAddArgs {
    /// To-do title
    pub title: String,
    /// Category to file it under
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct TodoIdArg {
    /// To-do id (e.g. t-3)
    pub id: String,
}

#[derive(Args)]
pub struct TodoListArgs {
    /// Include completed items
    #[arg(long)]
    pub all: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a setting's value
    Get(ConfigKeyArg),
    /// Change a setting
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigKeyArg {
    /// Setting name (hour_height, day_start, show_key_hints)
    pub key: String,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Setting name (hour_height, day_start, show_key_hints)
    pub key: String,
    /// New value
    pub value: String,
}
