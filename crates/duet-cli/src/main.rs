#![forbid(unsafe_code)]

mod cmd;
mod output;
mod pending;
mod questions;

use anyhow::Result;
use clap::{Parser, Subcommand};
use duet_core::store::SessionStore;
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "duet: offline two-player session sync for the 36-questions exercise",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress warnings and non-essential logging.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (same as --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Store directory (defaults to $DUET_DIR, then the platform data dir).
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Name the players and generate the play order")]
    Start(cmd::start::StartArgs),

    #[command(about = "Show the current question and progress")]
    Show,

    #[command(about = "Write this device's answer for a question")]
    Answer(cmd::answer::AnswerArgs),

    #[command(about = "Commit (lock) this device's answer")]
    Lock(cmd::lock::LockArgs),

    #[command(about = "Uncommit a locked answer")]
    Unlock(cmd::lock::LockArgs),

    #[command(about = "Move to the next question")]
    Next,

    #[command(about = "Move back to the previous question")]
    Prev,

    #[command(about = "Build the session link to send to your partner")]
    Share(cmd::share::ShareArgs),

    #[command(
        about = "Merge a partner's session link into local state",
        after_help = "EXAMPLES:\n    duet import 'https://duet.app/play#session=eyJpbmRleCI...'\n    duet import 'https://duet.app/play#s=...'   # legacy links work too"
    )]
    Import(cmd::import::ImportArgs),

    #[command(about = "List conflicts left by the last import")]
    Conflicts,

    #[command(about = "Manually settle one merge conflict")]
    Resolve(cmd::resolve::ResolveArgs),

    #[command(about = "Side-by-side comparison of revealed answers")]
    Compare(cmd::compare::CompareArgs),

    #[command(about = "Show, set, or clear which side this device plays")]
    Side(cmd::side::SideArgs),

    #[command(about = "Delete all progress and answers on this device")]
    Reset(cmd::reset::ResetArgs),
}

/// Resolve the store directory: flag, then `DUET_DIR`, then the platform
/// data dir, then a dotdir fallback.
fn store_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Ok(dir) = env::var("DUET_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir().map_or_else(|| PathBuf::from(".duet"), |d| d.join("duet"))
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mode = OutputMode::resolve(cli.format, cli.json);
    let store = SessionStore::new(store_dir(cli.dir.clone()));
    tracing::debug!(dir = %store.dir().display(), "using session store");

    match &cli.command {
        Commands::Start(args) => cmd::start::run_start(args, &store, mode),
        Commands::Show => cmd::show::run_show(&store, mode),
        Commands::Answer(args) => cmd::answer::run_answer(args, &store, mode),
        Commands::Lock(args) => cmd::lock::run_lock(args, &store, mode),
        Commands::Unlock(args) => cmd::lock::run_unlock(args, &store, mode),
        Commands::Next => cmd::nav::run_next(&store, mode),
        Commands::Prev => cmd::nav::run_prev(&store, mode),
        Commands::Share(args) => cmd::share::run_share(args, &store, mode),
        Commands::Import(args) => cmd::import::run_import(args, &store, mode),
        Commands::Conflicts => cmd::resolve::run_conflicts(&store, mode),
        Commands::Resolve(args) => cmd::resolve::run_resolve(args, &store, mode),
        Commands::Compare(args) => cmd::compare::run_compare(args, &store, mode),
        Commands::Side(args) => cmd::side::run_side(args, &store, mode),
        Commands::Reset(args) => cmd::reset::run_reset(args, &store, mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_basic_commands() {
        Cli::parse_from(["duet", "show"]);
        Cli::parse_from(["duet", "start", "--player-a", "Ana", "--player-b", "Ben"]);
        Cli::parse_from(["duet", "import", "https://x#session=abc", "--json"]);
    }

    #[test]
    fn quiet_flag_parsed() {
        let cli = Cli::parse_from(["duet", "-q", "show"]);
        assert!(cli.quiet);
    }

    #[test]
    fn store_dir_prefers_flag() {
        assert_eq!(
            store_dir(Some(PathBuf::from("/tmp/x"))),
            PathBuf::from("/tmp/x")
        );
    }
}
