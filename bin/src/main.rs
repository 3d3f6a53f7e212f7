//! elokline CLI - daily rating candlesticks from Lichess game history.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use elokline_lib::Speed;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "elokline")]
#[command(about = "Daily rating candlesticks from Lichess game history", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a player's rated games and write their daily rating bars
    Fetch {
        /// Lichess username
        username: String,

        /// Speed category (ultraBullet, bullet, blitz, rapid, classical, correspondence)
        #[arg(short = 'p', long, default_value = "blitz")]
        speed: Speed,

        /// Maximum number of games to fetch
        #[arg(long, default_value_t = elokline_lib::DEFAULT_MAX_GAMES)]
        max: usize,

        /// Only fetch games from this day on (YYYY-MM-DD). Bypasses the cache.
        #[arg(short, long)]
        since: Option<String>,

        /// Output file path. Defaults to <username>-<speed>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Fetch the full history and leave the cache untouched
        #[arg(long)]
        no_cache: bool,

        /// API host
        #[arg(long, default_value = "https://lichess.org")]
        base_url: String,

        /// Personal API token
        #[arg(long, env = "LICHESS_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Seconds to wait for the server to start responding
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Inspect or clear cached bars
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Actions on the bar cache.
#[derive(Subcommand)]
enum CacheAction {
    /// List cached series
    List,

    /// Print the cache directory
    Path,

    /// Remove cached series
    Clear {
        /// Player to clear. Prompts for a series when omitted.
        username: Option<String>,

        /// Only clear this speed category
        #[arg(short = 'p', long)]
        speed: Option<Speed>,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    init_tracing(cli.verbose, cli.quiet);

    match command {
        Commands::Fetch {
            username,
            speed,
            max,
            since,
            output,
            format,
            no_cache,
            base_url,
            token,
            timeout,
        } => {
            commands::fetch::fetch(
                &username,
                speed,
                max,
                since.as_deref(),
                output,
                format,
                no_cache,
                base_url,
                token,
                timeout,
                cli.quiet,
            )
            .await
        }
        Commands::Cache { action } => match action {
            CacheAction::List => commands::cache::list(),
            CacheAction::Path => commands::cache::path(),
            CacheAction::Clear {
                username,
                speed,
                yes,
            } => commands::cache::clear(username.as_deref(), speed, yes),
        },
    }
}
