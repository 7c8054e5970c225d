//! laborstat CLI - Range-chunked BLS series fetcher.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;

use commands::fetch::FetchArgs;
use config::FileConfig;
use display::Format;

#[derive(Parser)]
#[command(name = "laborstat")]
#[command(about = "Fetch long histories of BLS statistical series", long_about = None)]
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

    /// Config file. Defaults to config.json in the platform config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one or more series over a year range
    Fetch {
        /// Series ids (e.g., LNS14000000), space or comma separated
        #[arg(required = true)]
        series: Vec<String>,

        /// First year. Defaults to as far back as one request reaches.
        #[arg(short, long)]
        start: Option<i32>,

        /// Last year. Defaults to the current year.
        #[arg(short, long)]
        end: Option<i32>,

        /// Years per request. Defaults to the API tier's limit.
        #[arg(long)]
        max_span: Option<u32>,

        /// BLS registration key
        #[arg(long, env = "BLS_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Output file path. Writes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format. Inferred from the output extension when omitted.
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// One row per period and one column per series
        #[arg(long)]
        wide: bool,

        /// Add a trailing moving average of N periods for every series
        #[arg(long, value_name = "N")]
        moving_average: Option<usize>,

        /// Skip the confirmation prompt when the daily quota would be exceeded
        #[arg(long)]
        yes: bool,
    },

    /// List catalogued series
    List {
        /// Filter by survey (cps, ces, jolts, cpi, ppi, eci, productivity)
        #[arg(long)]
        survey: Option<String>,

        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show series details
    Info {
        /// Series identifier
        series: String,

        /// BLS registration key
        #[arg(long, env = "BLS_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
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
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let file_config = FileConfig::load_or_default(cli.config.as_deref())?;

    match command {
        Commands::Fetch {
            series,
            start,
            end,
            max_span,
            api_key,
            output,
            format,
            wide,
            moving_average,
            yes,
        } => {
            let args = FetchArgs {
                series,
                start,
                end,
                max_span,
                api_key,
                output,
                format,
                wide,
                moving_average,
                yes,
            };
            commands::fetch::fetch(args, &file_config, cli.quiet).await
        }
        Commands::List { survey, search } => {
            commands::list::list_series(survey.as_deref(), search.as_deref())
        }
        Commands::Info { series, api_key } => {
            commands::info::show_info(&series, file_config.api_key(api_key).as_deref())
        }
    }
}
