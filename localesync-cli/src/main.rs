mod config;
mod diff;
mod http;
mod route;
mod sync;
mod validation;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::CommonArgs;
use crate::diff::{DiffOptions, run_diff_command};
use crate::route::run_route_command;
use crate::sync::{SyncOptions, run_sync_command};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate missing keys from the main language and drop keys it no longer has.
    Sync {
        #[command(flatten)]
        common: CommonArgs,

        /// Translation service endpoint (overrides the config file)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Only sync these languages (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Write a JSON report of what was translated and removed
        #[arg(long)]
        report_json: Option<String>,

        /// Run the translations but do not write any locale file
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what a sync would translate and remove, without calling the service.
    Diff {
        #[command(flatten)]
        common: CommonArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show the chain of translation ways used to reach a language.
    Route {
        /// Language to translate from
        source: String,

        /// Language to translate into
        target: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.commands {
        Commands::Sync {
            common,
            endpoint,
            only,
            report_json,
            dry_run,
        } => run_sync_command(SyncOptions {
            common,
            endpoint,
            only,
            report_json,
            dry_run,
        }),
        Commands::Diff {
            common,
            json,
            output,
        } => run_diff_command(DiffOptions {
            common,
            json,
            output,
        }),
        Commands::Route {
            source,
            target,
            common,
        } => run_route_command(common, source, target),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
