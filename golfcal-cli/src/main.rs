mod commands;
mod http_source;
mod output;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use commands::Context;

#[derive(Parser)]
#[command(name = "golfcal")]
#[command(about = "Generate a subscribable calendar of golf tournaments on Danish TV")]
struct Cli {
    /// Config file (defaults to ~/.config/golfcal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feed and write it (the default command)
    Generate {
        /// Where to write the feed (overrides output_path from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generate as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// List the next tournaments in the feed
    Upcoming {
        /// How many tournaments to show
        #[arg(short = 'n', long, default_value_t = commands::UPCOMING_LIMIT)]
        limit: usize,

        /// List as if today were this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let ctx = Context::load(cli.config.as_deref())?;

    match cli.command {
        None => commands::generate::run(&ctx, None, None),
        Some(Commands::Generate { output, as_of }) => commands::generate::run(&ctx, output, as_of),
        Some(Commands::Upcoming { limit, as_of }) => commands::upcoming::run(&ctx, limit, as_of),
    }
}
