//! amz-bestsellers - Amazon bestseller listings extractor CLI.
//!
//! One-shot pipeline: discover country segments, page through each one, write
//! a deduplicated CSV.

use amz_bestsellers::commands::{CountriesCommand, RunCommand};
use amz_bestsellers::config::{Config, DedupMode};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-bestsellers",
    version,
    about = "Amazon bestseller listings extractor",
    long_about = "Fetches paginated bestseller listings for every discovered country segment and writes a deduplicated CSV file."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Delay between requests in milliseconds
    #[arg(long, default_value = "500", global = true, env = "BSR_DELAY")]
    delay: u64,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "BSR_PROXY")]
    proxy: Option<String>,

    /// Duplicate-row detection mode
    #[arg(long, global = true)]
    dedup: Option<DedupMode>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full extraction pipeline (the default)
    #[command(alias = "r")]
    Run,

    /// List the country segments discovered from the API
    Countries,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.delay_ms = cli.delay;

    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(dedup) = cli.dedup {
        config.dedup = dedup;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let cmd = RunCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Countries => {
            let cmd = CountriesCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }
    }

    Ok(())
}
