//! docmark CLI - tokenize and render documentation pages
//!
//! Commands:
//!   tokens    Print the block tokens of a page file
//!   render    Render a page file to HTML (or a JSON node tree)
//!   stats     Show page statistics
//!   hidden    List pages whose front matter hides them
//!   page      Load a page from the pages directory and render it

mod commands;
mod config;
mod diagram;
mod error;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FileArgs, HiddenArgs, PageArgs, RenderArgs};

#[derive(Parser)]
#[command(name = "docmark", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover docmark.toml).
    #[arg(short, long, global = true, env = "DOCMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the block tokens of a page file.
    Tokens(FileArgs),
    /// Render a page file to HTML.
    Render(RenderArgs),
    /// Show page statistics.
    Stats(FileArgs),
    /// List pages marked hidden in their front matter.
    Hidden(HiddenArgs),
    /// Load a page from the pages directory and render it to HTML.
    Page(PageArgs),
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables DEBUG, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Tokens(args) => args.tokens(),
        Commands::Render(args) => args.execute(config),
        Commands::Stats(args) => args.stats(config),
        Commands::Hidden(args) => args.execute(config),
        Commands::Page(args) => args.execute(config),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
