//! `selq` binary: tokenize selectors and evaluate them against JSON trees.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use tracing::info_span;

use selq::Engine;
use selq_cli::commands::{load_document, run_closest, run_search, run_tokenize};
use selq_cli::config::{CliConfig, LogLevel};
use selq_cli::error::CliError;
use selq_cli::logging::init_logging;

/// Evaluate CSS-like selectors against element trees.
#[derive(Parser, Debug)]
#[command(name = "selq", version, about)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Reject selectors containing text no grammar rule accepts.
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tokens of a selector.
    Tokenize {
        /// Selector text.
        selector: String,
    },
    /// Print the path of every element matching a selector.
    Search {
        /// JSON element tree.
        #[arg(long)]
        tree: PathBuf,
        /// Selector text.
        selector: String,
    },
    /// Print the nearest element at or above a start element that matches.
    Closest {
        /// JSON element tree.
        #[arg(long)]
        tree: PathBuf,
        /// Id attribute of the start element.
        #[arg(long)]
        from: String,
        /// Selector text.
        selector: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    if let Err(e) = run(&cli.command, config) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(cli.log_level, cli.strict.then_some(true)))
}

fn run(command: &Commands, config: CliConfig) -> Result<()> {
    let engine = Engine::with_config(config.engine_config())
        .wrap_err("failed to compile the selector grammar")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Tokenize { selector } => {
            let _span = info_span!("tokenize", %selector).entered();
            run_tokenize(&mut out, &engine, selector)?;
        }
        Commands::Search { tree, selector } => {
            let _span = info_span!("search", %selector).entered();
            let document = load_document(tree)?;
            run_search(&mut out, &engine, &document, selector)?;
        }
        Commands::Closest {
            tree,
            from,
            selector,
        } => {
            let _span = info_span!("closest", %selector, from = %from).entered();
            let document = load_document(tree)?;
            run_closest(&mut out, &engine, &document, from, selector)?;
        }
    }
    out.flush().wrap_err("failed to flush output")
}
