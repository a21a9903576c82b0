//! Streaming UI - console display for agent runtime events
//!
//! CLI entry point: replays a recorded event stream through the formatter.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tracing_subscriber::EnvFilter;

use streaming_ui::config::ModuleConfig;
use streaming_ui::hooks::{mount, EventRouter};
use streaming_ui::replay::replay;

/// Render agent runtime events as readable terminal output
///
/// Reads newline-delimited JSON records of the form
/// `{"event": "<name>", "data": {...}}` and displays reasoning blocks,
/// tool calls and token usage.
#[derive(Parser, Debug)]
#[command(name = "streaming-ui", version, about)]
struct Cli {
    /// Event stream file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// TOML config file with a [ui] section
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide reasoning blocks
    #[arg(long)]
    no_thinking: bool,

    /// Max lines of tool arguments/results to show
    #[arg(long)]
    tool_lines: Option<usize>,

    /// Hide token usage summaries
    #[arg(long)]
    no_token_usage: bool,
}

/// Load the config file if given and apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ModuleConfig> {
    let mut config = match &cli.config {
        Some(path) => ModuleConfig::from_path(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => ModuleConfig::default(),
    };

    if cli.no_thinking {
        config.ui.show_thinking_stream = false;
    }
    if let Some(lines) = cli.tool_lines {
        config.ui.show_tool_lines = lines;
    }
    if cli.no_token_usage {
        config.ui.show_token_usage = false;
    }

    Ok(config)
}

/// Logs go to stderr so stdout stays a clean transcript.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

async fn open_input(input: Option<&PathBuf>) -> Result<Box<dyn AsyncBufRead + Unpin>> {
    match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open event stream: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let mut router = EventRouter::new();
    let _hooks = mount(&mut router, &config);

    let reader = open_input(cli.input.as_ref()).await?;
    let stats = replay(reader, &mut router).await?;

    tracing::info!(
        emitted = stats.emitted,
        skipped = stats.skipped,
        "event replay finished"
    );

    Ok(())
}
