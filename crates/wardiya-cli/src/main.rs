//! Wardiya CLI - shift roster viewer
//!
//! Shows the three-person weekly rotation and announces new weeks.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Install the global subscriber.
///
/// Terminal views stay quiet unless `--verbose` or `RUST_LOG` asks otherwise,
/// so log lines do not interleave with rendered tables. With `log_file` the
/// same events are also appended to that file without colour codes.
fn init_tracing(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "wardiya=debug,wardiya_core=debug,wardiya_web=debug"
    } else {
        "wardiya=info,wardiya_core=warn,wardiya_web=debug"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| cli.data_dir().join("serve.log")),
        ),
        _ => None,
    };

    init_tracing(log_file.as_deref(), cli.verbose)?;

    cli.execute().await
}
