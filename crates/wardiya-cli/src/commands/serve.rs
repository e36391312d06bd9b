//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use wardiya_core::controller::RosterController;

use crate::output;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030", env = "WARDIYA_WEB_PORT")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to <data-dir>/serve.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: &ServeArgs, mut controller: RosterController) -> Result<()> {
    let events = controller.start();

    println!();
    println!("  {} {}", "Wardiya".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Roster".green(), args.host, args.port);
    println!("  {}     http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "Events".green(), args.host, args.port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();
    output::print_notifications(&events);

    let controller = Arc::new(Mutex::new(controller));
    wardiya_web::run_server(controller, &args.host, args.port).await?;

    Ok(())
}
