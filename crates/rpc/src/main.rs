//! Billing - Main entry point
//!
//! Serves line-delimited JSON-RPC on stdin/stdout. Logs go to stderr.

use billing_rpc::{load_roster, BillingService, RpcServer};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "billing")]
#[command(about = "Billing - Rating-weighted coin ledger", long_about = None)]
struct Cli {
    /// Roster file path (falls back to $BILLING_ROSTER, then user.json)
    #[arg(short, long)]
    roster: Option<PathBuf>,

    /// Enable debug logging (per-coin events)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the RPC stream
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let roster_path = cli
        .roster
        .or_else(|| std::env::var_os("BILLING_ROSTER").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("user.json"));

    let ledger = load_roster(&roster_path)?;
    let server = RpcServer::new(BillingService::new(ledger));

    info!("Billing service ready on stdio");
    server.run(BufReader::new(stdin()), stdout()).await?;
    info!("Input closed, shutting down");

    Ok(())
}
