//! Export the lead log as CSV
//!
//! Usage:
//!   cargo run --release --bin export_leads -- [--db-path PATH] [--output PATH]
//!
//! Writes to stdout when no output path is given.

use anyhow::Result;
use clap::Parser;
use solar_leads::export::write_leads_csv;
use solar_leads::storage::LocalLog;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "export_leads")]
#[command(about = "Export captured leads as CSV")]
struct Args {
    /// Lead log path
    #[arg(long, env = "SOLAR_LEADS_DB_PATH", default_value = "data/leads.db")]
    db_path: String,

    /// Output CSV path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let log = LocalLog::open(&args.db_path).await?;
    let leads = log.leads().await?;

    let rows = match &args.output {
        Some(path) => write_leads_csv(&leads, std::fs::File::create(path)?)?,
        None => write_leads_csv(&leads, std::io::stdout().lock())?,
    };

    info!("Exported {} leads", rows);
    Ok(())
}
