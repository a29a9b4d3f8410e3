use anyhow::Result;
use clap::Parser;
use solar_leads::storage::LocalLog;
use tracing::info;

/// Summarize the local lead log
#[derive(Parser, Debug)]
#[command(name = "solar_leads")]
struct Args {
    /// Lead log path
    #[arg(long, env = "SOLAR_LEADS_DB_PATH", default_value = "data/leads.db")]
    db_path: String,

    /// How many recent leads to show
    #[arg(long, default_value = "10")]
    recent: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let log = LocalLog::open(&args.db_path).await?;

    info!("Opened lead log at {}", args.db_path);

    let leads = log.leads().await?;
    let subscriptions = log.subscriptions().await?;

    info!("=== Lead Log ===");
    info!("Leads: {}", leads.len());
    info!("Newsletter signups: {}", subscriptions.len());

    if !leads.is_empty() {
        info!("=== Most Recent Leads ===");
    }
    for lead in leads.iter().rev().take(args.recent) {
        let form = &lead.form;
        info!(
            "{}  {}  zip {}  {} {}  {}",
            lead.stored_at.format("%Y-%m-%d %H:%M"),
            lead.lead_id,
            form.zip_code,
            form.first_name.as_deref().unwrap_or("-"),
            form.last_name.as_deref().unwrap_or("-"),
            form.monthly_bill.map(|b| b.label()).unwrap_or("-"),
        );
    }

    Ok(())
}
