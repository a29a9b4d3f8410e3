//! REST API server for the solar lead funnel
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT       Port to listen on (default: 8080, env SOLAR_LEADS_PORT)
//!   --db-path PATH    Lead log location (default: data/leads.db, env SOLAR_LEADS_DB_PATH)
//!   --memory          Keep the lead log in memory only
//!   --session-idle-secs N  Drop funnel sessions idle this long (default: 1800)
//!
//! Integrations (webhook, Jornaya, TrustedForm) are configured through the
//! environment or a `.env` file.

use anyhow::Result;
use clap::Parser;
use solar_leads::api::{self, FunnelService};
use solar_leads::storage::LocalLog;
use solar_leads::{Config, LeadPipeline};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "REST API for the solar lead funnel")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "SOLAR_LEADS_PORT", default_value = "8080")]
    port: u16,

    /// Lead log path
    #[arg(long, env = "SOLAR_LEADS_DB_PATH", default_value = "data/leads.db")]
    db_path: String,

    /// Keep the lead log in memory
    #[arg(long)]
    memory: bool,

    /// Seconds before an untouched funnel session is dropped
    #[arg(long, env = "SOLAR_LEADS_SESSION_IDLE_SECS", default_value = "1800")]
    session_idle_secs: u64,
}

fn print_banner(port: u16, config: &Config) {
    let on_off = |set: bool| if set { "configured" } else { "off" };

    println!("============================================================");
    println!("              SOLAR LEADS API SERVER");
    println!("============================================================");
    println!();
    println!("  REST:        http://localhost:{}/api/v1/", port);
    println!("  Webhook:     {}", on_off(config.webhook_url.is_some()));
    println!("  Jornaya:     {}", on_off(config.jornaya_account_id.is_some()));
    println!("  TrustedForm: {}", on_off(config.trusted_form_account_id.is_some()));
    println!();
    println!("Endpoints:");
    println!("  GET  /api/v1/health               Health check");
    println!("  GET  /api/v1/providers/:zip       Providers for a ZIP");
    println!("  GET  /api/v1/states/:code         State name and providers");
    println!("  POST /api/v1/funnel               Start a funnel session");
    println!("  GET  /api/v1/funnel/:id           Session view");
    println!("  POST /api/v1/funnel/:id/steps     Answer the current step");
    println!("  POST /api/v1/funnel/:id/back      Go back");
    println!("  POST /api/v1/leads                Direct lead form");
    println!("  POST /api/v1/newsletter           Newsletter signup");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    print_banner(args.port, &config);

    let log = if args.memory {
        LocalLog::in_memory().await?
    } else {
        if let Some(parent) = std::path::Path::new(&args.db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        LocalLog::open(&args.db_path).await?
    };

    let idle_timeout = Duration::from_secs(args.session_idle_secs);
    let service = Arc::new(FunnelService::new(LeadPipeline::new(config, log)).with_idle_timeout(idle_timeout));
    service.spawn_idle_sweep(SWEEP_INTERVAL.min(idle_timeout).max(Duration::from_secs(1)));
    let app = api::router(service);

    let addr: SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    info!("Starting REST server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
