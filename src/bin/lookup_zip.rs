//! Print the provider directory result for one or more ZIP codes
//!
//! Usage:
//!   cargo run --bin lookup_zip -- 90210 10001 [--json]

use anyhow::Result;
use clap::Parser;
use solar_leads::pipeline::resolve_zip;
use solar_leads::providers::provider_options;

#[derive(Parser, Debug)]
#[command(name = "lookup_zip")]
#[command(about = "Look up electric providers by ZIP code")]
struct Args {
    /// ZIP codes (5 digits or ZIP+4)
    #[arg(required = true)]
    zips: Vec<String>,

    /// Print raw JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    for zip in &args.zips {
        let result = resolve_zip(zip);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
            continue;
        }

        println!("{}", zip);
        if !result.success {
            println!("  {}", result.message.unwrap_or_default());
            continue;
        }
        println!("  {}, {}", result.city, result.state);
        for provider in result.providers {
            println!("  - {} ({})", provider.name, provider.service_area.join(", "));
        }
        println!("  Options: {}", provider_options(result.providers).join(" | "));
    }

    Ok(())
}
