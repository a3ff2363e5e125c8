use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use config::Config;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["fraudproof_dash=debug", "reqwest=warn", "hyper=warn"] {
        if let Ok(d) = directive.parse::<tracing_subscriber::filter::Directive>() {
            filter = filter.add_directive(d);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("🛡️ Starting fraudproof-dash v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    info!(
        "Backend {} | threshold >{} | refresh {}s",
        config.base_url,
        config.threshold.0,
        config.refresh_interval.as_secs()
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = commands::handle_command(&config, &args).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
