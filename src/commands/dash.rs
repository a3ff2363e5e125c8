use chrono::Utc;
use tracing::info;

use crate::api::fraudproof::FraudProofClient;
use crate::config::Config;
use crate::services::dashboard_service;
use crate::services::poll_service::{PollSettings, Poller, StatsEndpoint, TickOutcome};

pub async fn execute(config: &Config, args: &[&str]) -> Result<(), String> {
    let once = match args.first().map(|a| a.to_lowercase()) {
        None => false,
        Some(a) if a == "once" => true,
        Some(a) => return Err(format!("Unknown dash option '{}'. Usage: dash [once]", a)),
    };

    let client = FraudProofClient::new(&config.base_url, config.request_timeout)
        .map_err(|e| e.to_string())?;
    let source = StatsEndpoint::new(client, &config.stats_path);
    let settings = PollSettings {
        threshold: config.threshold,
        interval: config.refresh_interval,
        chart_dir: config.chart_dir.clone(),
    };
    let poller = Poller::new(source, settings);

    info!("Dashboard polling {}{}", config.base_url, config.stats_path);

    if once {
        let outcome = poller.tick().await;
        let view = poller.snapshot().await;
        println!("{}", dashboard_service::render_dashboard(&view, config.threshold, Utc::now()));
        return match outcome {
            TickOutcome::Failed(e) => Err(e.to_string()),
            _ => Ok(()),
        };
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    poller
        .run(shutdown, |_outcome, view| {
            // Clear screen and home the cursor before each redraw
            print!("\x1B[2J\x1B[H");
            println!("{}", dashboard_service::render_dashboard(view, config.threshold, Utc::now()));
        })
        .await;

    Ok(())
}
