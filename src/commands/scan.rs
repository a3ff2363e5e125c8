use crate::api::fraudproof::FraudProofClient;
use crate::config::Config;
use crate::models::{Category, Signal};
use crate::services::scanner_service::{self, ScanSelection, ScannerSession};

pub const USAGE: &str = "scan <vehicle|bank|ecommerce|ethereum> <model> <fraud|legit> [commit]";

/// Turn positional arguments into a form selection. The signal is
/// optional here so a missing one surfaces as a scanner validation error.
pub fn parse_selection(args: &[&str]) -> Result<(ScanSelection, bool), String> {
    let category: Category = args
        .first()
        .ok_or_else(|| format!("Usage: {}", USAGE))?
        .parse()?;
    let model = args.get(1).map(|m| m.to_string()).unwrap_or_default();
    let signal = match args.get(2) {
        Some(raw) => Some(raw.parse::<Signal>()?),
        None => None,
    };
    let commit = match args.get(3).map(|a| a.to_lowercase()) {
        None => false,
        Some(a) if a == "commit" => true,
        Some(a) => return Err(format!("Unknown scan option '{}'. Usage: {}", a, USAGE)),
    };

    Ok((ScanSelection { category, model, signal }, commit))
}

pub async fn execute(config: &Config, args: &[&str]) -> Result<(), String> {
    let (selection, commit) = parse_selection(args)?;

    let client = FraudProofClient::new(&config.base_url, config.request_timeout)
        .map_err(|e| e.to_string())?;
    let mut session = ScannerSession::new(client, config.threshold);

    let decision = session.analyze(&selection).await.map_err(|e| {
        session_message(&e.to_string(), e.is_validation())
    })?;
    println!("{}", scanner_service::render_decision(decision));

    if !commit {
        if session.can_commit() {
            println!("Re-run with `commit` to anchor this proof on the ledger.");
        }
        return Ok(());
    }

    if !session.can_commit() {
        return Err("❌ This analysis returned no proof hash to commit".to_string());
    }

    session.commit().await.map_err(|e| e.to_string())?;
    if let Some(receipt) = session.receipt() {
        println!("{}", scanner_service::render_receipt(receipt));
    }
    Ok(())
}

fn session_message(message: &str, is_validation: bool) -> String {
    if is_validation {
        format!("⚠️ {}", message)
    } else {
        format!("❌ {}", message)
    }
}
