use crate::api::fraudproof::FraudProofClient;
use crate::config::Config;
use crate::models::{Category, DetectRequest, DetectResponse, FraudThreshold};
use crate::utils::user_message;

pub const USAGE: &str = "detect <vehicle|bank|ecommerce|ethereum> '<json features>' [tx_hash]";

pub fn parse_request(args: &[&str]) -> Result<DetectRequest, String> {
    if !(2..=3).contains(&args.len()) {
        return Err(format!("Usage: {}", USAGE));
    }
    let transaction_type: Category = args[0].parse()?;
    let transaction_data = match serde_json::from_str::<serde_json::Value>(args[1]) {
        Ok(serde_json::Value::Object(features)) => features,
        Ok(_) => return Err("Transaction data must be a JSON object".to_string()),
        Err(e) => return Err(format!("Invalid transaction data: {}", e)),
    };

    Ok(DetectRequest {
        transaction_type,
        tx_hash: args.get(2).map(|h| h.to_string()),
        transaction_data,
    })
}

pub fn render_detection(response: &DetectResponse, threshold: FraudThreshold) -> String {
    let score = response.fraud_score.clamp(0, 100) as u8;
    let verdict = if threshold.is_fraud(score) { "🚨 FRAUD" } else { "✅ SAFE" };
    format!(
        "{} | {} | Score: {}/100 | Logged as #{}{}\n",
        verdict,
        response.transaction_type,
        score,
        response.database_id,
        response
            .blockchain_tx
            .as_deref()
            .map(|tx| format!(" | tx {}", tx))
            .unwrap_or_default(),
    )
}

pub async fn execute(config: &Config, args: &[&str]) -> Result<(), String> {
    let request = parse_request(args)?;
    let client = FraudProofClient::new(&config.base_url, config.request_timeout)
        .map_err(|e| e.to_string())?;

    let response = client.detect(&request).await.map_err(|e| user_message(&e))?;
    print!("{}", render_detection(&response, config.threshold));
    Ok(())
}
