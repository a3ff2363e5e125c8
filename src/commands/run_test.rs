use crate::api::fraudproof::FraudProofClient;
use crate::config::Config;
use crate::models::{BatchTestRequest, BatchTestResponse, Category, FraudThreshold, Signal};
use crate::utils::{user_message, Table};

pub const USAGE: &str = "run-test <vehicle|bank|ecommerce|ethereum> <fraud|non-fraud>";

pub fn parse_request(args: &[&str]) -> Result<BatchTestRequest, String> {
    if args.len() != 2 {
        return Err(format!("Usage: {}", USAGE));
    }
    let transaction_type: Category = args[0].parse()?;
    let signal: Signal = args[1].parse()?;

    Ok(BatchTestRequest {
        transaction_type,
        fraud_label: signal.fraud_label().to_string(),
    })
}

/// Results table with a hit/miss column against the expected label
pub fn render_results(response: &BatchTestResponse, threshold: FraudThreshold) -> String {
    let mut out = format!(
        "🧪 {} samples of {} ({})\n",
        response.total_samples, response.transaction_type, response.fraud_label
    );

    let mut table = Table::new(&["DB ID", "Score", "Predicted", "Expected", "Match"]);
    let mut hits = 0usize;
    for item in &response.results {
        let score = item.fraud_score.clamp(0, 100) as u8;
        let predicted = if threshold.is_fraud(score) { "fraud" } else { "non-fraud" };
        let expected = item.expected_fraud_label.as_deref().unwrap_or("-");
        let matched = expected == predicted;
        if matched {
            hits += 1;
        }
        table.add_row(&[
            item.database_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            score.to_string(),
            predicted.to_string(),
            expected.to_string(),
            if matched { "✓" } else { "✗" }.to_string(),
        ]);
    }
    out.push_str(&table.render());
    out.push_str(&format!("{}/{} predictions matched\n", hits, response.results.len()));
    out
}

pub async fn execute(config: &Config, args: &[&str]) -> Result<(), String> {
    let request = parse_request(args)?;
    let client = FraudProofClient::new(&config.base_url, config.request_timeout)
        .map_err(|e| e.to_string())?;

    let response = client.run_test(&request).await.map_err(|e| user_message(&e))?;
    println!("{}", render_results(&response, config.threshold));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scan::BatchTestItem;

    #[test]
    fn test_parse_request() {
        let request = parse_request(&["ethereum", "non-fraud"]).unwrap();
        assert_eq!(request.transaction_type, Category::Ethereum);
        assert_eq!(request.fraud_label, "non-fraud");

        assert!(parse_request(&["ethereum"]).is_err());
        assert!(parse_request(&["ethereum", "unsure"]).is_err());
    }

    #[test]
    fn test_render_results_counts_matches() {
        let response = BatchTestResponse {
            transaction_type: "vehicle".to_string(),
            fraud_label: "fraud".to_string(),
            total_samples: 2,
            results: vec![
                BatchTestItem {
                    fraud_score: 91,
                    expected_fraud_label: Some("fraud".to_string()),
                    database_id: Some(11),
                    blockchain_tx: None,
                },
                BatchTestItem {
                    fraud_score: 12,
                    expected_fraud_label: Some("fraud".to_string()),
                    database_id: Some(12),
                    blockchain_tx: None,
                },
            ],
        };

        let text = render_results(&response, FraudThreshold::DEFAULT);
        assert!(text.contains("2 samples of vehicle"));
        assert!(text.contains("1/2 predictions matched"));
    }
}
