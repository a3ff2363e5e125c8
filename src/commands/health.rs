use crate::api::fraudproof::FraudProofClient;
use crate::config::Config;
use crate::utils::user_message;

pub async fn execute(config: &Config) -> Result<(), String> {
    let client = FraudProofClient::new(&config.base_url, config.request_timeout)
        .map_err(|e| e.to_string())?;

    let health = client.health().await.map_err(|e| user_message(&e))?;
    if health.status.eq_ignore_ascii_case("ok") {
        println!("✅ Backend at {} is healthy", client.base_url());
        Ok(())
    } else {
        Err(format!("⚠️ Backend at {} reports status '{}'", client.base_url(), health.status))
    }
}
