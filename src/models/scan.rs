//! Scanner request/response models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::transaction::Category;

/// Outcome the operator forces the simulated scanner to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Fraud,
    Legit,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Fraud => "fraud",
            Signal::Legit => "legit",
        }
    }

    /// Label vocabulary the backend's test data uses
    pub fn fraud_label(self) -> &'static str {
        match self {
            Signal::Fraud => "fraud",
            Signal::Legit => "non-fraud",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "fraud" => Ok(Signal::Fraud),
            "legit" | "non-fraud" => Ok(Signal::Legit),
            _ => Err(format!("Unknown signal: '{}'. Use: fraud, legit", raw)),
        }
    }
}

/// Body of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub transaction_type: Category,
    pub model_used: String,
    pub forced_signal: Signal,
    pub fraud_label: String,
    pub timestamp: String,
}

/// Response of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub score: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub proof_hash: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<serde_json::Value>,
}

/// Body of `POST /commit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub proof_hash: String,
    pub transaction_id: serde_json::Value,
}

/// Response of `POST /commit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitResponse {
    #[serde(default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// Backend risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" | "safe" => Some(RiskLevel::Low),
            "medium" | "moderate" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            "critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }

    pub fn is_fraud(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

/// Rendered result of one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub score: u8,
    pub risk: RiskLevel,
    /// True when the backend did not send a usable risk level
    pub risk_inferred: bool,
    pub forced_signal: Signal,
    pub message: Option<String>,
    pub proof_hash: Option<String>,
    pub transaction_id: Option<serde_json::Value>,
}

/// Ledger receipt of a successful commit
#[derive(Debug, Clone, PartialEq)]
pub struct CommitReceipt {
    pub block_number: Option<u64>,
    pub tx_hash: Option<String>,
}

/// Body of `POST /test/run-test`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchTestRequest {
    pub transaction_type: Category,
    pub fraud_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchTestItem {
    pub fraud_score: i64,
    #[serde(default)]
    pub expected_fraud_label: Option<String>,
    #[serde(default)]
    pub database_id: Option<i64>,
    #[serde(default)]
    pub blockchain_tx: Option<String>,
}

/// Response of `POST /test/run-test`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchTestResponse {
    pub transaction_type: String,
    pub fraud_label: String,
    pub total_samples: u64,
    #[serde(default)]
    pub results: Vec<BatchTestItem>,
}

/// Body of `POST /test/detect`: score one raw transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectRequest {
    pub transaction_type: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Model input features, keyed by column name
    pub transaction_data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    pub transaction_type: String,
    pub fraud_score: i64,
    pub database_id: i64,
    #[serde(default)]
    pub blockchain_tx: Option<String>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_labels() {
        assert_eq!("FRAUD".parse::<Signal>(), Ok(Signal::Fraud));
        assert_eq!("legit".parse::<Signal>(), Ok(Signal::Legit));
        assert_eq!(Signal::Legit.fraud_label(), "non-fraud");
        assert!("maybe".parse::<Signal>().is_err());
    }

    #[test]
    fn test_risk_level_parse() {
        assert_eq!(RiskLevel::parse("High"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse(" critical "), Some(RiskLevel::Critical));
        assert_eq!(RiskLevel::parse("LOW"), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::parse("unknown"), None);
        assert!(RiskLevel::Critical.is_fraud());
        assert!(!RiskLevel::Medium.is_fraud());
    }

    #[test]
    fn test_analyze_request_wire_shape() {
        let request = AnalyzeRequest {
            transaction_type: Category::Ecommerce,
            model_used: "xgb-v2".to_string(),
            forced_signal: Signal::Legit,
            fraud_label: Signal::Legit.fraud_label().to_string(),
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["transaction_type"], "ecommerce");
        assert_eq!(value["forced_signal"], "legit");
        assert_eq!(value["fraud_label"], "non-fraud");
        assert_eq!(value["model_used"], "xgb-v2");
    }

    #[test]
    fn test_detect_request_omits_missing_hash() {
        let mut features = serde_json::Map::new();
        features.insert("amount".to_string(), serde_json::json!(129.5));
        let request = DetectRequest {
            transaction_type: Category::Bank,
            tx_hash: None,
            transaction_data: features,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["transaction_type"], "bank");
        assert_eq!(value["transaction_data"]["amount"], 129.5);
        assert!(value.get("tx_hash").is_none());
    }
}
