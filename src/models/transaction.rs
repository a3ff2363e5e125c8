//! Transaction record models as served by the stats endpoint

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed set of transaction categories the scoring backend has models for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vehicle,
    Bank,
    Ecommerce,
    Ethereum,
}

impl Category {
    /// Display order used by the trend chart and the category table
    pub const ALL: [Category; 4] = [
        Category::Vehicle,
        Category::Bank,
        Category::Ecommerce,
        Category::Ethereum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Vehicle => "vehicle",
            Category::Bank => "bank",
            Category::Ecommerce => "ecommerce",
            Category::Ethereum => "ethereum",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::Vehicle => 0,
            Category::Bank => 1,
            Category::Ecommerce => 2,
            Category::Ethereum => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "vehicle" => Ok(Category::Vehicle),
            "bank" => Ok(Category::Bank),
            "ecommerce" => Ok(Category::Ecommerce),
            "ethereum" => Ok(Category::Ethereum),
            _ => Err(format!(
                "Unknown transaction type: '{}'. Supported: vehicle, bank, ecommerce, ethereum",
                raw
            )),
        }
    }
}

/// On-chain lookup attached by the backend to its most recent records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainData {
    pub fraud_score: Option<i64>,
    pub model_version: Option<String>,
    pub timestamp: Option<i64>,
    pub gas_used: Option<u64>,
    pub tx_hash: Option<String>,
}

/// How a record compares with its on-chain copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainCheck {
    /// No on-chain lookup attached, or it carried no score
    Unchecked,
    Verified,
    Mismatch { on_chain: i64 },
}

impl ChainCheck {
    pub fn label(self) -> String {
        match self {
            ChainCheck::Unchecked => "-".to_string(),
            ChainCheck::Verified => "✓ chain".to_string(),
            ChainCheck::Mismatch { on_chain } => format!("✗ chain={}", on_chain),
        }
    }
}

/// One scored transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Opaque identifier, numeric on the reference backend
    pub id: serde_json::Value,
    pub transaction_type: String,
    pub fraud_score: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub blockchain_tx_hash: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub blockchain_data: Option<ChainData>,
}

impl TransactionRecord {
    /// Recognized category, `None` for anything outside the fixed set
    pub fn category(&self) -> Option<Category> {
        self.transaction_type.parse().ok()
    }

    /// Score clamped into [0, 100]
    pub fn clamped_score(&self) -> u8 {
        self.fraud_score.clamp(0, 100) as u8
    }

    /// Parsed `created_at`; `None` when absent or unparseable
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Identifier as display text
    pub fn id_text(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "-".to_string(),
            other => other.to_string(),
        }
    }

    /// Compare the stored score with the one read back from the ledger
    pub fn chain_check(&self) -> ChainCheck {
        match self.blockchain_data.as_ref().and_then(|chain| chain.fraud_score) {
            None => ChainCheck::Unchecked,
            Some(on_chain) if on_chain == self.fraud_score => ChainCheck::Verified,
            Some(on_chain) => ChainCheck::Mismatch { on_chain },
        }
    }

    /// Proof-of-work reference, preferring the on-chain hash
    pub fn display_hash(&self) -> Option<&str> {
        self.blockchain_tx_hash
            .as_deref()
            .or(self.tx_hash.as_deref())
            .filter(|h| !h.is_empty())
    }
}

/// Parse an ISO-8601 timestamp. Offset-less values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

/// Body of `GET /stats/` (or `/dash/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_records: Option<u64>,
    #[serde(default)]
    pub records: Vec<TransactionRecord>,
    /// Set by the backend when its own query failed
    #[serde(default)]
    pub error: Option<String>,
}
