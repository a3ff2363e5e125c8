use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::api::fraudproof::FraudProofClient;
use crate::models::FraudThreshold;

pub const DEFAULT_STATS_PATH: &str = "/stats/";
pub const DEFAULT_REFRESH_SECS: u64 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for the poll → aggregate → render pipeline and the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    /// `/stats/` or `/dash/` depending on the backend build
    pub stats_path: String,
    pub refresh_interval: Duration,
    pub threshold: FraudThreshold,
    pub request_timeout: Duration,
    /// Where trend.png / histogram.png are written; no charts when unset
    pub chart_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: FraudProofClient::DEFAULT_BASE_URL.to_string(),
            stats_path: DEFAULT_STATS_PATH.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            threshold: FraudThreshold::DEFAULT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            chart_dir: None,
        }
    }
}

impl Config {
    /// Read `FRAUDPROOF_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Config::default();

        if let Some(url) = get("FRAUDPROOF_BASE_URL") {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    key: "FRAUDPROOF_BASE_URL",
                    expected: "an http(s) URL",
                    value: url,
                });
            }
            cfg.base_url = url;
        }

        if let Some(path) = get("FRAUDPROOF_STATS_PATH") {
            cfg.stats_path = if path.starts_with('/') { path } else { format!("/{}", path) };
        }

        if let Some(raw) = get("FRAUDPROOF_REFRESH_SECS") {
            cfg.refresh_interval = Duration::from_secs(parse_positive(
                "FRAUDPROOF_REFRESH_SECS",
                raw,
            )?);
        }

        if let Some(raw) = get("FRAUDPROOF_TIMEOUT_SECS") {
            cfg.request_timeout = Duration::from_secs(parse_positive(
                "FRAUDPROOF_TIMEOUT_SECS",
                raw,
            )?);
        }

        if let Some(raw) = get("FRAUDPROOF_FRAUD_THRESHOLD") {
            let value = raw
                .parse::<u8>()
                .ok()
                .filter(|v| *v <= 100)
                .ok_or(ConfigError::Invalid {
                    key: "FRAUDPROOF_FRAUD_THRESHOLD",
                    expected: "an integer in 0..=100",
                    value: raw,
                })?;
            cfg.threshold = FraudThreshold(value);
        }

        cfg.chart_dir = get("FRAUDPROOF_CHART_DIR").map(PathBuf::from);

        Ok(cfg)
    }
}

fn parse_positive(key: &'static str, raw: String) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::Invalid {
            key,
            expected: "a positive integer",
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.stats_path, "/stats/");
        assert_eq!(cfg.refresh_interval, Duration::from_secs(5));
        assert_eq!(cfg.threshold, FraudThreshold(50));
        assert!(cfg.chart_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("FRAUDPROOF_BASE_URL", "https://ledger.example"),
            ("FRAUDPROOF_STATS_PATH", "dash/"),
            ("FRAUDPROOF_REFRESH_SECS", "3"),
            ("FRAUDPROOF_FRAUD_THRESHOLD", "49"),
            ("FRAUDPROOF_TIMEOUT_SECS", "2"),
            ("FRAUDPROOF_CHART_DIR", "/tmp/charts"),
        ]))
        .unwrap();

        assert_eq!(cfg.base_url, "https://ledger.example");
        assert_eq!(cfg.stats_path, "/dash/");
        assert_eq!(cfg.refresh_interval, Duration::from_secs(3));
        assert_eq!(cfg.threshold, FraudThreshold(49));
        assert_eq!(cfg.request_timeout, Duration::from_secs(2));
        assert_eq!(cfg.chart_dir, Some(PathBuf::from("/tmp/charts")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup(&[("FRAUDPROOF_REFRESH_SECS", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("FRAUDPROOF_REFRESH_SECS", "fast")])).is_err());
        assert!(Config::from_lookup(lookup(&[("FRAUDPROOF_FRAUD_THRESHOLD", "101")])).is_err());
        assert_eq!(
            Config::from_lookup(lookup(&[("FRAUDPROOF_BASE_URL", "localhost:8000")])),
            Err(ConfigError::Invalid {
                key: "FRAUDPROOF_BASE_URL",
                expected: "an http(s) URL",
                value: "localhost:8000".to_string(),
            })
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let cfg = Config::from_lookup(lookup(&[("FRAUDPROOF_CHART_DIR", "  ")])).unwrap();
        assert!(cfg.chart_dir.is_none());
    }
}
