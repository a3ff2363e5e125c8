//! Data models for the dashboard and scanner
//!
//! Wire types received from or sent to the FraudProof backend, plus the
//! derived aggregates the dashboard renders.

pub mod transaction;
pub mod stats;
pub mod scan;
pub mod chart;
pub mod dashboard;

// Re-export commonly used types for convenience
pub use transaction::{Category, StatsSnapshot, TransactionRecord};
pub use stats::{AggregateStats, CategoryCounts, DashboardSummary, FraudThreshold, ScoreHistogram};
pub use scan::{
    AnalyzeRequest, AnalyzeResponse, BatchTestRequest, BatchTestResponse, CommitReceipt,
    CommitRequest, CommitResponse, Decision, DetectRequest, DetectResponse, HealthResponse,
    RiskLevel, Signal,
};
pub use chart::ChartPaths;
pub use dashboard::{DashboardUpdate, DashboardView};
