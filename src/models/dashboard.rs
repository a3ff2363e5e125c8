//! Dashboard view-model owned by the poller

use chrono::{DateTime, Utc};

use super::chart::ChartPaths;
use super::stats::{AggregateStats, DashboardSummary, ScoreHistogram};
use super::transaction::TransactionRecord;

/// Everything one successful poll produces
#[derive(Debug, Clone)]
pub struct DashboardUpdate {
    pub sequence: u64,
    pub fetched_at: DateTime<Utc>,
    pub summary: DashboardSummary,
    pub stats: AggregateStats,
    pub histogram: ScoreHistogram,
    pub feed: Vec<TransactionRecord>,
}

/// Last rendered dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// Sequence number of the update currently shown; 0 before the first one
    pub sequence: u64,
    pub last_updated: Option<DateTime<Utc>>,
    pub summary: DashboardSummary,
    pub stats: AggregateStats,
    pub histogram: ScoreHistogram,
    pub feed: Vec<TransactionRecord>,
    pub charts: Option<ChartPaths>,
    /// Message from the most recent failed cycle, cleared on success
    pub last_error: Option<String>,
}

impl DashboardView {
    /// Replace the shown data with `update` unless it is older than what
    /// is already shown. Returns whether the update was applied.
    pub fn apply(&mut self, update: DashboardUpdate) -> bool {
        if update.sequence <= self.sequence {
            return false;
        }
        self.sequence = update.sequence;
        self.last_updated = Some(update.fetched_at);
        self.summary = update.summary;
        self.stats = update.stats;
        self.histogram = update.histogram;
        self.feed = update.feed;
        self.last_error = None;
        true
    }

    /// Keep previous data, only surface the failure
    pub fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn has_data(&self) -> bool {
        self.last_updated.is_some()
    }
}
