use chrono::{DateTime, Utc};

use crate::models::{
    DashboardUpdate, DashboardView, FraudThreshold, ScoreHistogram, TransactionRecord,
};
use crate::services::{aggregate_service, feed_service};
use crate::utils::{format_age, format_elapsed_secs, Table};

/// Run the aggregator and feed selector over one batch of records
pub fn build_update(
    records: &[TransactionRecord],
    threshold: FraudThreshold,
    sequence: u64,
    fetched_at: DateTime<Utc>,
) -> DashboardUpdate {
    DashboardUpdate {
        sequence,
        fetched_at,
        summary: aggregate_service::summarize(records, threshold),
        stats: aggregate_service::aggregate(records, threshold),
        histogram: aggregate_service::histogram(records),
        feed: feed_service::select_feed(records),
    }
}

/// Render the dashboard as terminal text
pub fn render_dashboard(view: &DashboardView, threshold: FraudThreshold, now: DateTime<Utc>) -> String {
    let mut out = String::from("🛡️  FraudProof Live Dashboard\n");

    if let Some(err) = &view.last_error {
        out.push_str(&format!("{}\n", err));
    }

    if !view.has_data() {
        out.push_str("Waiting for first update...\n");
        return out;
    }

    let summary = &view.summary;
    let mean = summary
        .mean_score
        .map(|m| format!("{:.1}", m))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "Total: {} | Safe: {} | Fraud: {} | Avg score: {} | Updated: {}\n",
        summary.total,
        summary.safe,
        summary.fraud,
        mean,
        view.last_updated
            .map(|ts| format_elapsed_secs((now - ts).num_seconds()))
            .unwrap_or_else(|| "never".to_string()),
    ));
    if summary.unrecognized > 0 {
        out.push_str(&format!(
            "({} record(s) with unrecognized type excluded from categories)\n",
            summary.unrecognized
        ));
    }

    out.push('\n');
    let mut categories = Table::new(&["Category", "Safe", "Fraud"]);
    for (category, counts) in view.stats.iter() {
        categories.add_row(&[
            category.to_string(),
            counts.safe.to_string(),
            counts.fraud.to_string(),
        ]);
    }
    out.push_str(&categories.render());

    out.push('\n');
    let mut buckets = Table::new(&["Score", "Count"]);
    for (i, count) in view.histogram.buckets.iter().enumerate() {
        buckets.add_row(&[ScoreHistogram::label(i), count.to_string()]);
    }
    out.push_str(&buckets.render());

    out.push('\n');
    out.push_str(&render_feed(&view.feed, threshold, now));

    if let Some(charts) = &view.charts {
        out.push_str(&format!(
            "\nCharts: {} | {}\n",
            charts.trend.display(),
            charts.histogram.display()
        ));
    }

    out
}

/// Live feed table, one row per record
pub fn render_feed(feed: &[TransactionRecord], threshold: FraudThreshold, now: DateTime<Utc>) -> String {
    if feed.is_empty() {
        return "No recent activity\n".to_string();
    }

    let mut table = Table::new(&["ID", "Type", "Model", "Score", "Verdict", "Age", "Ledger", "Proof"])
        .with_max_cell_width(18);
    for record in feed {
        let score = record.clamped_score();
        let verdict = if threshold.is_fraud(score) { "FRAUD" } else { "SAFE" };
        table.add_row(&[
            record.id_text(),
            record.transaction_type.clone(),
            record.model_version.clone().unwrap_or_else(|| "-".to_string()),
            score.to_string(),
            verdict.to_string(),
            format_age(record.created_at.as_deref(), now),
            record.chain_check().label(),
            record.display_hash().unwrap_or("-").to_string(),
        ]);
    }
    table.render()
}
