//! Aggregation of raw records into chart-ready series

use crate::models::{
    AggregateStats, DashboardSummary, FraudThreshold, ScoreHistogram, TransactionRecord,
};

/// Count safe/fraud records per recognized category.
/// Records with an unknown `transaction_type` are skipped.
pub fn aggregate(records: &[TransactionRecord], threshold: FraudThreshold) -> AggregateStats {
    let mut stats = AggregateStats::new();
    for record in records {
        if let Some(category) = record.category() {
            stats.record(category, threshold.is_fraud(record.clamped_score()));
        }
    }
    stats
}

/// Bin every record's clamped score into one of ten buckets
pub fn histogram(records: &[TransactionRecord]) -> ScoreHistogram {
    let mut hist = ScoreHistogram::default();
    for record in records {
        hist.add(record.clamped_score());
    }
    hist
}

/// Header counters: totals over all records, recognized or not
pub fn summarize(records: &[TransactionRecord], threshold: FraudThreshold) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    let mut score_sum: u64 = 0;

    for record in records {
        let score = record.clamped_score();
        summary.total += 1;
        score_sum += score as u64;

        if threshold.is_fraud(score) {
            summary.fraud += 1;
        } else {
            summary.safe += 1;
        }
        if record.category().is_none() {
            summary.unrecognized += 1;
        }
    }

    if summary.total > 0 {
        summary.mean_score = Some(score_sum as f64 / summary.total as f64);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryCounts};

    fn record(kind: &str, score: i64) -> TransactionRecord {
        TransactionRecord {
            id: serde_json::json!(1),
            transaction_type: kind.to_string(),
            fraud_score: score,
            created_at: None,
            tx_hash: None,
            blockchain_tx_hash: None,
            model_version: None,
            blockchain_data: None,
        }
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let stats = aggregate(&[], FraudThreshold::DEFAULT);
        for (_, counts) in stats.iter() {
            assert_eq!(counts, CategoryCounts::default());
        }
        assert_eq!(histogram(&[]).buckets, [0; 10]);
        assert_eq!(summarize(&[], FraudThreshold::DEFAULT).mean_score, None);
    }

    #[test]
    fn test_mixed_categories_scenario() {
        let records = vec![record("bank", 30), record("bank", 80), record("vehicle", 55)];

        let stats = aggregate(&records, FraudThreshold::DEFAULT);
        assert_eq!(stats.get(Category::Bank), CategoryCounts { safe: 1, fraud: 1 });
        assert_eq!(stats.get(Category::Vehicle), CategoryCounts { safe: 0, fraud: 1 });
        assert_eq!(stats.get(Category::Ecommerce), CategoryCounts::default());
        assert_eq!(stats.get(Category::Ethereum), CategoryCounts::default());

        let hist = histogram(&records);
        let mut expected = [0u64; 10];
        expected[3] = 1;
        expected[5] = 1;
        expected[8] = 1;
        assert_eq!(hist.buckets, expected);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let records = vec![record("ecommerce", 50), record("ecommerce", 51)];
        let stats = aggregate(&records, FraudThreshold::DEFAULT);
        assert_eq!(stats.get(Category::Ecommerce), CategoryCounts { safe: 1, fraud: 1 });

        let stricter = aggregate(&records, FraudThreshold(49));
        assert_eq!(stricter.get(Category::Ecommerce), CategoryCounts { safe: 0, fraud: 2 });
    }

    #[test]
    fn test_unrecognized_type_only_hits_histogram() {
        let base = vec![record("bank", 10), record("ethereum", 95)];
        let mut with_unknown = base.clone();
        with_unknown.push(record("crypto", 70));
        with_unknown.push(record("", 20));

        assert_eq!(
            aggregate(&base, FraudThreshold::DEFAULT),
            aggregate(&with_unknown, FraudThreshold::DEFAULT)
        );
        assert_eq!(histogram(&with_unknown).total(), 4);

        let summary = summarize(&with_unknown, FraudThreshold::DEFAULT);
        assert_eq!(summary.unrecognized, 2);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_bucket_edges_and_clamping() {
        assert_eq!(ScoreHistogram::bucket_index(0), 0);
        assert_eq!(ScoreHistogram::bucket_index(9), 0);
        assert_eq!(ScoreHistogram::bucket_index(10), 1);
        assert_eq!(ScoreHistogram::bucket_index(99), 9);
        assert_eq!(ScoreHistogram::bucket_index(100), 9);

        let hist = histogram(&[record("bank", -20), record("bank", 250), record("bank", 100)]);
        assert_eq!(hist.buckets[0], 1);
        assert_eq!(hist.buckets[9], 2);
    }

    #[test]
    fn test_histogram_sums_to_input_length() {
        let records: Vec<_> = (-15..=115).map(|s| record("vehicle", s)).collect();
        let hist = histogram(&records);
        assert_eq!(hist.total(), records.len() as u64);

        let stats = aggregate(&records, FraudThreshold::DEFAULT);
        assert!(stats.total() <= records.len() as u64);
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![record("bank", 20), record("vehicle", 90), record("bank", 40)];
        let summary = summarize(&records, FraudThreshold::DEFAULT);
        assert_eq!(summary.safe, 2);
        assert_eq!(summary.fraud, 1);
        assert_eq!(summary.mean_score, Some(50.0));
    }
}
