//! Recent-activity feed selection

use std::cmp::Reverse;

use crate::models::TransactionRecord;

/// Entries shown in the live feed
pub const FEED_LIMIT: usize = 10;

/// The ten most recent records, newest first
pub fn select_feed(records: &[TransactionRecord]) -> Vec<TransactionRecord> {
    select_feed_with_limit(records, FEED_LIMIT)
}

/// Most recent `limit` records, newest first.
///
/// Missing or unparseable `created_at` sorts as oldest. The sort is stable,
/// so equal timestamps keep their input order.
pub fn select_feed_with_limit(records: &[TransactionRecord], limit: usize) -> Vec<TransactionRecord> {
    let mut keyed: Vec<_> = records
        .iter()
        .map(|r| (r.created_at_utc(), r))
        .collect();

    // None < Some(_), so reversing puts missing timestamps last
    keyed.sort_by_key(|(ts, _)| Reverse(*ts));

    keyed
        .into_iter()
        .take(limit)
        .map(|(_, r)| r.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, created_at: Option<&str>) -> TransactionRecord {
        TransactionRecord {
            id: serde_json::json!(id),
            transaction_type: "bank".to_string(),
            fraud_score: 10,
            created_at: created_at.map(str::to_string),
            tx_hash: None,
            blockchain_tx_hash: None,
            model_version: None,
            blockchain_data: None,
        }
    }

    fn ids(feed: &[TransactionRecord]) -> Vec<i64> {
        feed.iter().map(|r| r.id.as_i64().unwrap()).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let records = vec![
            record(1, Some("2025-01-01T10:00:00")),
            record(2, Some("2025-01-03T10:00:00")),
            record(3, Some("2025-01-02T10:00:00")),
        ];
        assert_eq!(ids(&select_feed(&records)), vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_timestamps_are_oldest_and_stable() {
        let records = vec![
            record(1, None),
            record(2, Some("2025-01-01T10:00:00")),
            record(3, Some("not a date")),
            record(4, Some("2025-01-01T10:00:00")),
            record(5, None),
        ];
        assert_eq!(ids(&select_feed(&records)), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_truncates_to_ten() {
        let records: Vec<_> = (0..25)
            .map(|i| record(i, Some(&format!("2025-01-01T10:{:02}:00", i))))
            .collect();
        let feed = select_feed(&records);
        assert_eq!(feed.len(), FEED_LIMIT);
        assert_eq!(ids(&feed), (15..25).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_input_not_mutated() {
        let records = vec![
            record(1, Some("2025-01-01T10:00:00")),
            record(2, Some("2025-01-02T10:00:00")),
        ];
        let before = records.clone();
        let _ = select_feed(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn test_small_limit() {
        let records = vec![record(1, None), record(2, Some("2025-01-01T00:00:00Z"))];
        assert_eq!(ids(&select_feed_with_limit(&records, 1)), vec![2]);
        assert!(select_feed_with_limit(&records, 0).is_empty());
    }
}
