//! Derived dashboard aggregates

use std::collections::BTreeMap;

use super::transaction::Category;

/// Number of score buckets on the histogram
pub const HISTOGRAM_BUCKETS: usize = 10;

/// Score above which a record counts as fraud. 50 itself is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FraudThreshold(pub u8);

impl FraudThreshold {
    pub const DEFAULT: FraudThreshold = FraudThreshold(50);

    pub fn is_fraud(self, clamped_score: u8) -> bool {
        clamped_score > self.0
    }
}

impl Default for FraudThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub safe: u64,
    pub fraud: u64,
}

impl CategoryCounts {
    pub fn total(&self) -> u64 {
        self.safe + self.fraud
    }
}

/// Per-category safe/fraud counts. Every category is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    counts: BTreeMap<Category, CategoryCounts>,
}

impl AggregateStats {
    pub fn new() -> Self {
        let counts = Category::ALL
            .iter()
            .map(|c| (*c, CategoryCounts::default()))
            .collect();
        Self { counts }
    }

    pub fn get(&self, category: Category) -> CategoryCounts {
        self.counts.get(&category).copied().unwrap_or_default()
    }

    pub(crate) fn record(&mut self, category: Category, is_fraud: bool) {
        let entry = self.counts.entry(category).or_default();
        if is_fraud {
            entry.fraud += 1;
        } else {
            entry.safe += 1;
        }
    }

    /// Categories in display order with their counts
    pub fn iter(&self) -> impl Iterator<Item = (Category, CategoryCounts)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(CategoryCounts::total).sum()
    }
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Ten fixed-width score buckets; the last one includes 100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreHistogram {
    pub buckets: [u64; HISTOGRAM_BUCKETS],
}

impl ScoreHistogram {
    /// Bucket index for an already-clamped score
    pub fn bucket_index(clamped_score: u8) -> usize {
        (clamped_score as usize / 10).min(HISTOGRAM_BUCKETS - 1)
    }

    pub(crate) fn add(&mut self, clamped_score: u8) {
        self.buckets[Self::bucket_index(clamped_score)] += 1;
    }

    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }

    pub fn max(&self) -> u64 {
        self.buckets.iter().copied().max().unwrap_or(0)
    }

    /// Axis label for a bucket, e.g. "30-40" or "90-100"
    pub fn label(index: usize) -> String {
        let low = index * 10;
        let high = if index + 1 == HISTOGRAM_BUCKETS { 100 } else { low + 10 };
        format!("{}-{}", low, high)
    }
}

/// Header counters shown above the dashboard tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total: u64,
    pub safe: u64,
    pub fraud: u64,
    pub unrecognized: u64,
    pub mean_score: Option<f64>,
}
