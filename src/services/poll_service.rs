//! Timer-driven fetch → aggregate → render cycle

use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::PoisonError;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::fraudproof::{ApiError, FraudProofClient};
use crate::models::{DashboardView, FraudThreshold, TransactionRecord};
use crate::services::{chart_service, dashboard_service};
use crate::utils::user_message;

/// Anything that can hand the poller a fresh batch of records
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<TransactionRecord>, ApiError>;
}

/// The backend's stats endpoint (`/stats/` or `/dash/`)
pub struct StatsEndpoint {
    client: FraudProofClient,
    path: String,
}

impl StatsEndpoint {
    pub fn new(client: FraudProofClient, path: &str) -> Self {
        Self {
            client,
            path: path.to_string(),
        }
    }
}

#[async_trait]
impl RecordSource for StatsEndpoint {
    async fn fetch_records(&self) -> Result<Vec<TransactionRecord>, ApiError> {
        let snapshot = self.client.fetch_stats(&self.path).await?;
        if let Some(total) = snapshot.total_records {
            if total as usize != snapshot.records.len() {
                debug!(
                    "Backend reported total_records={} but sent {} records",
                    total,
                    snapshot.records.len()
                );
            }
        }
        Ok(snapshot.records)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Fetching,
    Updating,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A previous fetch was still outstanding
    Skipped,
    Updated { records: usize },
    /// Fetched fine but a newer update was already shown
    Discarded,
    Failed(ApiError),
}

/// Pipeline parameters: one poller per endpoint/threshold/interval combination
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub threshold: FraudThreshold,
    pub interval: Duration,
    pub chart_dir: Option<PathBuf>,
}

/// Clears the in-flight flag and returns the poller to `Idle` when the
/// tick ends, however it ends (including a dropped future)
struct InFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a std::sync::Mutex<PollState>,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, state: &'a std::sync::Mutex<PollState>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { flag, state })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = PollState::Idle;
        self.flag.store(false, Ordering::Release);
    }
}

pub struct Poller<S: RecordSource> {
    source: S,
    settings: PollSettings,
    in_flight: AtomicBool,
    next_sequence: AtomicU64,
    state: std::sync::Mutex<PollState>,
    view: Mutex<DashboardView>,
}

impl<S: RecordSource> Poller<S> {
    pub fn new(source: S, settings: PollSettings) -> Self {
        Self {
            source,
            settings,
            in_flight: AtomicBool::new(false),
            next_sequence: AtomicU64::new(0),
            state: std::sync::Mutex::new(PollState::Idle),
            view: Mutex::new(DashboardView::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> PollState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: PollState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Copy of the current view-model
    pub async fn snapshot(&self) -> DashboardView {
        self.view.lock().await.clone()
    }

    /// One fetch → aggregate → render cycle
    pub async fn tick(&self) -> TickOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.in_flight, &self.state) else {
            debug!("Previous fetch still outstanding, skipping tick");
            return TickOutcome::Skipped;
        };

        let sequence = self.next_sequence.fetch_add(1, Ordering::AcqRel) + 1;
        self.set_state(PollState::Fetching);

        match self.source.fetch_records().await {
            Ok(records) => {
                self.set_state(PollState::Updating);
                self.apply_records(&records, sequence).await
            }
            Err(e) => {
                self.set_state(PollState::Error);
                warn!("Poll #{} failed: {}", sequence, e);
                self.view.lock().await.record_error(user_message(&e));
                TickOutcome::Failed(e)
            }
        }
    }

    async fn apply_records(&self, records: &[TransactionRecord], sequence: u64) -> TickOutcome {
        let update =
            dashboard_service::build_update(records, self.settings.threshold, sequence, Utc::now());

        let chart_input = {
            let mut view = self.view.lock().await;
            if !view.apply(update) {
                debug!("Discarding poll #{}: view already at #{}", sequence, view.sequence);
                return TickOutcome::Discarded;
            }
            self.settings
                .chart_dir
                .clone()
                .map(|dir| (dir, view.stats.clone(), view.histogram.clone()))
        };

        if let Some((dir, stats, histogram)) = chart_input {
            let rendered = tokio::task::spawn_blocking(move || {
                chart_service::render_charts(&dir, &stats, &histogram)
            })
            .await;
            match rendered {
                Ok(Ok(paths)) => {
                    let mut view = self.view.lock().await;
                    if view.sequence == sequence {
                        view.charts = Some(paths);
                    }
                }
                Ok(Err(e)) => warn!("Chart render failed: {}", e),
                Err(e) => warn!("Chart render task failed: {}", e),
            }
        }

        debug!("Poll #{} applied {} records", sequence, records.len());
        TickOutcome::Updated {
            records: records.len(),
        }
    }

    /// Tick on the configured interval until `shutdown` resolves.
    /// `on_tick` sees the view after every cycle that was not skipped.
    /// A fetch still outstanding at shutdown is dropped.
    pub async fn run<F, R>(&self, shutdown: F, mut on_tick: R)
    where
        F: Future<Output = ()>,
        R: FnMut(&TickOutcome, &DashboardView),
    {
        let mut interval = tokio::time::interval(self.settings.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!("Polling every {}s", self.settings.interval.as_secs_f64());

        loop {
            let due = tokio::select! {
                _ = &mut shutdown => false,
                _ = interval.tick() => true,
            };
            if !due {
                break;
            }

            let outcome = tokio::select! {
                _ = &mut shutdown => None,
                outcome = self.tick() => Some(outcome),
            };
            let Some(outcome) = outcome else {
                break;
            };

            if outcome != TickOutcome::Skipped {
                let view = self.view.lock().await;
                on_tick(&outcome, &view);
            }
        }

        info!("Poller stopping");
    }
}
