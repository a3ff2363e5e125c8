//! Simulated scanner: submit a forced signal, show the decision, commit the proof

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::fraudproof::{ApiError, FraudProofClient};
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, Category, CommitReceipt, CommitRequest, CommitResponse,
    Decision, FraudThreshold, RiskLevel, Signal,
};
use crate::utils::user_message;

/// Backend calls the scanner needs
#[async_trait]
pub trait ScannerBackend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError>;
    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse, ApiError>;
}

#[async_trait]
impl ScannerBackend for FraudProofClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        FraudProofClient::analyze(self, request).await
    }

    async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse, ApiError> {
        FraudProofClient::commit(self, request).await
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScanError {
    #[error("Select a signal (fraud or legit) before scanning")]
    MissingSignal,
    #[error("Select a model before scanning")]
    MissingModel,
    #[error("Analysis failed: {0}")]
    Analysis(ApiError),
    #[error("Commit is not available: {0}")]
    CommitUnavailable(&'static str),
    #[error("Commit failed: {0}")]
    Commit(ApiError),
}

impl ScanError {
    /// Validation errors never reach the network
    pub fn is_validation(&self) -> bool {
        matches!(self, ScanError::MissingSignal | ScanError::MissingModel)
    }
}

/// Operator selections on the scanner form
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSelection {
    pub category: Category,
    pub model: String,
    pub signal: Option<Signal>,
}

impl ScanSelection {
    pub fn build_request(&self, now: DateTime<Utc>) -> Result<AnalyzeRequest, ScanError> {
        let signal = self.signal.ok_or(ScanError::MissingSignal)?;
        let model = self.model.trim();
        if model.is_empty() {
            return Err(ScanError::MissingModel);
        }

        Ok(AnalyzeRequest {
            transaction_type: self.category,
            model_used: model.to_string(),
            forced_signal: signal,
            fraud_label: signal.fraud_label().to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    /// No analysis yet, or the last one returned nothing committable
    Disabled,
    Ready,
    InFlight,
    Committed,
}

/// Holds the commit button in `InFlight` for one request. Dropping it
/// unsettled (failure or a cancelled future) re-enables commit.
struct CommitAttempt<'a>(&'a mut CommitState);

impl<'a> CommitAttempt<'a> {
    fn begin(state: &'a mut CommitState) -> Self {
        *state = CommitState::InFlight;
        CommitAttempt(state)
    }

    fn settle(self, next: CommitState) {
        *self.0 = next;
    }
}

impl Drop for CommitAttempt<'_> {
    fn drop(&mut self) {
        if *self.0 == CommitState::InFlight {
            *self.0 = CommitState::Ready;
        }
    }
}

/// Proof hashes are hex digests, optionally `0x`-prefixed
pub fn is_valid_proof_hash(hash: &str) -> bool {
    let digits = hash.strip_prefix("0x").unwrap_or(hash);
    !digits.is_empty() && hex::decode(digits).is_ok()
}

/// Build the decision view from the backend response.
///
/// The backend's `risk_level` decides the class; the score is only used
/// when the level is missing or unknown. The forced signal is carried for
/// display and never overrides the backend.
pub fn build_decision(
    response: AnalyzeResponse,
    forced_signal: Signal,
    threshold: FraudThreshold,
) -> Decision {
    let score = response.score.clamp(0, 100) as u8;
    let parsed = response.risk_level.as_deref().and_then(RiskLevel::parse);
    let (risk, risk_inferred) = match parsed {
        Some(level) => (level, false),
        None if threshold.is_fraud(score) => (RiskLevel::High, true),
        None => (RiskLevel::Low, true),
    };

    Decision {
        score,
        risk,
        risk_inferred,
        forced_signal,
        message: response.message,
        proof_hash: response.proof_hash,
        transaction_id: response.transaction_id,
    }
}

/// Scanner page state: the last decision and the commit button
pub struct ScannerSession<B: ScannerBackend> {
    backend: B,
    threshold: FraudThreshold,
    decision: Option<Decision>,
    commit_state: CommitState,
    receipt: Option<CommitReceipt>,
    last_error: Option<String>,
}

impl<B: ScannerBackend> ScannerSession<B> {
    pub fn new(backend: B, threshold: FraudThreshold) -> Self {
        Self {
            backend,
            threshold,
            decision: None,
            commit_state: CommitState::Disabled,
            receipt: None,
            last_error: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    pub fn commit_state(&self) -> CommitState {
        self.commit_state
    }

    pub fn can_commit(&self) -> bool {
        self.commit_state == CommitState::Ready
    }

    pub fn receipt(&self) -> Option<&CommitReceipt> {
        self.receipt.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Validate the selection, submit it, and store the decision
    pub async fn analyze(&mut self, selection: &ScanSelection) -> Result<&Decision, ScanError> {
        let request = match selection.build_request(Utc::now()) {
            Ok(r) => r,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        self.commit_state = CommitState::Disabled;
        self.receipt = None;

        info!(
            "Analyzing {} transaction with model {} (forced {})",
            request.transaction_type, request.model_used, request.forced_signal
        );

        let response = match self.backend.analyze(&request).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Analysis failed: {}", e);
                self.decision = None;
                self.last_error = Some(user_message(&e));
                return Err(ScanError::Analysis(e));
            }
        };

        let decision = build_decision(response, request.forced_signal, self.threshold);
        if decision.risk_inferred {
            warn!("Backend sent no usable risk_level, classified from score {}", decision.score);
        }

        self.commit_state = match (&decision.proof_hash, &decision.transaction_id) {
            (Some(hash), Some(_)) if is_valid_proof_hash(hash) => CommitState::Ready,
            (Some(hash), Some(_)) => {
                warn!("Proof hash '{}' is not hex, commit disabled", hash);
                CommitState::Disabled
            }
            _ => CommitState::Disabled,
        };
        self.last_error = None;

        Ok(&*self.decision.insert(decision))
    }

    /// Commit the last decision's proof hash to the ledger
    pub async fn commit(&mut self) -> Result<&CommitReceipt, ScanError> {
        let request = match (self.commit_state, &self.decision) {
            (CommitState::Ready, Some(decision)) => match (&decision.proof_hash, &decision.transaction_id) {
                (Some(hash), Some(id)) => CommitRequest {
                    proof_hash: hash.clone(),
                    transaction_id: id.clone(),
                },
                _ => return Err(ScanError::CommitUnavailable("analysis returned no proof")),
            },
            (CommitState::InFlight, _) => {
                return Err(ScanError::CommitUnavailable("a commit is already in progress"))
            }
            (CommitState::Committed, _) => {
                return Err(ScanError::CommitUnavailable("proof already committed"))
            }
            _ => return Err(ScanError::CommitUnavailable("run a successful analysis first")),
        };

        let attempt = CommitAttempt::begin(&mut self.commit_state);
        info!("Committing proof {} for transaction {}", request.proof_hash, request.transaction_id);

        match self.backend.commit(&request).await {
            Ok(response) => {
                attempt.settle(CommitState::Committed);
                self.last_error = None;
                Ok(&*self.receipt.insert(CommitReceipt {
                    block_number: response.block_number,
                    tx_hash: response.tx_hash,
                }))
            }
            Err(e) => {
                drop(attempt);
                warn!("Commit failed: {}", e);
                self.last_error = Some(user_message(&e));
                Err(ScanError::Commit(e))
            }
        }
    }
}

/// Decision view as terminal text
pub fn render_decision(decision: &Decision) -> String {
    let verdict = if decision.risk.is_fraud() {
        "🚨 FRAUD DETECTED"
    } else {
        "✅ TRANSACTION LEGIT"
    };
    let mut out = format!(
        "{}\nRisk: {}{} | Score: {}/100 | Forced signal: {}\n",
        verdict,
        decision.risk.as_str(),
        if decision.risk_inferred { " (from score)" } else { "" },
        decision.score,
        decision.forced_signal,
    );
    if let Some(msg) = &decision.message {
        out.push_str(&format!("{}\n", msg));
    }
    if let Some(hash) = &decision.proof_hash {
        out.push_str(&format!("Proof: {}\n", hash));
    }
    out
}

/// Ledger receipt as terminal text
pub fn render_receipt(receipt: &CommitReceipt) -> String {
    format!(
        "⛓️  Committed in block {} | tx {}\n",
        receipt
            .block_number
            .map(|b| b.to_string())
            .unwrap_or_else(|| "?".to_string()),
        receipt.tx_hash.as_deref().unwrap_or("-"),
    )
}
