use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::models::{ApiError, ErrorResponse};
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, BatchTestRequest, BatchTestResponse, CommitRequest,
    CommitResponse, DetectRequest, DetectResponse, HealthResponse, StatsSnapshot,
};

/// HTTP client for the FraudProof Ledger backend
#[derive(Clone)]
pub struct FraudProofClient {
    http_client: HttpClient,
    base_url: String,
}

impl FraudProofClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    /// Create a client whose requests give up after `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL with an endpoint path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Map a non-success status and its body to an error
    pub(crate) fn classify_status(status: u16, body_text: String) -> ApiError {
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|err| {
                err.message.or_else(|| {
                    err.detail.map(|d| match d {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                })
            })
            .unwrap_or(body_text);

        match status {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Server error {}: {}", status, message);
                ApiError::ServerError(status, message)
            }
            _ => ApiError::HttpError(status, message),
        }
    }

    /// Only `application/json` bodies are accepted
    pub(crate) fn check_content_type(content_type: Option<&str>) -> Result<(), ApiError> {
        match content_type {
            Some(ct)
                if ct
                    .split(';')
                    .next()
                    .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
                    .unwrap_or(false) =>
            {
                Ok(())
            }
            Some(ct) => Err(ApiError::UnexpectedContentType(ct.to_string())),
            None => Err(ApiError::UnexpectedContentType("<missing>".to_string())),
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status.as_u16(), body_text));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Self::check_content_type(content_type.as_deref())?;

        let body_text = response.text().await?;
        serde_json::from_str::<T>(&body_text)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.http_client.get(&url).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.http_client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    /// GET {base}/stats/ (or another configured stats path)
    ///
    /// A body carrying an `error` field is reported as `ApiError::Backend`.
    pub async fn fetch_stats(&self, path: &str) -> Result<StatsSnapshot, ApiError> {
        let snapshot: StatsSnapshot = self.get_json(path).await?;
        if let Some(err) = snapshot.error.as_ref().filter(|e| !e.is_empty()) {
            return Err(ApiError::Backend(err.clone()));
        }
        Ok(snapshot)
    }

    /// POST {base}/analyze
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        self.post_json("/analyze", request).await
    }

    /// POST {base}/commit
    pub async fn commit(&self, request: &CommitRequest) -> Result<CommitResponse, ApiError> {
        self.post_json("/commit", request).await
    }

    /// GET {base}/health
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json("/health").await
    }

    /// POST {base}/test/run-test
    pub async fn run_test(&self, request: &BatchTestRequest) -> Result<BatchTestResponse, ApiError> {
        self.post_json("/test/run-test", request).await
    }

    /// POST {base}/test/detect
    pub async fn detect(&self, request: &DetectRequest) -> Result<DetectResponse, ApiError> {
        self.post_json("/test/detect", request).await
    }
}
