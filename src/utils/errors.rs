use crate::api::fraudproof::ApiError;

/// Short user-facing message for a failed backend call
///
/// Network failures and protocol errors get different wording so the
/// operator can tell "backend down" from "backend misbehaving".
pub fn user_message(err: &ApiError) -> String {
    match err {
        ApiError::RequestError(_) => {
            "⚠️ Network Error: cannot reach the backend. Retrying on the next refresh.".to_string()
        }
        ApiError::Timeout(_) => {
            "⚠️ Network Error: the backend did not answer in time.".to_string()
        }
        ApiError::ServerError(code, _) | ApiError::HttpError(code, _) => {
            format!("❌ Backend returned HTTP {}", code)
        }
        ApiError::BadRequest(msg) | ApiError::NotFound(msg) => {
            format!("❌ {}", extract_clean_error(msg))
        }
        ApiError::UnexpectedContentType(ct) => {
            format!("❌ Backend sent '{}' instead of JSON", ct)
        }
        ApiError::DeserializationError(_) => "❌ Backend sent an unreadable response".to_string(),
        ApiError::Backend(msg) => format!("❌ Backend error: {}", extract_clean_error(msg)),
    }
}

/// Strip exception prefixes like "(sqlite3.OperationalError) no such table: fraud_logs"
/// down to the meaningful tail: "no such table: fraud_logs"
pub fn extract_clean_error(error_msg: &str) -> String {
    let trimmed = error_msg.trim();
    if trimmed.starts_with('(') {
        if let Some(close) = trimmed.find(") ") {
            return trimmed[close + 2..].trim().to_string();
        }
    }
    if trimmed.is_empty() {
        "unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
