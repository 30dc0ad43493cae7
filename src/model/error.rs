use crate::model::health::CheckHealthResult;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to parse settings json data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bucket is required")]
    MissingBucket,

    #[error("url expiry must be between 1 and {max} seconds, got: {got}")]
    Expiry { got: u64, max: u64 },
}

/// A single failed presign call. The key is kept so the failure can be logged
/// against the object it was meant for.
#[derive(Clone, Debug, thiserror::Error)]
#[error("failed to presign get_object at: {key}, {message}")]
pub struct SignError {
    pub key: String,
    pub message: String,
}

/// Raised by the health probe alongside the error-status result it produced.
#[derive(Debug, thiserror::Error)]
#[error("health check failed: {source}")]
pub struct HealthError {
    pub result: CheckHealthResult,
    pub source: SignError,
}

#[derive(Debug, thiserror::Error)]
pub enum QueryInputError {
    #[error("failed to parse queries: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate refId in queries: {0}")]
    DuplicateRefId(String),
}
